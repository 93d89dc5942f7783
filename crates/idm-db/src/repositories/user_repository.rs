//! User repository for the identity store.
//!
//! Plain `sqlx::query` with binds rather than the `query!` macro, so the
//! crate builds without a prepared database. Ids are stored as uuid text,
//! timestamps as unix seconds, roles as a comma-joined list.

use crate::{DbError, Result as DbErrorResult};

use idm_core::{Role, User};

use std::panic::Location;
use std::str::FromStr;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const SELECT_COLUMNS: &str = "id, username, email, password_hash, roles, created_at";

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user. Duplicate username or email surfaces as
    /// `DbError::UniqueViolation` naming the offending column.
    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        let id = user.id.to_string();
        let roles = join_roles(&user.roles);
        let created_at = user.created_at.timestamp();

        sqlx::query(
            r#"
                INSERT INTO users (id, username, email, password_hash, roles, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(roles)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let id_str = id.to_string();

        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = ?",
            SELECT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    pub async fn find_by_username(&self, username: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE username = ?",
            SELECT_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    pub async fn list(&self) -> DbErrorResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at, username",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_user).collect()
    }

    /// Administrative removal. Returns whether a row was deleted.
    pub async fn delete(&self, id: Uuid) -> DbErrorResult<bool> {
        let id_str = id.to_string();

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id_str)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn join_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[track_caller]
fn row_to_user(row: &SqliteRow) -> DbErrorResult<User> {
    let id: String = row.try_get("id")?;
    let username: String = row.try_get("username")?;
    let email: String = row.try_get("email")?;
    let password_hash: String = row.try_get("password_hash")?;
    let roles: String = row.try_get("roles")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| DbError::Corrupt {
            message: format!("Invalid uuid in users.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        username,
        email,
        password_hash,
        roles: parse_roles(&roles)?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::Corrupt {
            message: "Invalid timestamp in users.created_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}

#[track_caller]
fn parse_roles(joined: &str) -> DbErrorResult<Vec<Role>> {
    joined
        .split(',')
        .filter(|name| !name.is_empty())
        .map(|name| {
            Role::from_str(name.trim()).map_err(|e| DbError::Corrupt {
                message: format!("Invalid role in users.roles: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
        })
        .collect()
}
