mod common;

use common::{create_test_pool, sample_user};

use idm_core::Role;
use idm_db::{DbError, UserRepository};

use googletest::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn given_valid_user_when_created_then_can_be_found_by_id() {
    // Given: A test database
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool.clone());
    let user = sample_user("alice", "alice@example.com");

    // When: Creating the user
    repo.create(&user).await.unwrap();

    // Then: Finding by ID returns the user
    let result = repo.find_by_id(user.id).await.unwrap();

    assert_that!(result, some(anything()));
    let found = result.unwrap();
    assert_that!(found.id, eq(user.id));
    assert_that!(found.username, eq(&user.username));
    assert_that!(found.email, eq(&user.email));
    assert_that!(found.password_hash, eq(&user.password_hash));
    assert_that!(found.roles, eq(&vec![Role::User]));
    assert_that!(found.created_at.timestamp(), eq(user.created_at.timestamp()));
}

#[tokio::test]
async fn given_created_user_when_found_by_email_then_returns_user() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool.clone());
    let user = sample_user("bob", "bob@example.com");
    repo.create(&user).await.unwrap();

    let result = repo.find_by_email("bob@example.com").await.unwrap();

    assert_that!(result, some(anything()));
    assert_that!(result.unwrap().id, eq(user.id));
}

#[tokio::test]
async fn given_created_user_when_found_by_username_then_returns_user() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool.clone());
    let user = sample_user("carol", "carol@example.com");
    repo.create(&user).await.unwrap();

    let result = repo.find_by_username("carol").await.unwrap();

    assert_that!(result, some(anything()));
    assert_that!(result.unwrap().id, eq(user.id));
}

#[tokio::test]
async fn given_empty_database_when_finding_nonexistent_id_then_returns_none() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool.clone());

    let result = repo.find_by_id(Uuid::new_v4()).await.unwrap();

    assert_that!(result, none());
}

#[tokio::test]
async fn given_duplicate_email_when_created_then_returns_unique_violation_naming_email() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool.clone());
    repo.create(&sample_user("dave", "dave@example.com"))
        .await
        .unwrap();

    let result = repo.create(&sample_user("dave2", "dave@example.com")).await;

    match result {
        Err(DbError::UniqueViolation { column, .. }) => assert_that!(column, eq("email")),
        other => panic!("expected UniqueViolation, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn given_duplicate_username_when_created_then_returns_unique_violation_naming_username() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool.clone());
    repo.create(&sample_user("erin", "erin@example.com"))
        .await
        .unwrap();

    let result = repo.create(&sample_user("erin", "erin2@example.com")).await;

    match result {
        Err(DbError::UniqueViolation { column, .. }) => assert_that!(column, eq("username")),
        other => panic!("expected UniqueViolation, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn given_multiple_users_when_listed_then_all_are_returned() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool.clone());
    repo.create(&sample_user("frank", "frank@example.com"))
        .await
        .unwrap();
    repo.create(&sample_user("grace", "grace@example.com"))
        .await
        .unwrap();

    let users = repo.list().await.unwrap();

    assert_that!(users.len(), eq(2));
}

#[tokio::test]
async fn given_existing_user_when_deleted_then_no_longer_found() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool.clone());
    let user = sample_user("heidi", "heidi@example.com");
    repo.create(&user).await.unwrap();

    let deleted = repo.delete(user.id).await.unwrap();

    assert_that!(deleted, eq(true));
    assert_that!(repo.find_by_id(user.id).await.unwrap(), none());
}

#[tokio::test]
async fn given_missing_user_when_deleted_then_returns_false() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool.clone());

    let deleted = repo.delete(Uuid::new_v4()).await.unwrap();

    assert_that!(deleted, eq(false));
}

#[tokio::test]
async fn given_user_with_multiple_roles_when_round_tripped_then_roles_survive() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool.clone());
    let mut user = sample_user("ivan", "ivan@example.com");
    user.roles = vec![Role::Admin, Role::User];
    repo.create(&user).await.unwrap();

    let found = repo.find_by_id(user.id).await.unwrap().unwrap();

    assert_that!(found.roles, eq(&vec![Role::Admin, Role::User]));
}
