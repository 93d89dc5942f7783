use crate::{CoreError, Role};

use std::str::FromStr;

#[test]
fn given_known_names_when_parsed_then_round_trips() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("user").unwrap(), Role::User);
    assert_eq!(Role::Admin.as_str(), "admin");
    assert_eq!(Role::User.as_str(), "user");
}

#[test]
fn given_unknown_name_when_parsed_then_returns_unknown_role_error() {
    let result = Role::from_str("superuser");

    assert!(matches!(result, Err(CoreError::UnknownRole { .. })));
}

#[test]
fn given_role_when_serialized_then_uses_lowercase_name() {
    let json = serde_json::to_string(&Role::Admin).unwrap();

    assert_eq!(json, "\"admin\"");
}
