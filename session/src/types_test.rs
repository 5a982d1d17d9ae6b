use super::*;

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_parses_known_values_case_insensitively() {
    assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
    assert_eq!(" Lecturer ".parse::<Role>(), Ok(Role::Lecturer));
    assert_eq!("USER".parse::<Role>(), Ok(Role::User));
}

#[test]
fn role_rejects_unknown_value() {
    assert_eq!("student".parse::<Role>(), Err(UnknownRole("student".to_owned())));
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Lecturer).unwrap(), "\"lecturer\"");
    assert_eq!(Role::Admin.to_string(), "admin");
}

// =============================================================================
// User
// =============================================================================

#[test]
fn user_deserializes_camel_case_profile() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 7,
        "username": "alice",
        "email": "alice@example.edu",
        "fullName": "Alice Nguyen",
        "birthYear": 2003,
        "role": "user",
        "createdAt": "2024-09-01T08:00:00Z",
        "updatedAt": "2024-09-02T08:00:00Z"
    }))
    .unwrap();
    assert_eq!(user.id, UserId::Int(7));
    assert_eq!(user.full_name, "Alice Nguyen");
    assert_eq!(user.birth_year, Some(2003));
    assert_eq!(user.role, Role::User);
}

#[test]
fn user_accepts_string_id_and_missing_optional_fields() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": "65f0c1",
        "username": "root",
        "role": "admin"
    }))
    .unwrap();
    assert_eq!(user.id.to_string(), "65f0c1");
    assert!(user.email.is_empty());
    assert_eq!(user.birth_year, None);
}

// =============================================================================
// LoginGrant
// =============================================================================

#[test]
fn login_grant_accepts_camel_and_snake_keys() {
    let camel: LoginGrant = serde_json::from_value(serde_json::json!({
        "accessToken": "a", "refreshToken": "r", "role": "admin"
    }))
    .unwrap();
    let snake: LoginGrant = serde_json::from_value(serde_json::json!({
        "access_token": "a", "refresh_token": "r", "role": "admin"
    }))
    .unwrap();
    assert_eq!(camel, snake);
}

#[test]
fn secrets_are_redacted_from_debug_output() {
    let grant = LoginGrant {
        access_token: "secret-access".to_owned(),
        refresh_token: "secret-refresh".to_owned(),
        role: Role::User,
    };
    let creds = Credentials::new("u", "hunter2");
    let rendered = format!("{grant:?} {creds:?}");
    assert!(!rendered.contains("secret-access"));
    assert!(!rendered.contains("secret-refresh"));
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("User"));
}

// =============================================================================
// RegisterForm
// =============================================================================

#[test]
fn register_form_serializes_camel_case() {
    let form = RegisterForm {
        username: "bob".to_owned(),
        email: "bob@example.edu".to_owned(),
        password: "pw".to_owned(),
        full_name: "Bob Tran".to_owned(),
        birth_year: 2002,
    };
    let json = serde_json::to_value(&form).unwrap();
    assert_eq!(json["fullName"], "Bob Tran");
    assert_eq!(json["birthYear"], 2002);
}
