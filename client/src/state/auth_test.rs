use super::*;
use session::{TokenPair, UserId};

fn user(full_name: &str, role: Role) -> User {
    User {
        id: UserId::Int(7),
        username: "jdoe".to_owned(),
        email: "jdoe@example.edu".to_owned(),
        full_name: full_name.to_owned(),
        birth_year: Some(2001),
        role,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn signed_in(full_name: &str, role: Role) -> AuthState {
    let tokens = TokenPair::new("acc", "ref").unwrap();
    AuthState::from(&SessionState::Authenticated { user: user(full_name, role), tokens })
}

#[test]
fn default_state_is_loading() {
    let state = AuthState::default();
    assert!(state.loading());
    assert!(!state.is_authenticated());
    assert_eq!(state.role(), None);
}

#[test]
fn from_session_state_mirrors_user_and_role() {
    let state = signed_in("Jane Doe", Role::Lecturer);
    assert!(state.is_authenticated());
    assert!(!state.loading());
    assert_eq!(state.role(), Some(Role::Lecturer));
    assert_eq!(state.user().map(|u| u.username.as_str()), Some("jdoe"));
}

#[test]
fn display_name_prefers_full_name() {
    assert_eq!(signed_in("Jane Doe", Role::User).display_name(), "Jane Doe");
    assert_eq!(signed_in("   ", Role::User).display_name(), "jdoe");
}

#[test]
fn display_name_empty_when_signed_out() {
    let state = AuthState::from(&SessionState::Unauthenticated);
    assert_eq!(state.display_name(), "");
}
