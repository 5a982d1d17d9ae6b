use super::*;
use crate::types::UserId;

fn user(role: Role) -> User {
    User {
        id: UserId::Int(1),
        username: "alice".to_owned(),
        email: "alice@example.edu".to_owned(),
        full_name: "Alice".to_owned(),
        birth_year: Some(2003),
        role,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn tokens() -> TokenPair {
    TokenPair::new("access-1", "refresh-1").expect("tokens")
}

// =============================================================================
// TokenPair
// =============================================================================

#[test]
fn token_pair_requires_both_tokens() {
    assert!(TokenPair::new("", "r").is_none());
    assert!(TokenPair::new("a", "  ").is_none());
    let pair = TokenPair::new("a", "r").expect("pair");
    assert_eq!(pair.access(), "a");
    assert_eq!(pair.refresh(), "r");
}

#[test]
fn token_pair_debug_is_redacted() {
    assert_eq!(format!("{:?}", tokens()), "TokenPair(<redacted>)");
}

// =============================================================================
// SessionState
// =============================================================================

#[test]
fn default_state_is_loading_and_unauthenticated() {
    let state = SessionState::default();
    assert!(state.is_loading());
    assert!(!state.is_authenticated());
    assert!(state.user().is_none());
}

#[test]
fn authenticated_state_carries_user_and_tokens() {
    let mut state = SessionState::default();
    assert_eq!(state.authenticate(user(Role::Admin), tokens()), Transition::SignedIn);
    assert!(state.is_authenticated());
    assert!(!state.is_loading());
    assert_eq!(state.role(), Some(Role::Admin));
    let pair = state.tokens().expect("tokens");
    assert!(!pair.access().is_empty() && !pair.refresh().is_empty());
}

#[test]
fn reauthenticating_is_unchanged_but_refreshes_user() {
    let mut state = SessionState::default();
    state.authenticate(user(Role::User), tokens());
    let mut updated = user(Role::User);
    updated.full_name = "Alice N.".to_owned();
    assert_eq!(state.authenticate(updated, tokens()), Transition::Unchanged);
    assert_eq!(state.user().map(|u| u.full_name.as_str()), Some("Alice N."));
}

#[test]
fn loading_to_unauthenticated_signs_out() {
    let mut state = SessionState::default();
    assert_eq!(state.invalidate(), Transition::SignedOut);
    assert!(!state.is_loading());
    assert!(state.user().is_none());
}

#[test]
fn repeated_invalidation_reports_a_single_sign_out() {
    let mut state = SessionState::default();
    state.authenticate(user(Role::Lecturer), tokens());
    assert_eq!(state.invalidate(), Transition::SignedOut);
    assert_eq!(state.invalidate(), Transition::Unchanged);
    assert_eq!(state.invalidate(), Transition::Unchanged);
    assert!(state.tokens().is_none());
}

#[test]
fn unauthenticated_to_authenticated_signs_in() {
    let mut state = SessionState::Unauthenticated;
    assert_eq!(state.authenticate(user(Role::User), tokens()), Transition::SignedIn);
}
