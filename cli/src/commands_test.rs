use super::*;
use session::{Role, TokenPair, UserId};

#[test]
fn describe_reports_each_phase() {
    assert_eq!(describe(&SessionState::Loading), "session: loading");
    assert_eq!(describe(&SessionState::Unauthenticated), "session: signed out");

    let state = SessionState::Authenticated {
        user: User {
            id: UserId::Int(3),
            username: "lan".to_owned(),
            email: String::new(),
            full_name: String::new(),
            birth_year: None,
            role: Role::Lecturer,
            created_at: String::new(),
            updated_at: String::new(),
        },
        tokens: TokenPair::new("a", "r").unwrap(),
    };
    assert_eq!(describe(&state), "session: signed in as lan (lecturer)");
}

#[test]
fn describe_access_formats_decisions() {
    assert_eq!(describe_access("/admin", &Access::Allow), "/admin: allowed");
    assert_eq!(describe_access("/admin", &Access::Pending), "/admin: pending");
    assert_eq!(
        describe_access("/admin", &Access::Redirect("/".to_owned())),
        "/admin: redirect -> /"
    );
}
