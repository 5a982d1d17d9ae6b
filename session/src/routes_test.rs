use super::*;
use crate::state::TokenPair;
use crate::types::{User, UserId};

fn signed_in(role: Role) -> SessionState {
    SessionState::Authenticated {
        user: User {
            id: UserId::Int(9),
            username: "u".to_owned(),
            email: String::new(),
            full_name: String::new(),
            birth_year: None,
            role,
            created_at: String::new(),
            updated_at: String::new(),
        },
        tokens: TokenPair::new("a", "r").expect("tokens"),
    }
}

// =============================================================================
// authorize
// =============================================================================

#[test]
fn loading_defers_every_decision() {
    assert_eq!(authorize("/admin", &SessionState::Loading), Access::Pending);
    assert_eq!(authorize("/login", &SessionState::Loading), Access::Pending);
}

#[test]
fn unauthenticated_visit_redirects_to_login_with_destination() {
    assert_eq!(
        authorize("/courses", &SessionState::Unauthenticated),
        Access::Redirect("/login?redirect=%2Fcourses".to_owned())
    );
}

#[test]
fn unauthenticated_visit_keeps_query_in_destination() {
    assert_eq!(
        authorize("/tuition?term=2", &SessionState::Unauthenticated),
        Access::Redirect("/login?redirect=%2Ftuition%3Fterm%3D2".to_owned())
    );
}

#[test]
fn unauthenticated_may_view_login() {
    assert_eq!(authorize("/login", &SessionState::Unauthenticated), Access::Allow);
    assert_eq!(
        authorize("/login?redirect=%2Fhome", &SessionState::Unauthenticated),
        Access::Allow
    );
}

#[test]
fn authenticated_login_visit_redirects_to_root() {
    assert_eq!(authorize("/login", &signed_in(Role::User)), Access::Redirect("/".to_owned()));
}

#[test]
fn admin_area_requires_admin_role() {
    assert_eq!(
        authorize("/admin/courses", &signed_in(Role::User)),
        Access::Redirect("/".to_owned())
    );
    assert_eq!(authorize("/admin", &signed_in(Role::Lecturer)), Access::Redirect("/".to_owned()));
    assert_eq!(authorize("/admin/courses", &signed_in(Role::Admin)), Access::Allow);
}

#[test]
fn lecturer_area_requires_lecturer_role() {
    assert_eq!(
        authorize("/lecturer/subjects", &signed_in(Role::Admin)),
        Access::Redirect("/".to_owned())
    );
    assert_eq!(authorize("/lecturer/subjects", &signed_in(Role::Lecturer)), Access::Allow);
}

#[test]
fn prefix_match_is_segment_aware() {
    assert_eq!(authorize("/administration", &signed_in(Role::User)), Access::Allow);
    assert_eq!(authorize("/lecturers", &signed_in(Role::User)), Access::Allow);
}

#[test]
fn ordinary_pages_allowed_for_any_role() {
    for role in [Role::Admin, Role::Lecturer, Role::User] {
        assert_eq!(authorize("/home", &signed_in(role)), Access::Allow);
    }
}

// =============================================================================
// post_login_destination
// =============================================================================

#[test]
fn root_redirect_routes_admin_to_admin_home() {
    assert_eq!(post_login_destination("/", Role::Admin), ADMIN_HOME);
}

#[test]
fn root_redirect_routes_other_roles_to_user_home() {
    assert_eq!(post_login_destination("/", Role::User), USER_HOME);
    assert_eq!(post_login_destination("/", Role::Lecturer), USER_HOME);
}

#[test]
fn explicit_redirect_is_honored_for_every_role() {
    for role in [Role::Admin, Role::Lecturer, Role::User] {
        assert_eq!(post_login_destination("/courses/42", role), "/courses/42");
    }
}

// =============================================================================
// redirect helpers
// =============================================================================

#[test]
fn login_redirect_encodes_current_path() {
    assert_eq!(login_redirect("/admin/users"), "/login?redirect=%2Fadmin%2Fusers");
    assert_eq!(login_redirect(""), "/login?redirect=%2F");
}

#[test]
fn redirect_target_defaults_to_root() {
    assert_eq!(redirect_target(None), "/");
    assert_eq!(redirect_target(Some("  ")), "/");
}

#[test]
fn redirect_target_rejects_other_origins() {
    assert_eq!(redirect_target(Some("https://evil.example")), "/");
    assert_eq!(redirect_target(Some("//evil.example")), "/");
    assert_eq!(redirect_target(Some("/\\evil.example")), "/");
    assert_eq!(redirect_target(Some("/tuition")), "/tuition");
}

#[test]
fn role_home_per_role() {
    assert_eq!(role_home(Role::Admin), "/admin");
    assert_eq!(role_home(Role::Lecturer), "/lecturer");
    assert_eq!(role_home(Role::User), "/home");
}

#[test]
fn pathname_strips_query_and_fragment() {
    assert_eq!(pathname("/a/b?x=1#top"), "/a/b");
    assert_eq!(pathname("/a#frag"), "/a");
    assert!(is_login_route("/login?redirect=%2F"));
    assert!(!is_login_route("/loginx"));
}
