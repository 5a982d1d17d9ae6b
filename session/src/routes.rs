//! Route authorization and redirect helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both front ends call [`authorize`] whenever the session state or the
//! current path changes, and apply the returned redirect through their own
//! router. The rules are pure so they can be tested without a runtime.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::state::SessionState;
use crate::types::Role;

pub const ROOT: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";
pub const ADMIN_HOME: &str = "/admin";
pub const LECTURER_HOME: &str = "/lecturer";
pub const USER_HOME: &str = "/home";
/// Query parameter carrying the pre-login destination.
pub const REDIRECT_PARAM: &str = "redirect";

/// Decision for a navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    /// The first identity check has not finished; render nothing yet.
    Pending,
    Allow,
    Redirect(String),
}

/// Decide whether `path` may be shown for the given session.
#[must_use]
pub fn authorize(path: &str, state: &SessionState) -> Access {
    let pathname = pathname(path);
    match state {
        SessionState::Loading => Access::Pending,
        SessionState::Unauthenticated => {
            if is_login_route(pathname) {
                Access::Allow
            } else {
                Access::Redirect(login_redirect(path))
            }
        }
        SessionState::Authenticated { user, .. } => {
            if is_login_route(pathname) {
                return Access::Redirect(ROOT.to_owned());
            }
            if is_under(pathname, ADMIN_HOME) && user.role != Role::Admin {
                return Access::Redirect(ROOT.to_owned());
            }
            if is_under(pathname, LECTURER_HOME) && user.role != Role::Lecturer {
                return Access::Redirect(ROOT.to_owned());
            }
            Access::Allow
        }
    }
}

/// Login URL that returns the user to `current` after signing in.
#[must_use]
pub fn login_redirect(current: &str) -> String {
    let current = if current.is_empty() { ROOT } else { current };
    format!("{LOGIN_ROUTE}?{REDIRECT_PARAM}={}", urlencoding::encode(current))
}

/// Where to go once login succeeds.
///
/// A stored redirect of `/` means "no particular destination", so the role
/// picks the home page. Anything else is honored as-is.
#[must_use]
pub fn post_login_destination(redirect: &str, role: Role) -> String {
    if redirect == ROOT {
        match role {
            Role::Admin => ADMIN_HOME.to_owned(),
            Role::Lecturer | Role::User => USER_HOME.to_owned(),
        }
    } else {
        redirect.to_owned()
    }
}

/// Landing page for each role, used by the root route of the browser client.
#[must_use]
pub fn role_home(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_HOME,
        Role::Lecturer => LECTURER_HOME,
        Role::User => USER_HOME,
    }
}

/// Normalize a decoded `redirect` query value.
///
/// Only same-origin absolute paths survive; everything else becomes `/`.
#[must_use]
pub fn redirect_target(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return ROOT.to_owned();
    };
    let same_origin =
        raw.starts_with('/') && !raw.starts_with("//") && !raw.starts_with("/\\");
    if same_origin { raw.to_owned() } else { ROOT.to_owned() }
}

/// Path without query string or fragment.
#[must_use]
pub fn pathname(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

#[must_use]
pub fn is_login_route(path: &str) -> bool {
    let path = pathname(path);
    path == LOGIN_ROUTE || path == "/login/"
}

/// True for `prefix` itself and anything below it, segment-wise.
fn is_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
