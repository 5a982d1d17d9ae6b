//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session guard owns the authoritative state and publishes every change
//! into an `RwSignal<AuthState>` so route guards and user-aware components
//! re-render without touching the guard directly.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::{Role, SessionState, User};

/// Reactive snapshot of the guard's [`SessionState`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: SessionState,
}

impl AuthState {
    pub fn loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    /// Name shown in the header: full name, falling back to the username.
    pub fn display_name(&self) -> String {
        self.user()
            .map(|user| {
                let name = user.full_name.trim();
                if name.is_empty() { user.username.clone() } else { name.to_owned() }
            })
            .unwrap_or_default()
    }
}

impl From<&SessionState> for AuthState {
    fn from(session: &SessionState) -> Self {
        Self { session: session.clone() }
    }
}
