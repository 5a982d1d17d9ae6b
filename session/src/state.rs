//! Session state machine.
//!
//! DESIGN
//! ======
//! `Loading` holds until the first identity check finishes. Only
//! `Authenticated` carries a user and tokens, so "authenticated implies both
//! tokens and a user" holds by construction. Transitions report whether the
//! phase actually changed; callers fire redirects only on a change, which keeps
//! a streak of failed checks down to one redirect.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::fmt;

use crate::types::{Role, User};

/// Access and refresh token held in memory while authenticated.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    access: String,
    refresh: String,
}

impl TokenPair {
    /// Returns `None` unless both tokens are non-empty.
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Option<Self> {
        let access = access.into();
        let refresh = refresh.into();
        if access.trim().is_empty() || refresh.trim().is_empty() {
            return None;
        }
        Some(Self { access, refresh })
    }

    #[must_use]
    pub fn access(&self) -> &str {
        &self.access
    }

    /// Bearer credential for authenticated backend calls.
    #[must_use]
    pub fn refresh(&self) -> &str {
        &self.refresh
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenPair(<redacted>)")
    }
}

/// Process-wide authentication state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    /// First identity check still in flight.
    #[default]
    Loading,
    Authenticated {
        user: User,
        tokens: TokenPair,
    },
    Unauthenticated,
}

/// Outcome of applying an event to a [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The phase did not change. User details may still have been refreshed.
    Unchanged,
    SignedIn,
    SignedOut,
}

impl SessionState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user().map(|user| user.role)
    }

    #[must_use]
    pub fn tokens(&self) -> Option<&TokenPair> {
        match self {
            Self::Authenticated { tokens, .. } => Some(tokens),
            _ => None,
        }
    }

    /// Record a successful identity check.
    pub fn authenticate(&mut self, user: User, tokens: TokenPair) -> Transition {
        let was_authenticated = self.is_authenticated();
        *self = Self::Authenticated { user, tokens };
        if was_authenticated { Transition::Unchanged } else { Transition::SignedIn }
    }

    /// Record a failed identity check or an explicit logout.
    pub fn invalidate(&mut self) -> Transition {
        if matches!(self, Self::Unauthenticated) {
            return Transition::Unchanged;
        }
        *self = Self::Unauthenticated;
        Transition::SignedOut
    }
}
