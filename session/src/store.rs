//! Credential persistence policy and the `TokenStore` seam.
//!
//! Tokens live in three cookies (`access_token`, `refresh_token`,
//! `user_role`) with a 30-minute max age. The browser client writes them to
//! `document.cookie`; the CLI keeps an equivalent JSON jar on disk. The cookie
//! string helpers here are shared so both agree on names and attributes;
//! values are percent-encoded by the `cookie` crate.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::time::Duration;

use cookie::{Cookie, SameSite};

use crate::state::TokenPair;
use crate::types::{LoginGrant, Role};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
pub const ROLE_COOKIE: &str = "user_role";

/// Lifetime of every persisted credential.
pub const TOKEN_MAX_AGE: Duration = Duration::from_secs(30 * 60);

/// Failure writing or clearing persisted credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Whatever survived in persistent storage. Any field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub role: Option<Role>,
}

impl StoredCredentials {
    #[must_use]
    pub fn from_grant(grant: &LoginGrant) -> Self {
        Self {
            access_token: Some(grant.access_token.clone()),
            refresh_token: Some(grant.refresh_token.clone()),
            role: Some(grant.role),
        }
    }

    /// Both tokens, or `None` when either is absent or blank.
    #[must_use]
    pub fn token_pair(&self) -> Option<TokenPair> {
        TokenPair::new(self.access_token.clone()?, self.refresh_token.clone()?)
    }
}

/// Persistent credential storage (cookies in the browser, a jar file natively).
pub trait TokenStore {
    /// Read non-expired credentials.
    fn load(&self) -> StoredCredentials;

    /// Persist a fresh login grant for `max_age`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn save(&self, grant: &LoginGrant, max_age: Duration) -> Result<(), StoreError>;

    /// Expire every persisted credential immediately.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Non-persistent store. Credentials vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RefCell<StoredCredentials>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(credentials: StoredCredentials) -> Self {
        Self { inner: RefCell::new(credentials) }
    }

    /// Replace the stored credentials wholesale.
    pub fn set(&self, credentials: StoredCredentials) {
        *self.inner.borrow_mut() = credentials;
    }

    /// Drop a single cookie, as a browser does when it expires.
    pub fn remove(&self, name: &str) {
        let mut inner = self.inner.borrow_mut();
        match name {
            ACCESS_TOKEN_COOKIE => inner.access_token = None,
            REFRESH_TOKEN_COOKIE => inner.refresh_token = None,
            ROLE_COOKIE => inner.role = None,
            _ => {}
        }
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> StoredCredentials {
        self.inner.borrow().clone()
    }

    fn save(&self, grant: &LoginGrant, _max_age: Duration) -> Result<(), StoreError> {
        self.set(StoredCredentials::from_grant(grant));
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.set(StoredCredentials::default());
        Ok(())
    }
}

/// `document.cookie` assignment that stores `name=value` for `max_age`.
#[must_use]
pub fn set_cookie_string(name: &str, value: &str, max_age: Duration) -> String {
    let seconds = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
    credential_cookie(name, value, cookie::time::Duration::seconds(seconds))
        .encoded()
        .to_string()
}

/// `document.cookie` assignment that expires `name` immediately.
#[must_use]
pub fn expire_cookie_string(name: &str) -> String {
    credential_cookie(name, "", cookie::time::Duration::seconds(-1)).to_string()
}

fn credential_cookie<'c>(name: &'c str, value: &'c str, max_age: cookie::time::Duration) -> Cookie<'c> {
    Cookie::build((name, value))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Find `name` in a `Cookie`-style header (`a=1; b=2`) and decode its value.
#[must_use]
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse_encoded(header)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parse the three credential cookies out of a `Cookie`-style header.
#[must_use]
pub fn credentials_from_cookie_header(header: &str) -> StoredCredentials {
    StoredCredentials {
        access_token: read_cookie(header, ACCESS_TOKEN_COOKIE),
        refresh_token: read_cookie(header, REFRESH_TOKEN_COOKIE),
        role: read_cookie(header, ROLE_COOKIE).and_then(|raw| raw.parse().ok()),
    }
}
