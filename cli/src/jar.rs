//! On-disk cookie jar standing in for browser cookies.
//!
//! DESIGN
//! ======
//! The jar mirrors the browser client's three cookies, each with an absolute
//! expiry in Unix seconds. Expired entries are ignored on load, so a token
//! left on disk past its 30-minute max age behaves like an expired cookie.
//! A missing or unreadable file is an empty jar.

#[cfg(test)]
#[path = "jar_test.rs"]
mod jar_test;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use session::store::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, ROLE_COOKIE};
use session::{LoginGrant, StoreError, StoredCredentials, TokenStore};

const CREDENTIAL_COOKIES: [&str; 3] = [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, ROLE_COOKIE];

#[derive(Debug, Default, Serialize, Deserialize)]
struct JarFile {
    cookies: Vec<JarCookie>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JarCookie {
    name: String,
    value: String,
    /// Unix seconds.
    expires_at: u64,
}

/// JSON-file backed [`TokenStore`].
#[derive(Debug, Clone)]
pub struct CookieJar {
    path: PathBuf,
}

impl CookieJar {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> JarFile {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return JarFile::default(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "cookie jar unreadable");
                return JarFile::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "cookie jar corrupt; ignoring");
            JarFile::default()
        })
    }

    fn write(&self, jar: &JarFile) -> Result<(), StoreError> {
        let unavailable = |err: &dyn std::fmt::Display| {
            StoreError::Unavailable(format!("{}: {err}", self.path.display()))
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| unavailable(&e))?;
        }
        let rendered = serde_json::to_string_pretty(jar).map_err(|e| unavailable(&e))?;
        fs::write(&self.path, rendered).map_err(|e| unavailable(&e))?;
        restrict_permissions(&self.path);
        Ok(())
    }

    fn without_credentials(&self) -> JarFile {
        let mut jar = self.read();
        jar.cookies.retain(|cookie| !CREDENTIAL_COOKIES.contains(&cookie.name.as_str()));
        jar
    }
}

impl TokenStore for CookieJar {
    fn load(&self) -> StoredCredentials {
        let now = now_secs();
        let jar = self.read();
        let live = |name: &str| {
            jar.cookies
                .iter()
                .find(|cookie| cookie.name == name && cookie.expires_at > now)
                .map(|cookie| cookie.value.clone())
                .filter(|value| !value.is_empty())
        };
        StoredCredentials {
            access_token: live(ACCESS_TOKEN_COOKIE),
            refresh_token: live(REFRESH_TOKEN_COOKIE),
            role: live(ROLE_COOKIE).and_then(|raw| raw.parse().ok()),
        }
    }

    fn save(&self, grant: &LoginGrant, max_age: Duration) -> Result<(), StoreError> {
        let expires_at = now_secs().saturating_add(max_age.as_secs());
        let mut jar = self.without_credentials();
        for (name, value) in [
            (ACCESS_TOKEN_COOKIE, grant.access_token.as_str()),
            (REFRESH_TOKEN_COOKIE, grant.refresh_token.as_str()),
            (ROLE_COOKIE, grant.role.as_str()),
        ] {
            jar.cookies.push(JarCookie { name: name.to_owned(), value: value.to_owned(), expires_at });
        }
        self.write(&jar)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let jar = self.without_credentials();
        self.write(&jar)
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(err) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::debug!(path = %path.display(), error = %err, "could not restrict cookie jar permissions");
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
