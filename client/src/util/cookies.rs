//! `document.cookie` credential store.
//!
//! DESIGN
//! ======
//! The three credential cookies are plain (non-HttpOnly) cookies so the
//! guard can read them back after a reload. Formatting and parsing live in
//! `session::store`; this module only moves strings in and out of
//! `document.cookie`. Native builds see an empty, read-only jar.

#[cfg(all(test, not(feature = "csr")))]
#[path = "cookies_test.rs"]
mod cookies_test;

use std::time::Duration;

use session::store::{
    ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, ROLE_COOKIE, credentials_from_cookie_header,
    expire_cookie_string, set_cookie_string,
};
use session::{LoginGrant, StoreError, StoredCredentials, TokenStore};

/// Browser cookie [`TokenStore`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieStore;

impl TokenStore for CookieStore {
    fn load(&self) -> StoredCredentials {
        read_document_cookie().map_or_else(StoredCredentials::default, |raw| {
            credentials_from_cookie_header(&raw)
        })
    }

    fn save(&self, grant: &LoginGrant, max_age: Duration) -> Result<(), StoreError> {
        write_cookie(&set_cookie_string(ACCESS_TOKEN_COOKIE, &grant.access_token, max_age))?;
        write_cookie(&set_cookie_string(REFRESH_TOKEN_COOKIE, &grant.refresh_token, max_age))?;
        write_cookie(&set_cookie_string(ROLE_COOKIE, grant.role.as_str(), max_age))
    }

    fn clear(&self) -> Result<(), StoreError> {
        for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, ROLE_COOKIE] {
            write_cookie(&expire_cookie_string(name))?;
        }
        Ok(())
    }
}

#[cfg(feature = "csr")]
fn html_document() -> Result<web_sys::HtmlDocument, StoreError> {
    use wasm_bindgen::JsCast;

    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or_else(|| StoreError::Unavailable("document is not available".to_owned()))
}

#[cfg(feature = "csr")]
fn read_document_cookie() -> Option<String> {
    html_document().ok()?.cookie().ok()
}

#[cfg(feature = "csr")]
fn write_cookie(assignment: &str) -> Result<(), StoreError> {
    html_document()?
        .set_cookie(assignment)
        .map_err(|_| StoreError::Unavailable("cookie write rejected".to_owned()))
}

#[cfg(not(feature = "csr"))]
fn read_document_cookie() -> Option<String> {
    None
}

#[cfg(not(feature = "csr"))]
fn write_cookie(assignment: &str) -> Result<(), StoreError> {
    let _ = assignment;
    Err(StoreError::Unavailable("cookies require a browser".to_owned()))
}
