//! Backend seam used by the session guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `cli` implements [`AuthApi`] over reqwest, `client` over gloo-net. Both
//! funnel raw responses through [`crate::envelope::decode_response`] so the
//! failures below look the same to the guard.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::types::{AccountSummary, Credentials, LoginGrant, RegisterForm, User};

/// Login endpoint, relative to the API base URL.
pub const LOGIN_PATH: &str = "/auth/login";
/// Registration endpoint, relative to the API base URL.
pub const REGISTER_PATH: &str = "/auth/register";
/// Identity verification endpoint, relative to the API base URL.
pub const IDENTITY_PATH: &str = "/user/info";

/// Failure talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),
    /// Non-2xx response. `message` comes from the envelope when present.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    /// 2xx response whose envelope reported `status: false`.
    #[error("request rejected: {0}")]
    Rejected(String),
    /// The body was not the expected envelope.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for a transient user-facing notification.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Status { message, .. } | Self::Rejected(message) => message,
            Self::Transport(_) => "Could not reach the server.",
            Self::Decode(_) => crate::envelope::FALLBACK_MESSAGE,
        }
    }
}

/// Endpoints the session guard consumes.
///
/// Futures are not required to be `Send`: the guard runs on a single-threaded
/// event loop in both the terminal and the browser.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `POST /auth/login`.
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError>;

    /// `GET /user/info` with `Authorization: Bearer <bearer>`.
    ///
    /// Callers pass the refresh token here; the backend authorizes on it.
    async fn current_user(&self, bearer: &str) -> Result<User, ApiError>;

    /// `POST /auth/register`.
    async fn register(&self, form: &RegisterForm) -> Result<AccountSummary, ApiError>;
}

/// Join an API base URL and an endpoint path with exactly one slash.
#[must_use]
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `Authorization` header value for a bearer token.
#[must_use]
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}
