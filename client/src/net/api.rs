//! REST adapter between the session guard and the backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning [`ApiError::Transport`], since these
//! endpoints are only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every response body goes through `session::envelope::decode_response`, so
//! backend messages reach the login form exactly as the CLI reports them.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::api::{IDENTITY_PATH, LOGIN_PATH, REGISTER_PATH, endpoint_url};
use session::{AccountSummary, ApiError, AuthApi, Credentials, LoginGrant, RegisterForm, User};

/// API base used when `PORTAL_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "/api";

/// `gloo-net` backed [`AuthApi`].
#[derive(Clone, Debug)]
pub struct BrowserAuthApi {
    base_url: String,
}

impl BrowserAuthApi {
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() { DEFAULT_API_URL } else { trimmed };
        Self { base_url: base_url.to_owned() }
    }

    /// Base URL baked in at build time through `PORTAL_API_URL`.
    pub fn from_env() -> Self {
        Self::new(option_env!("PORTAL_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }
}

impl AuthApi for BrowserAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        let url = self.url(LOGIN_PATH);
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::post(&url).json(credentials).map_err(transport)?;
            send(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, credentials);
            Err(unavailable())
        }
    }

    async fn current_user(&self, bearer: &str) -> Result<User, ApiError> {
        let url = self.url(IDENTITY_PATH);
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::get(&url)
                .header("Authorization", &session::api::bearer_header(bearer))
                .build()
                .map_err(transport)?;
            send(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, bearer);
            Err(unavailable())
        }
    }

    async fn register(&self, form: &RegisterForm) -> Result<AccountSummary, ApiError> {
        let url = self.url(REGISTER_PATH);
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::post(&url).json(form).map_err(transport)?;
            send(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, form);
            Err(unavailable())
        }
    }
}

#[cfg(feature = "csr")]
async fn send<T: serde::de::DeserializeOwned>(
    request: gloo_net::http::Request,
) -> Result<T, ApiError> {
    let response = request.send().await.map_err(transport)?;
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    session::envelope::decode_response(status, &body)
}

#[cfg(feature = "csr")]
fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> ApiError {
    ApiError::Transport("not available outside the browser".to_owned())
}
