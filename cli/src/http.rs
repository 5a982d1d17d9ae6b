//! reqwest adapter for the portal REST API.
//!
//! Every response goes through `session::envelope::decode_response`, so
//! transport errors, non-2xx statuses and `status: false` envelopes map onto
//! the same `ApiError` variants the browser client produces.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use session::api::{IDENTITY_PATH, LOGIN_PATH, REGISTER_PATH, bearer_header, endpoint_url};
use session::envelope::decode_response;
use session::{AccountSummary, ApiError, AuthApi, Credentials, LoginGrant, RegisterForm, User};

use crate::error::CliError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Backend client rooted at the API base URL (e.g. `http://host/api`).
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// # Errors
    ///
    /// [`CliError::InvalidBaseUrl`] unless the URL is `http(s)://`, or
    /// [`CliError::Http`] if the TLS client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, CliError> {
        let base_url = validate_base_url(base_url)?;
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticated call to an arbitrary resource path. Returns envelope `data`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] produced by the request or the envelope.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        bearer: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = endpoint_url(&self.base_url, path);
        tracing::debug!(%method, %url, "api request");
        let request = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, bearer_header(bearer));
        let request = match body {
            Some(json) => request.json(json),
            None => request,
        };
        send(request).await
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        let url = endpoint_url(&self.base_url, LOGIN_PATH);
        send(self.client.post(url).json(credentials)).await
    }

    async fn current_user(&self, bearer: &str) -> Result<User, ApiError> {
        let url = endpoint_url(&self.base_url, IDENTITY_PATH);
        send(self.client.get(url).header(AUTHORIZATION, bearer_header(bearer))).await
    }

    async fn register(&self, form: &RegisterForm) -> Result<AccountSummary, ApiError> {
        let url = endpoint_url(&self.base_url, REGISTER_PATH);
        send(self.client.post(url).json(form)).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    decode_response(status, &body)
}

fn validate_base_url(base_url: &str) -> Result<String, CliError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if has_host {
        Ok(trimmed.to_owned())
    } else {
        Err(CliError::InvalidBaseUrl(base_url.to_owned()))
    }
}
