//! The `{ data, message, status }` wrapper around every backend response.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Shown when a failed response carries no usable message.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Uniform response envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_status")]
    pub status: bool,
}

fn default_status() -> bool {
    true
}

impl<T> Envelope<T> {
    /// Unwrap the payload of a successful envelope.
    ///
    /// # Errors
    ///
    /// [`ApiError::Rejected`] when `status` is false, [`ApiError::Decode`]
    /// when `data` is missing.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.status {
            return Err(ApiError::Rejected(non_empty_or_fallback(self.message)));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("response envelope carried no data".to_owned()))
    }
}

/// Decode an HTTP response body into the envelope payload.
///
/// # Errors
///
/// [`ApiError::Status`] for non-2xx statuses, otherwise the errors of
/// [`Envelope::into_data`] or [`ApiError::Decode`] for malformed JSON.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status, message: error_message(body) });
    }
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    envelope.into_data()
}

/// Pull `message` out of an error body, or fall back to a generic one.
#[must_use]
pub fn error_message(body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_default();
    non_empty_or_fallback(message)
}

fn non_empty_or_fallback(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_MESSAGE.to_owned()
    } else {
        message
    }
}
