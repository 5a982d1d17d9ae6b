//! Command implementations behind the `portal-cli` subcommands.
//!
//! Each command that needs an identity runs `initialize` first, exactly as
//! the browser client does on mount, so stale or missing cookies surface as
//! a logged redirect instead of a confusing backend error.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::future::Future;
use std::time::Duration;

use futures_util::future::join_all;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use session::routes::redirect_target;
use session::{Access, AccountSummary, ApiError, Credentials, RegisterForm, SessionState, User};
use tokio::time::{Instant, MissedTickBehavior};

use crate::CliGuard;
use crate::error::CliError;

/// Sign in and report where the session lands.
///
/// # Errors
///
/// Propagates the guard's login error.
pub async fn login(
    guard: &CliGuard,
    credentials: &Credentials,
    redirect: Option<&str>,
) -> Result<String, CliError> {
    let redirect = redirect_target(redirect);
    let destination = guard.login(credentials, &redirect).await?;
    Ok(destination)
}

/// Current user, validated against the backend.
///
/// # Errors
///
/// [`CliError::NotSignedIn`] when the stored session is missing or rejected.
pub async fn whoami(guard: &CliGuard) -> Result<User, CliError> {
    guard.initialize().await;
    guard.user().ok_or(CliError::NotSignedIn)
}

/// # Errors
///
/// Propagates the guard's registration error.
pub async fn register(guard: &CliGuard, form: &RegisterForm) -> Result<AccountSummary, CliError> {
    Ok(guard.register(form).await?)
}

/// Route decision for `path` after validating the stored session.
pub async fn route(guard: &CliGuard, path: &str) -> Access {
    guard.initialize().await;
    guard.authorize(path)
}

/// Validate now, then every `period` until `stop` resolves.
pub async fn watch(guard: &CliGuard, period: Duration, stop: impl Future<Output = ()>) {
    guard.subscribe(|state| println!("{}", describe(state)));
    guard.initialize().await;

    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(stop);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                guard.revalidate().await;
            }
            () = &mut stop => {
                tracing::info!("watch stopped");
                break;
            }
        }
    }
}

/// One authenticated request against an arbitrary resource path.
///
/// # Errors
///
/// [`CliError::NotSignedIn`] without a valid session, otherwise the API error.
pub async fn api_request(
    guard: &CliGuard,
    method: Method,
    path: &str,
    body: Option<&Value>,
) -> Result<Value, CliError> {
    let bearer = signed_in_bearer(guard).await?;
    Ok(guard.api().request(method, path, &bearer, body).await?)
}

/// GET several resources concurrently. Each result is reported on its own;
/// one failure does not stop the others.
///
/// # Errors
///
/// [`CliError::NotSignedIn`] without a valid session.
pub async fn api_fetch(
    guard: &CliGuard,
    paths: &[String],
) -> Result<Vec<(String, Result<Value, ApiError>)>, CliError> {
    let bearer = signed_in_bearer(guard).await?;
    let api = guard.api();
    let requests = paths.iter().map(|path| {
        let bearer = bearer.as_str();
        async move { (path.clone(), api.request(Method::GET, path, bearer, None).await) }
    });
    Ok(join_all(requests).await)
}

async fn signed_in_bearer(guard: &CliGuard) -> Result<String, CliError> {
    guard.initialize().await;
    guard.bearer().ok_or(CliError::NotSignedIn)
}

/// One-line description of a session state.
#[must_use]
pub fn describe(state: &SessionState) -> String {
    match state {
        SessionState::Loading => "session: loading".to_owned(),
        SessionState::Unauthenticated => "session: signed out".to_owned(),
        SessionState::Authenticated { user, .. } => {
            format!("session: signed in as {} ({})", user.username, user.role)
        }
    }
}

/// Human-readable route decision.
#[must_use]
pub fn describe_access(path: &str, access: &Access) -> String {
    match access {
        Access::Pending => format!("{path}: pending"),
        Access::Allow => format!("{path}: allowed"),
        Access::Redirect(to) => format!("{path}: redirect -> {to}"),
    }
}

/// Pretty-print any serializable value to stdout.
///
/// # Errors
///
/// [`CliError::InvalidJson`] if serialization fails.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
