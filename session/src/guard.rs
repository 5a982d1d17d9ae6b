//! Async session driver.
//!
//! ARCHITECTURE
//! ============
//! `SessionGuard` is the single owner of [`SessionState`]. It reads persisted
//! credentials through a [`TokenStore`], verifies them through an [`AuthApi`]
//! and redirects through a [`Navigator`]. Observers registered with
//! [`SessionGuard::subscribe`] see every state it publishes.
//!
//! Methods take `&self` and keep the `RefCell` borrows short, so a periodic
//! revalidation may run while a login is awaiting the backend. An epoch
//! counter bumped by `login`/`logout` makes identity checks that started
//! before either one drop their result instead of overwriting newer state.
//! A superseded check still settles the session while it is `Loading`, so a
//! failed login cannot strand the first check.
//!
//! ERROR HANDLING
//! ==============
//! `initialize`/`revalidate`/`logout` never fail: every problem degrades to
//! `Unauthenticated` plus a redirect and a log line. Only `login` and
//! `register` return errors, for the form that triggered them to display.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::api::{ApiError, AuthApi};
use crate::routes::{self, Access};
use crate::state::{SessionState, TokenPair, Transition};
use crate::store::{StoreError, TOKEN_MAX_AGE, TokenStore};
use crate::types::{AccountSummary, Credentials, RegisterForm, User};

/// Period of the background identity check.
pub const REVALIDATE_INTERVAL: Duration = Duration::from_secs(30);

/// Router seam: where are we, and how do we go somewhere else.
pub trait Navigator {
    /// Current path including any query string.
    fn current_path(&self) -> String;
    fn navigate(&self, to: &str);
}

/// Errors surfaced to login and registration callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no stored credentials")]
    MissingCredentials,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("login failed: {0}")]
    Login(ApiError),
    #[error("identity check failed: {0}")]
    Identity(ApiError),
    #[error("registration failed: {0}")]
    Register(ApiError),
}

impl SessionError {
    /// Generic message for a login or registration form. The backend's
    /// reason stays in `Display` for logs.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Register(_) => "Registration failed. Please try again.",
            Self::MissingCredentials | Self::Store(_) | Self::Login(_) | Self::Identity(_) => {
                "Login failed. Please try again."
            }
        }
    }
}

type Observer = Box<dyn Fn(&SessionState)>;

/// Owner of the process-wide session.
pub struct SessionGuard<A, S, N> {
    api: A,
    store: S,
    navigator: N,
    state: RefCell<SessionState>,
    epoch: Cell<u64>,
    observers: RefCell<Vec<Observer>>,
}

impl<A, S, N> SessionGuard<A, S, N>
where
    A: AuthApi,
    S: TokenStore,
    N: Navigator,
{
    #[must_use]
    pub fn new(api: A, store: S, navigator: N) -> Self {
        Self {
            api,
            store,
            navigator,
            state: RefCell::new(SessionState::Loading),
            epoch: Cell::new(0),
            observers: RefCell::new(Vec::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    /// Bearer credential for authenticated resource calls.
    pub fn bearer(&self) -> Option<String> {
        self.state.borrow().tokens().map(|tokens| tokens.refresh().to_owned())
    }

    /// Route decision for `path` against the current state.
    pub fn authorize(&self, path: &str) -> Access {
        routes::authorize(path, &self.state.borrow())
    }

    /// Register an observer. It must not call `subscribe` itself.
    pub fn subscribe(&self, observer: impl Fn(&SessionState) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    /// First identity check from persisted credentials.
    pub async fn initialize(&self) -> Transition {
        tracing::debug!("initializing session from stored credentials");
        self.check_identity().await
    }

    /// Periodic identity check. Detects token expiry during a session.
    pub async fn revalidate(&self) -> Transition {
        tracing::trace!("revalidating session");
        self.check_identity().await
    }

    /// Sign in, persist the grant, load the profile and navigate onward.
    ///
    /// `redirect` is the sanitized destination stored before login. Returns
    /// the path navigated to.
    ///
    /// # Errors
    ///
    /// [`SessionError::Login`] if the backend refuses the credentials,
    /// [`SessionError::Store`] if the grant cannot be persisted and
    /// [`SessionError::Identity`] if the profile cannot be loaded.
    pub async fn login(
        &self,
        credentials: &Credentials,
        redirect: &str,
    ) -> Result<String, SessionError> {
        self.bump_epoch();
        match self.try_login(credentials, redirect).await {
            Ok(destination) => {
                tracing::info!(username = %credentials.username, %destination, "login succeeded");
                self.navigator.navigate(&destination);
                Ok(destination)
            }
            Err(err) => {
                tracing::warn!(username = %credentials.username, error = %err, "login failed");
                Err(err)
            }
        }
    }

    async fn try_login(
        &self,
        credentials: &Credentials,
        redirect: &str,
    ) -> Result<String, SessionError> {
        let grant = self.api.login(credentials).await.map_err(SessionError::Login)?;
        let tokens = TokenPair::new(grant.access_token.clone(), grant.refresh_token.clone())
            .ok_or_else(|| {
                SessionError::Login(ApiError::Decode("login returned an empty token".to_owned()))
            })?;
        self.store.save(&grant, TOKEN_MAX_AGE)?;
        let user = self
            .api
            .current_user(tokens.refresh())
            .await
            .map_err(SessionError::Identity)?;

        self.bump_epoch();
        self.apply(|state| state.authenticate(user, tokens));
        Ok(routes::post_login_destination(redirect, grant.role))
    }

    /// Drop the session, expire persisted credentials and redirect to login.
    pub fn logout(&self) {
        self.bump_epoch();
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "failed to clear stored credentials");
        }
        tracing::info!("logged out");
        self.apply(SessionState::invalidate);
    }

    /// Create an account. The session itself is untouched.
    ///
    /// # Errors
    ///
    /// [`SessionError::Register`] with the backend's reason.
    pub async fn register(&self, form: &RegisterForm) -> Result<AccountSummary, SessionError> {
        let account = self.api.register(form).await.map_err(|err| {
            tracing::warn!(username = %form.username, error = %err, "registration failed");
            SessionError::Register(err)
        })?;
        tracing::info!(username = %account.username, "account registered");
        Ok(account)
    }

    async fn check_identity(&self) -> Transition {
        let epoch = self.epoch.get();
        let outcome = self.verify_stored().await;
        if self.epoch.get() != epoch && !self.is_loading() {
            tracing::debug!("discarding identity check superseded by login/logout");
            return Transition::Unchanged;
        }
        match outcome {
            Ok((user, tokens)) => self.apply(|state| state.authenticate(user, tokens)),
            Err(err) => {
                tracing::warn!(error = %err, "session validation failed");
                self.apply(SessionState::invalidate)
            }
        }
    }

    async fn verify_stored(&self) -> Result<(User, TokenPair), SessionError> {
        let tokens = self
            .store
            .load()
            .token_pair()
            .ok_or(SessionError::MissingCredentials)?;
        let user = self
            .api
            .current_user(tokens.refresh())
            .await
            .map_err(SessionError::Identity)?;
        Ok((user, tokens))
    }

    fn apply(&self, event: impl FnOnce(&mut SessionState) -> Transition) -> Transition {
        let (transition, snapshot) = {
            let mut state = self.state.borrow_mut();
            let transition = event(&mut state);
            (transition, state.clone())
        };
        match transition {
            Transition::SignedIn => {
                let username = snapshot.user().map(|user| user.username.as_str()).unwrap_or_default();
                tracing::info!(%username, "session authenticated");
            }
            Transition::SignedOut => tracing::info!("session unauthenticated"),
            Transition::Unchanged => {}
        }
        self.notify(&snapshot);
        if transition == Transition::SignedOut {
            self.redirect_to_login();
        }
        transition
    }

    fn notify(&self, snapshot: &SessionState) {
        for observer in self.observers.borrow().iter() {
            observer(snapshot);
        }
    }

    fn redirect_to_login(&self) {
        let current = self.navigator.current_path();
        if routes::is_login_route(&current) {
            return;
        }
        let to = routes::login_redirect(&current);
        tracing::info!(from = %current, %to, "redirecting to login");
        self.navigator.navigate(&to);
    }

    fn bump_epoch(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
    }
}
