//! Wiring between the session guard and the Leptos runtime.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard is created once in `App` and shared through context as a
//! [`GuardHandle`]. It navigates through [`SignalNavigator`], which only
//! records the request; [`install_navigation_bridge`] runs inside the
//! `<Router>` and turns those requests into router navigations while feeding
//! the router's location back to the guard.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::{Navigator, SessionGuard};

use crate::net::api::BrowserAuthApi;
use crate::state::auth::AuthState;
use crate::util::cookies::CookieStore;

/// The browser's session guard.
pub type PortalGuard = SessionGuard<BrowserAuthApi, CookieStore, SignalNavigator>;

/// Context handle for the guard. The guard is `!Send`, so it lives in local
/// storage and is only reachable from the UI thread.
pub type GuardHandle = StoredValue<Rc<PortalGuard>, LocalStorage>;

/// [`Navigator`] backed by signals instead of the router itself, which is
/// only reachable from components rendered inside `<Router>`.
#[derive(Clone, Copy, Debug)]
pub struct SignalNavigator {
    location: RwSignal<String>,
    pending: RwSignal<Option<String>>,
}

impl SignalNavigator {
    pub fn new(initial: &str) -> Self {
        Self {
            location: RwSignal::new(initial.to_owned()),
            pending: RwSignal::new(None),
        }
    }

    /// Start from the address bar when running in the browser.
    pub fn from_window() -> Self {
        Self::new(&window_path())
    }

    /// Record where the router currently is.
    pub fn sync_location(&self, path: String) {
        self.location.set(path);
    }

    /// Take the navigation the guard requested, if any.
    pub fn take_pending(&self) -> Option<String> {
        let next = self.pending.get();
        if next.is_some() {
            self.pending.set(None);
        }
        next
    }
}

impl Navigator for SignalNavigator {
    fn current_path(&self) -> String {
        self.location.get_untracked()
    }

    fn navigate(&self, to: &str) {
        self.location.set(to.to_owned());
        self.pending.set(Some(to.to_owned()));
    }
}

/// Build the guard and publish its state into `auth`.
pub fn create_guard(auth: RwSignal<AuthState>, navigator: SignalNavigator) -> GuardHandle {
    let guard = SessionGuard::new(BrowserAuthApi::from_env(), CookieStore, navigator);
    guard.subscribe(move |state| auth.set(AuthState::from(state)));
    StoredValue::new_local(Rc::new(guard))
}

/// Validate the stored session, then keep revalidating for the page's life.
pub fn start_session(guard: GuardHandle) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let guard = guard.get_value();
        guard.initialize().await;
        loop {
            gloo_timers::future::sleep(session::REVALIDATE_INTERVAL).await;
            guard.revalidate().await;
        }
    });
    #[cfg(not(feature = "csr"))]
    let _ = guard;
}

/// Forward router location to `navigator` and guard navigations to the router.
/// Must be called from a component inside `<Router>`.
pub fn install_navigation_bridge<F>(navigator: SignalNavigator, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = leptos_router::hooks::use_location();
    Effect::new(move || {
        navigator.sync_location(join_path_search(&location.pathname.get(), &location.search.get()));
    });
    Effect::new(move || {
        if let Some(to) = navigator.take_pending() {
            navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Path plus query string, tolerant of a `search` with or without its `?`.
pub fn join_path_search(pathname: &str, search: &str) -> String {
    let query = search.trim_start_matches('?');
    if query.is_empty() { pathname.to_owned() } else { format!("{pathname}?{query}") }
}

#[cfg(feature = "csr")]
fn window_path() -> String {
    web_sys::window().map_or_else(
        || session::routes::ROOT.to_owned(),
        |window| {
            let location = window.location();
            join_path_search(
                &location.pathname().unwrap_or_default(),
                &location.search().unwrap_or_default(),
            )
        },
    )
}

#[cfg(not(feature = "csr"))]
fn window_path() -> String {
    session::routes::ROOT.to_owned()
}
