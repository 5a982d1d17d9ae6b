//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_navigate,
};

use crate::components::protected_route::ProtectedRoute;
use crate::components::session_header::SessionHeader;
use crate::pages::home::{AdminHome, LecturerHome, RootRedirect, UserHome};
use crate::pages::login::LoginPage;
use crate::state::auth::AuthState;
use crate::util::auth::{
    SignalNavigator, create_guard, install_navigation_bridge, start_session,
};

/// Root application component.
///
/// Creates the session guard, provides it and the auth state as context,
/// starts the identity check and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let navigator = SignalNavigator::from_window();
    let guard = create_guard(auth, navigator);

    provide_context(auth);
    provide_context(navigator);
    provide_context(guard);

    start_session(guard);

    view! {
        <Title text="Course Portal"/>

        <Router>
            <NavigationBridge/>
            <SessionHeader/>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=|| view! { <ProtectedRoute><LoginPage/></ProtectedRoute> }/>
                    <Route path=StaticSegment("") view=|| view! { <ProtectedRoute><RootRedirect/></ProtectedRoute> }/>
                    <Route path=StaticSegment("home") view=|| view! { <ProtectedRoute><UserHome/></ProtectedRoute> }/>
                    <Route path=StaticSegment("admin") view=|| view! { <ProtectedRoute><AdminHome/></ProtectedRoute> }/>
                    <Route path=StaticSegment("lecturer") view=|| view! { <ProtectedRoute><LecturerHome/></ProtectedRoute> }/>
                </Routes>
            </main>
        </Router>
    }
}

/// Connects the guard's navigator to the router. Renders nothing.
#[component]
fn NavigationBridge() -> impl IntoView {
    let navigator = expect_context::<SignalNavigator>();
    install_navigation_bridge(navigator, use_navigate());
}
