//! Role landing pages and the root forwarder.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/` has no content of its own: once the session is known it forwards to
//! the landing page for the user's role. `/admin` and `/lecturer` are
//! role-restricted by the route guard; `/home` is open to every signed-in
//! user.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::Role;
use session::routes::role_home;

use crate::state::auth::AuthState;

/// Forward `/` to the role's landing page.
#[component]
pub fn RootRedirect() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(role) = auth.with(AuthState::role) {
            navigate(role_home(role), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! { <div class="route-pending">"Loading..."</div> }
}

#[component]
pub fn UserHome() -> impl IntoView {
    view! {
        <LandingCard title="My courses">
            <p>"Browse your enrolled courses, schedules and tuition."</p>
        </LandingCard>
    }
}

#[component]
pub fn AdminHome() -> impl IntoView {
    view! {
        <LandingCard title="Administration">
            <p>"Manage departments, courses, lecturers and user accounts."</p>
        </LandingCard>
    }
}

#[component]
pub fn LecturerHome() -> impl IntoView {
    view! {
        <LandingCard title="Teaching">
            <p>"Review your course sections and enrolled students."</p>
        </LandingCard>
    }
}

#[component]
fn LandingCard(title: &'static str, children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let greeting = move || {
        auth.with(|state| {
            let role = state.role().map_or("", Role::as_str);
            format!("Welcome, {} ({role})", state.display_name())
        })
    };

    view! {
        <section class="landing">
            <h1>{title}</h1>
            <p class="landing__greeting">{greeting}</p>
            {children()}
        </section>
    }
}
