//! Header showing the signed-in user with a logout action.

use leptos::prelude::*;
use session::Role;
use session::routes::role_home;

use crate::state::auth::AuthState;
use crate::util::auth::GuardHandle;

#[component]
pub fn SessionHeader() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let guard = expect_context::<GuardHandle>();

    let home = move || auth.with(|state| state.role().map_or(session::routes::ROOT, role_home));
    let role_label = move || auth.with(|state| state.role().map(Role::as_str).unwrap_or_default());

    view! {
        <Show when=move || auth.with(AuthState::is_authenticated)>
            <header class="session-header">
                <a class="session-header__home" href=home>"Course Portal"</a>
                <span class="session-header__user">
                    {move || auth.with(AuthState::display_name)}
                    <span class="session-header__role">{role_label}</span>
                </span>
                <button
                    class="session-header__logout"
                    on:click=move |_| guard.with_value(|guard| guard.logout())
                >
                    "Log out"
                </button>
            </header>
        </Show>
    }
}
