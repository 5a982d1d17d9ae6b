//! Route wrapper enforcing the session guard's access rules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route renders through `ProtectedRoute`. It re-evaluates
//! `session::authorize` whenever the location or auth state changes, shows a
//! placeholder while the first identity check runs, and replaces the history
//! entry on redirect so Back does not bounce through a forbidden page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::{Access, authorize};

use crate::state::auth::AuthState;
use crate::util::auth::join_path_search;

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let navigate = use_navigate();

    let access = Memo::new(move |_| {
        let path = join_path_search(&location.pathname.get(), &location.search.get());
        auth.with(|state| authorize(&path, &state.session))
    });

    Effect::new(move || {
        if let Access::Redirect(to) = access.get() {
            navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <Show
            when=move || access.get() == Access::Allow
            fallback=|| view! { <div class="route-pending">"Loading..."</div> }
        >
            {children()}
        </Show>
    }
}
