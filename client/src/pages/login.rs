//! Login page with an inline registration form.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/login` is the only route open to signed-out visitors. The `redirect`
//! query parameter set by the route guard is sanitized here and handed to
//! `SessionGuard::login`, which navigates onward once the profile loads.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use session::routes::{REDIRECT_PARAM, redirect_target};
use session::{Credentials, RegisterForm};

use crate::util::auth::GuardHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    SignIn,
    Register,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let guard = expect_context::<GuardHandle>();
    let query = use_query_map();

    let mode = RwSignal::new(Mode::SignIn);
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let birth_year = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_login = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&username.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let redirect = query.with(|q| redirect_target(q.get(REDIRECT_PARAM).as_deref()));
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let guard = guard.get_value();
            leptos::task::spawn_local(async move {
                match guard.login(&credentials, &redirect).await {
                    Ok(_) => {
                        password.set(String::new());
                        info.set(String::new());
                    }
                    Err(err) => info.set(err.user_message().to_owned()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (guard, credentials, redirect);
    };

    let on_register = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = match validate_register_input(
            &username.get(),
            &email.get(),
            &password.get(),
            &full_name.get(),
            &birth_year.get(),
        ) {
            Ok(form) => form,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "csr")]
        {
            let guard = guard.get_value();
            leptos::task::spawn_local(async move {
                match guard.register(&form).await {
                    Ok(account) => {
                        username.set(account.username);
                        password.set(String::new());
                        mode.set(Mode::SignIn);
                        info.set("Account created. You can sign in now.".to_owned());
                    }
                    Err(err) => info.set(err.user_message().to_owned()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (guard, form);
    };

    let toggle_mode = move |_| {
        info.set(String::new());
        mode.update(|m| {
            *m = match *m {
                Mode::SignIn => Mode::Register,
                Mode::Register => Mode::SignIn,
            };
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Course Portal"</h1>
                <Show
                    when=move || mode.get() == Mode::Register
                    fallback=move || {
                        view! {
                            <p class="login-card__subtitle">"Sign in"</p>
                            <form class="login-form" on:submit=on_login>
                                <input
                                    class="login-input"
                                    type="text"
                                    placeholder="Username"
                                    autocomplete="username"
                                    prop:value=move || username.get()
                                    on:input=move |ev| username.set(event_target_value(&ev))
                                />
                                <input
                                    class="login-input"
                                    type="password"
                                    placeholder="Password"
                                    autocomplete="current-password"
                                    prop:value=move || password.get()
                                    on:input=move |ev| password.set(event_target_value(&ev))
                                />
                                <button class="login-button" type="submit" disabled=move || busy.get()>
                                    "Sign In"
                                </button>
                            </form>
                        }
                    }
                >
                    <p class="login-card__subtitle">"Create an account"</p>
                    <form class="login-form" on:submit=on_register>
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="email"
                            placeholder="you@example.edu"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Password"
                            autocomplete="new-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Full name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="number"
                            placeholder="Birth year"
                            prop:value=move || birth_year.get()
                            on:input=move |ev| birth_year.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Register"
                        </button>
                    </form>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <button class="login-link" type="button" on:click=toggle_mode>
                    {move || match mode.get() {
                        Mode::SignIn => "Need an account? Register",
                        Mode::Register => "Already registered? Sign in",
                    }}
                </button>
            </div>
        </div>
    }
}

/// Trim the username and require both fields. The password is sent as typed.
fn validate_login_input(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok(Credentials::new(username, password))
}

fn validate_register_input(
    username: &str,
    email: &str,
    password: &str,
    full_name: &str,
    birth_year: &str,
) -> Result<RegisterForm, &'static str> {
    let username = username.trim();
    let email = email.trim();
    let full_name = full_name.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() || full_name.is_empty() {
        return Err("Fill in every field.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    let birth_year = birth_year
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|year| (1900..=2100).contains(year))
        .ok_or("Enter a valid birth year.")?;
    Ok(RegisterForm {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        full_name: full_name.to_owned(),
        birth_year,
    })
}
