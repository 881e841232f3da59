//! Registration page.

use std::time::Duration;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::auth::{self, RegisterForm};
use crate::net::request::Client;
use crate::ui::message;
use crate::util::rate_limit;

/// Registration page — account fields with a debounced password-match hint.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let client = expect_context::<Client>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let mismatch = RwSignal::new(false);
    let pending = RwSignal::new(false);

    // The hint waits for a typing pause instead of flickering per keystroke.
    let mismatch_check = rate_limit::debounce(Duration::from_millis(300), move |(): ()| {
        let confirmed = confirm.get_untracked();
        mismatch.set(!confirmed.is_empty() && confirmed != password.get_untracked());
    });
    let recheck = mismatch_check.clone();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        if pending.get_untracked() {
            return;
        }
        if username.get_untracked().trim().is_empty() || password.get_untracked().is_empty() {
            message::warning(
                "Username and password are required",
                message::Overrides::default(),
            );
            return;
        }
        if password.get_untracked() != confirm.get_untracked() {
            message::warning("Passwords do not match", message::Overrides::default());
            return;
        }

        pending.set(true);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let email = email.get_untracked();
            let phone = phone.get_untracked();
            let form = RegisterForm {
                username: username.get_untracked(),
                password: password.get_untracked(),
                phone: (!phone.trim().is_empty()).then_some(phone),
                email: (!email.trim().is_empty()).then_some(email),
            };

            match auth::register(&client, &form).await {
                Ok(Some(_)) => {
                    message::success("Account created", message::Overrides::default());
                    navigate("/login", NavigateOptions::default());
                }
                Ok(None) => {
                    // Rejection already surfaced by the pipeline.
                }
                Err(err) => {
                    leptos::logging::warn!("register request failed: {err}");
                    message::error("Registration failed, try again", message::Overrides::default());
                }
            }
            pending.set(false);
        });
    };

    view! {
        <div class="register-page">
            <h1>"Create account"</h1>
            <form class="register-page__form" on:submit=on_submit>
                <input
                    class="input"
                    type="text"
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    class="input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| {
                        password.set(event_target_value(&ev));
                        mismatch_check.call(());
                    }
                />
                <input
                    class="input"
                    type="password"
                    placeholder="Confirm password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| {
                        confirm.set(event_target_value(&ev));
                        recheck.call(());
                    }
                />
                {move || {
                    mismatch
                        .get()
                        .then(|| {
                            view! {
                                <p class="register-page__mismatch">"Passwords do not match"</p>
                            }
                        })
                }}
                <input
                    class="input"
                    type="email"
                    placeholder="Email (optional)"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="input"
                    type="tel"
                    placeholder="Phone (optional)"
                    prop:value=move || phone.get()
                    on:input=move |ev| phone.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Creating..." } else { "Create account" }}
                </button>
                <p class="register-page__hint">
                    <a href="/login">"Back to sign in"</a>
                </p>
            </form>
        </div>
    }
}
