//! Login page: credentials plus a captcha challenge.

use std::time::Duration;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::auth::{self, LoginForm};
use crate::net::request::Client;
use crate::state::session::SessionStore;
use crate::ui::message;
use crate::util::rate_limit;

/// Login page — username, password, and a single-use captcha. Submits are
/// throttled so a double click cannot fire two login requests.
#[component]
pub fn LoginPage() -> impl IntoView {
    let client = expect_context::<Client>();
    let session = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let captcha = RwSignal::new(String::new());
    let captcha_key = RwSignal::new(String::new());
    let captcha_url = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let refresh_captcha = move || {
        leptos::task::spawn_local(async move {
            match auth::get_captcha(&client).await {
                Ok(Some(challenge)) => {
                    captcha_key.set(challenge.key);
                    set_captcha_image(captcha_url, &challenge.image);
                }
                Ok(None) => {}
                Err(err) => leptos::logging::warn!("captcha fetch failed: {err}"),
            }
        });
    };

    // Initial challenge; clicking the image fetches a fresh one.
    Effect::new(move || refresh_captcha());

    let do_login = move |()| {
        if pending.get_untracked() {
            return;
        }
        pending.set(true);

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let form = LoginForm {
                username: username.get_untracked(),
                password: password.get_untracked(),
                captcha: captcha.get_untracked(),
                captcha_key: captcha_key.get_untracked(),
            };

            match auth::login(&client, &form).await {
                Ok(Some(profile)) => {
                    if let Some(token) = profile.get("token") {
                        session.set_token(token.clone());
                    }
                    session.set_user(profile);
                    message::success("Signed in", message::Overrides::default());
                    navigate("/", NavigateOptions::default());
                }
                Ok(None) => {
                    // Rejection already surfaced; the captcha key is spent.
                    refresh_captcha();
                }
                Err(err) => {
                    leptos::logging::warn!("login request failed: {err}");
                    message::error("Login failed, try again", message::Overrides::default());
                    refresh_captcha();
                }
            }
            pending.set(false);
        });
    };

    let submit = rate_limit::throttle(Duration::from_millis(800), do_login);
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submit.call(());
    };

    view! {
        <div class="login-page">
            <h1>"Blog"</h1>
            <form class="login-page__form" on:submit=on_submit>
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
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <div class="login-page__captcha">
                    <input
                        class="input"
                        type="text"
                        placeholder="Captcha"
                        prop:value=move || captcha.get()
                        on:input=move |ev| captcha.set(event_target_value(&ev))
                    />
                    {move || {
                        captcha_url
                            .get()
                            .map(|url| {
                                view! {
                                    <img
                                        class="login-page__captcha-image"
                                        src=url
                                        alt="captcha"
                                        title="Click for a new challenge"
                                        on:click=move |_| refresh_captcha()
                                    />
                                }
                            })
                    }}
                </div>
                <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
                <p class="login-page__hint">
                    <a href="/register">"Create an account"</a>
                </p>
            </form>
        </div>
    }
}

/// Swap the captcha `<img>` source for a fresh object URL, revoking the old
/// one so blob storage does not accumulate.
fn set_captcha_image(slot: RwSignal<Option<String>>, bytes: &[u8]) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(old) = slot.get_untracked() {
            let _ = web_sys::Url::revoke_object_url(&old);
        }
        if let Some(url) = image_object_url(bytes) {
            slot.set(Some(url));
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (slot, bytes);
    }
}

#[cfg(feature = "hydrate")]
fn image_object_url(bytes: &[u8]) -> Option<String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/jpeg");

    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
    web_sys::Url::create_object_url_with_blob(&blob).ok()
}
