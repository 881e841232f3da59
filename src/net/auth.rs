//! Auth API: captcha challenge, login, registration.
//!
//! Thin functions over the request pipeline; error surfacing and token
//! attachment happen there. Callers null-check the result: `Ok(None)` means
//! the server rejected the operation and the user has already seen why.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::Serialize;
use serde_json::Value;

use crate::net::request::{Client, RequestError};

/// A captcha challenge: the image to render and the single-use key the
/// backend issued for it (sent back in the `x-captcha-key` header on login).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Captcha {
    pub image: Vec<u8>,
    pub key: String,
}

/// Credentials submitted on login.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub captcha: String,
    pub captcha_key: String,
}

/// Fields submitted on registration.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Fetch a fresh captcha challenge.
///
/// # Errors
///
/// Transport failures only; a rejected challenge resolves to `Ok(None)`.
pub async fn get_captcha(client: &Client) -> Result<Option<Captcha>, RequestError> {
    let Some(reply) = client.get_binary("/auth/captcha").await? else {
        return Ok(None);
    };

    let key = reply.header("x-captcha-key").unwrap_or_default().to_owned();
    Ok(Some(Captcha {
        image: reply.bytes,
        key,
    }))
}

/// Submit login credentials. On success the returned `data` is the user
/// profile (token included).
///
/// # Errors
///
/// Transport failures only; bad credentials resolve to `Ok(None)`.
pub async fn login(client: &Client, form: &LoginForm) -> Result<Option<Value>, RequestError> {
    let body = serde_json::to_value(form)?;
    client
        .post_json(
            "/auth/login",
            &body,
            &[("x-captcha-key", form.captcha_key.as_str())],
        )
        .await
}

/// Create a new account.
///
/// # Errors
///
/// Transport failures only; a rejected registration resolves to `Ok(None)`.
pub async fn register(client: &Client, form: &RegisterForm) -> Result<Option<Value>, RequestError> {
    let body = serde_json::to_value(form)?;
    client.post_json("/auth/register", &body, &[]).await
}
