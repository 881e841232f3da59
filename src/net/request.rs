//! HTTP request pipeline shared by every API call.
//!
//! Outbound, the pipeline attaches the session token as a bearer credential
//! when one is present; a missing token never blocks a request. Inbound, a
//! transport-level success runs through an ordered set of stages that can
//! each short-circuit: image payloads pass through untouched, failed
//! envelopes surface an error toast and resolve to "no result", successful
//! envelopes are unwrapped to their `data` field. Transport-level failures
//! (network error, timeout, non-2xx status) are returned to the caller
//! unswallowed; nothing is retried.
//!
//! ERROR HANDLING
//! ==============
//! Callers distinguish three outcomes: `Ok(Some(_))` success, `Ok(None)`
//! business failure already shown to the user, `Err(_)` transport failure
//! left for the caller.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use serde_json::Value;
use thiserror::Error;

use crate::net::types::{Envelope, SUCCESS_CODE};
use crate::state::session::SessionStore;
#[cfg(feature = "hydrate")]
use crate::ui::message;

/// Prefix applied to every request path.
pub const API_BASE: &str = "/api";

/// Transport timeout applied to every request.
pub const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(5000);

/// Transport-level failures, propagated to callers unretried.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected payload shape")]
    UnexpectedPayload,
    #[error("not available on server")]
    Unavailable,
}

/// Raw binary reply, passed through the pipeline verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinaryReply {
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Response headers, as received.
    pub headers: Vec<(String, String)>,
}

impl BinaryReply {
    /// Look up a response header by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What a transport-level success resolved to.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// Binary payload returned untouched (captcha images).
    Binary(BinaryReply),
    /// Successful envelope, unwrapped to its `data` field.
    Data(Value),
    /// Business failure; an error toast has already been shown.
    Failed,
}

/// Terminal result of the pure inbound stages.
#[derive(Debug, PartialEq)]
pub enum Processed {
    /// Image content type: skip envelope validation entirely.
    Binary(Vec<u8>),
    /// Envelope success: the unwrapped `data`.
    Data(Value),
    /// Envelope failure: the `msg` to surface as an error.
    Failure(String),
}

/// Run the inbound stages over a transport-level success.
///
/// # Errors
///
/// Returns a decode error when a non-binary body is not a valid envelope.
pub fn process_response(
    content_type: Option<&str>,
    body: Vec<u8>,
) -> Result<Processed, RequestError> {
    if content_type.is_some_and(|value| value.starts_with("image/")) {
        return Ok(Processed::Binary(body));
    }

    let envelope: Envelope = serde_json::from_slice(&body)?;
    if envelope.code != SUCCESS_CODE {
        return Ok(Processed::Failure(envelope.msg.unwrap_or_default()));
    }
    Ok(Processed::Data(envelope.data))
}

/// Configured HTTP client carrying the session it authenticates with.
#[derive(Clone, Copy)]
pub struct Client {
    session: SessionStore,
}

impl Client {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// POST a JSON body and resolve the envelope.
    ///
    /// # Errors
    ///
    /// Transport failures only; business failures resolve to `Ok(None)`.
    pub async fn post_json(
        &self,
        path: &str,
        body: &Value,
        headers: &[(&str, &str)],
    ) -> Result<Option<Value>, RequestError> {
        #[cfg(feature = "hydrate")]
        {
            let url = format!("{API_BASE}{path}");
            let request = self
                .prepare(gloo_net::http::Request::post(&url), headers)
                .json(body)
                .map_err(transport_err)?;
            let response = await_response(request.send()).await?;
            match resolve(response).await? {
                Reply::Data(data) => Ok(Some(data)),
                Reply::Failed => Ok(None),
                Reply::Binary(_) => Err(RequestError::UnexpectedPayload),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (path, body, headers);
            Err(RequestError::Unavailable)
        }
    }

    /// GET a binary payload (captcha images). The reply is returned verbatim.
    ///
    /// # Errors
    ///
    /// Transport failures only; an error envelope on a binary endpoint still
    /// resolves to `Ok(None)` after surfacing its message.
    pub async fn get_binary(&self, path: &str) -> Result<Option<BinaryReply>, RequestError> {
        #[cfg(feature = "hydrate")]
        {
            let url = format!("{API_BASE}{path}");
            let request = self.prepare(gloo_net::http::Request::get(&url), &[]);
            let response = await_response(request.send()).await?;
            match resolve(response).await? {
                Reply::Binary(reply) => Ok(Some(reply)),
                Reply::Failed => Ok(None),
                Reply::Data(_) => Err(RequestError::UnexpectedPayload),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(RequestError::Unavailable)
        }
    }

    /// Outbound stage: credentials mode, bearer token, caller headers.
    #[cfg(feature = "hydrate")]
    fn prepare(
        &self,
        builder: gloo_net::http::RequestBuilder,
        headers: &[(&str, &str)],
    ) -> gloo_net::http::RequestBuilder {
        let mut builder = builder.credentials(web_sys::RequestCredentials::Include);

        if let Some(token) = self.session.token() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        builder
    }
}

/// Inbound stages, plus the error-toast side effect on business failure.
#[cfg(feature = "hydrate")]
async fn resolve(response: gloo_net::http::Response) -> Result<Reply, RequestError> {
    let content_type = response.headers().get("content-type");
    let body = response.binary().await.map_err(transport_err)?;

    match process_response(content_type.as_deref(), body)? {
        Processed::Binary(bytes) => Ok(Reply::Binary(BinaryReply {
            content_type: content_type.unwrap_or_default(),
            bytes,
            headers: response.headers().entries().collect(),
        })),
        Processed::Data(data) => Ok(Reply::Data(data)),
        Processed::Failure(msg) => {
            message::error(&msg, message::Overrides::default());
            Ok(Reply::Failed)
        }
    }
}

/// Race the transport against the fixed request timeout, then reject
/// non-2xx statuses.
#[cfg(feature = "hydrate")]
async fn await_response<F>(pending: F) -> Result<gloo_net::http::Response, RequestError>
where
    F: std::future::Future<Output = Result<gloo_net::http::Response, gloo_net::Error>>,
{
    use futures::future::{Either, select};

    let response = match select(
        Box::pin(pending),
        Box::pin(gloo_timers::future::sleep(REQUEST_TIMEOUT)),
    )
    .await
    {
        Either::Left((result, _)) => result.map_err(transport_err)?,
        Either::Right(((), _)) => return Err(RequestError::Timeout),
    };

    if !response.ok() {
        return Err(RequestError::Status(response.status()));
    }
    Ok(response)
}

#[cfg(feature = "hydrate")]
fn transport_err(err: gloo_net::Error) -> RequestError {
    RequestError::Network(err.to_string())
}
