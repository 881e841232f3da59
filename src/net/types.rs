//! Wire types shared with the backend.

use serde::Deserialize;
use serde_json::Value;

/// Envelope `code` value the backend uses for a successful operation.
pub const SUCCESS_CODE: i64 = 1;

/// Standard JSON wrapper around every non-binary backend response.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Envelope {
    /// Business status code; [`SUCCESS_CODE`] means success.
    pub code: i64,
    /// Human-readable outcome, shown to the user on failure.
    #[serde(default)]
    pub msg: Option<String>,
    /// Operation payload; shape depends on the endpoint.
    #[serde(default)]
    pub data: Value,
}
