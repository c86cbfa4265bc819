//! Error types shared by every stage of the sign-in pipeline.
//!
//! None of these are recovered from: a failing stage aborts the remaining
//! stages of the current page load and the error is reported as is.

use std::io;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while authorizing, exchanging, fetching or rendering.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unusable configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading or writing the local handoff store failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The local handoff store could not be (de)serialized.
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Transport error or non-success status from the resource API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No verifier was found in the handoff store when the callback arrived.
    #[error("no PKCE code verifier stored; start a new sign-in")]
    MissingVerifier,

    /// The token endpoint rejected the exchange.
    #[error("token exchange failed ({status}): {error}{}", description_suffix(.description))]
    TokenEndpoint {
        status: StatusCode,
        error: String,
        description: Option<String>,
    },

    /// A remote response did not match its expected schema.
    #[error("malformed {what} payload: {source}")]
    MalformedPayload {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The authorization server redirected back with an `error` parameter.
    #[error("authorization denied: {error}")]
    Authorization { error: String },

    /// An endpoint URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

fn description_suffix(description: &Option<String>) -> String {
    match description {
        Some(d) => format!(" ({d})"),
        None => String::new(),
    }
}

impl Error {
    /// Wraps a schema mismatch in a response body.
    pub fn malformed(what: &'static str, source: serde_json::Error) -> Self {
        Error::MalformedPayload { what, source }
    }

    /// Status code the local page answers with when this error aborts a page load.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingVerifier | Error::Authorization { .. } => StatusCode::BAD_REQUEST,
            Error::TokenEndpoint { .. } | Error::MalformedPayload { .. } | Error::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Config(_) | Error::Io(_) | Error::Serde(_) | Error::Url(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
