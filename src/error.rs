//! Error types for API requests and entity attribute access.
//!
//! Every operation surfaces failures directly to the caller - nothing is
//! retried or swallowed. Callers that want to react to validation failures
//! should match [`Error::BadRequest`] and [`Error::NotFound`] separately
//! from the generic transport variants.

use thiserror::Error;

/// Errors raised by API operations and entity attribute access.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP 400 with a structured validation payload.
    ///
    /// Fields missing from the response body fall back to `code` 99999, an
    /// empty error list, and an empty message.
    #[error("{message} ({code}): {errors:?}")]
    BadRequest {
        code: u64,
        errors: Vec<String>,
        message: String,
    },

    /// HTTP 404 for the requested path.
    #[error("endpoint ({path}) not found")]
    NotFound { path: String },

    /// Any other non-2xx response.
    #[error("api request failed: {status}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Network-level failure from the underlying HTTP client.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The API base or request path did not form a valid URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// Reading an attribute the entity does not carry.
    #[error("attribute not found: {0}")]
    AttributeNotFound(String),

    /// `create`/`update` called with a payload that is not a JSON object.
    #[error("fields payload must be a JSON object")]
    InvalidFields,
}
