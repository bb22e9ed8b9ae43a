//! HTTP transport for REST API calls.

use crate::error::Error;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shape of the `error` object carried by 400 responses. Responses don't
/// always contain all fields, so sane defaults must be set.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct ErrorDetail {
    code: u64,
    errors: Vec<String>,
    message: String,
}

impl Default for ErrorDetail {
    fn default() -> Self {
        Self {
            code: 99999,
            errors: Vec::new(),
            message: String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: ErrorDetail,
}

/// HTTP transport wrapper for API calls.
///
/// One call to [`HttpTransport::request`] maps to exactly one round trip:
/// no retries, no pooling logic beyond what reqwest provides.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    api_base: Url,
    token: String,
}

impl HttpTransport {
    /// Create a transport rooted at `api_base`, authenticating every
    /// request with the given account token.
    pub fn new(api_base: Url, token: String, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(concat!("pdclient/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base,
            token,
        })
    }

    /// Issue a request against the API and decode the response body.
    ///
    /// Query parameters pass through verbatim. A 400 maps to
    /// [`Error::BadRequest`] with the parsed validation payload, a 404 to
    /// [`Error::NotFound`] carrying `path`, and any other non-2xx to
    /// [`Error::Http`]. A 2xx always passes through, even when the body is
    /// error-shaped; empty or undecodable bodies decode to `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
        extra_headers: &[(&str, &str)],
    ) -> Result<Value, Error> {
        let url = self.api_base.join(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Token token={}", self.token));

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        for (name, value) in extra_headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, text);
            return Err(match status {
                StatusCode::BAD_REQUEST => {
                    let payload: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
                    Error::BadRequest {
                        code: payload.error.code,
                        errors: payload.error.errors,
                        message: payload.error.message,
                    }
                }
                StatusCode::NOT_FOUND => Error::NotFound {
                    path: path.to_string(),
                },
                _ => Error::Http { status, body: text },
            });
        }

        // Some endpoints legitimately return empty bodies; a body that does
        // not decode counts as "no structured payload", not as a failure.
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_defaults() {
        let payload: ErrorBody =
            serde_json::from_str(r#"{"error": {"message": "bad field"}}"#).unwrap();
        assert_eq!(payload.error.code, 99999);
        assert!(payload.error.errors.is_empty());
        assert_eq!(payload.error.message, "bad field");
    }

    #[test]
    fn test_error_body_full_payload() {
        let payload: ErrorBody = serde_json::from_str(
            r#"{"error": {"code": 2001, "errors": ["name is required"], "message": "Invalid Input"}}"#,
        )
        .unwrap();
        assert_eq!(payload.error.code, 2001);
        assert_eq!(payload.error.errors, vec!["name is required"]);
        assert_eq!(payload.error.message, "Invalid Input");
    }

    #[test]
    fn test_error_body_without_error_key() {
        let payload: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.error.code, 99999);
        assert_eq!(payload.error.message, "");
    }
}
