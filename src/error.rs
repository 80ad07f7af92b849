//! Error types for Cloud Foundry API operations.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Maximum number of body characters kept on decode errors.
const BODY_SNIPPET_LEN: usize = 512;

/// Errors that can occur during Cloud Foundry API operations.
#[derive(Debug, Error)]
pub enum CfError {
    /// Configuration is missing or incomplete.
    #[error("Cloud Foundry configuration required: {0}")]
    ConfigMissing(String),

    /// A caller-supplied argument is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The HTTP call itself failed (connect, TLS, timeout, ...).
    #[error("HTTP error calling {path}: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode response from {path}: {source} (body: {body})")]
    Decode {
        path: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// A typed call succeeded without a job but sent no body to decode.
    #[error("Empty {status} response from {path}, expected a resource body")]
    EmptyBody { path: String, status: u16 },

    /// A `next` link pointed back at the page it was found on.
    #[error("Pagination loop: next link repeats page {page:?} (per_page {per_page:?})")]
    PaginationLoop {
        page: Option<u32>,
        per_page: Option<u32>,
    },

    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// A lookup expected to find an entity found nothing.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// A lookup expected exactly one entity but found several.
    #[error("expected exactly one {kind}, found {found}")]
    ExpectedOne { kind: &'static str, found: usize },

    /// An asynchronous job finished in the FAILED state.
    #[error("job {job_guid} failed: {}", format_details(.errors))]
    JobFailed {
        job_guid: String,
        errors: Vec<ErrorDetail>,
    },

    /// An asynchronous job did not finish in time.
    #[error("job {job_guid} did not complete within {waited:?}")]
    JobTimeout { job_guid: String, waited: Duration },

    /// JSON serialization error outside of response decoding.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl CfError {
    /// Build a decode error, keeping a truncated copy of the offending body.
    pub(crate) fn decode(path: &str, body: &[u8], source: serde_json::Error) -> Self {
        let text = String::from_utf8_lossy(body);
        let body = match text.char_indices().nth(BODY_SNIPPET_LEN) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.into_owned(),
        };
        Self::Decode {
            path: path.to_string(),
            body,
            source,
        }
    }

    pub(crate) fn http(path: &str, source: reqwest::Error) -> Self {
        Self::Http {
            path: path.to_string(),
            source,
        }
    }

    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(api) => Some(api.status),
            Self::RateLimited { .. } => Some(429),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for 404 responses and empty single-entity lookups.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || self.status() == Some(404)
    }
}

/// A non-2xx response from the Cloud Foundry API.
#[derive(Debug, Clone, Error)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Structured errors from the response body, if it had any.
    pub errors: Vec<ErrorDetail>,
    /// Raw response body.
    pub body: String,
}

impl ApiError {
    /// Parse a CF V3 error body (`{"errors": [...]}`), keeping the raw text.
    pub fn from_body(status: u16, body: String) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            errors: Vec<ErrorDetail>,
        }

        let errors = serde_json::from_str::<Envelope>(&body)
            .map(|e| e.errors)
            .unwrap_or_default();

        Self {
            status,
            errors,
            body,
        }
    }

    /// Human-readable message: the structured details, or the raw body.
    pub fn message(&self) -> String {
        if self.errors.is_empty() {
            if self.body.is_empty() {
                format!("HTTP {}", self.status)
            } else {
                self.body.clone()
            }
        } else {
            format_details(&self.errors)
        }
    }

    /// First CF error title (e.g. `CF-ResourceNotFound`).
    pub fn title(&self) -> Option<&str> {
        self.errors.first().map(|e| e.title.as_str())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cloud Foundry API error (HTTP {}): {}",
            self.status,
            self.message()
        )
    }
}

/// One entry of a CF V3 `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct ErrorDetail {
    /// Numeric CF error code.
    #[serde(default)]
    pub code: i64,
    /// Error name, e.g. `CF-ResourceNotFound`.
    #[serde(default)]
    pub title: String,
    /// Human-readable description.
    #[serde(default)]
    pub detail: String,
}

fn format_details(errors: &[ErrorDetail]) -> String {
    errors
        .iter()
        .map(|e| format!("{} ({}): {}", e.title, e.code, e.detail))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for Cloud Foundry operations.
pub type Result<T> = core::result::Result<T, CfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_parses_cf_errors() {
        let body = r#"{"errors":[{"code":10010,"title":"CF-ResourceNotFound","detail":"App not found"}]}"#;
        let err = ApiError::from_body(404, body.to_string());

        assert_eq!(err.status, 404);
        assert_eq!(err.title(), Some("CF-ResourceNotFound"));
        assert!(err.message().contains("App not found"));
        assert_eq!(err.body, body);
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = ApiError::from_body(502, "bad gateway".to_string());
        assert!(err.errors.is_empty());
        assert_eq!(err.message(), "bad gateway");

        let empty = ApiError::from_body(500, String::new());
        assert_eq!(empty.message(), "HTTP 500");
    }

    #[test]
    fn test_decode_error_truncates_body() {
        let body = "x".repeat(2000);
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CfError::decode("v3/apps", body.as_bytes(), source);

        match err {
            CfError::Decode { path, body, .. } => {
                assert_eq!(path, "v3/apps");
                assert_eq!(body.len(), BODY_SNIPPET_LEN + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_found_helpers() {
        let api: CfError = ApiError::from_body(404, String::new()).into();
        assert!(api.is_not_found());
        assert_eq!(api.status(), Some(404));

        let lookup = CfError::NotFound {
            kind: "app",
            id: "my-app".to_string(),
        };
        assert!(lookup.is_not_found());
        assert_eq!(lookup.status(), None);
    }
}
