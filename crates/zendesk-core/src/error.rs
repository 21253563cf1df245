//! Error types for Zendesk operations.
//!
//! This module provides the error hierarchy shared by every Zendesk client crate,
//! including the mapping from HTTP status codes and Zendesk error payloads onto
//! typed variants.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main error type for Zendesk operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The request was malformed (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid credentials (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Credentials lack permission for the resource (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflicting update (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Record failed server-side validation (HTTP 422)
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    /// Account exceeded its rate limit (HTTP 429)
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Seconds to wait before retrying, from the `Retry-After` header
        retry_after: Option<u64>,
        /// Error message
        message: String,
    },

    /// Zendesk is unavailable or returned a server error
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The response carried a status the operation does not expect
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Error message or response body
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Failed to decode a response body
    #[error("Failed to parse Zendesk response: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint or path
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid request built on the client side
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Specialized result type for Zendesk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error payload returned by the Zendesk API.
///
/// Zendesk uses a few shapes for errors: `{"error": "RecordNotFound",
/// "description": "..."}`, `{"error": {"title": "...", "message": "..."}}`, and
/// the newer `{"errors": [{"title": "...", "detail": "..."}]}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    /// Error code or structured error object
    #[serde(default)]
    pub error: Option<ApiErrorKind>,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Per-field validation details
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    /// List-style errors
    #[serde(default)]
    pub errors: Option<Vec<ApiErrorEntry>>,
}

/// The `error` member of an [`ApiErrorBody`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ApiErrorKind {
    /// Plain error code such as `RecordNotFound`
    Code(String),
    /// Structured error with title and message
    Detailed {
        /// Short title
        #[serde(default)]
        title: Option<String>,
        /// Longer message
        #[serde(default)]
        message: Option<String>,
    },
}

/// Entry of the `errors` array.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiErrorEntry {
    /// Machine code
    #[serde(default)]
    pub code: Option<String>,
    /// Short title
    #[serde(default)]
    pub title: Option<String>,
    /// Longer detail
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// Parse an error payload, returning `None` for non-JSON bodies.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Best human-readable message contained in the payload.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        if let Some(description) = &self.description {
            return Some(description.clone());
        }

        match &self.error {
            Some(ApiErrorKind::Detailed { message: Some(message), .. }) => {
                return Some(message.clone())
            }
            Some(ApiErrorKind::Detailed { title: Some(title), .. }) => {
                return Some(title.clone())
            }
            Some(ApiErrorKind::Code(code)) => return Some(code.clone()),
            _ => {}
        }

        self.errors.as_ref().and_then(|errors| {
            let parts: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.detail.as_deref().or(e.title.as_deref()))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        })
    }
}

/// Map a non-success response onto a typed error.
///
/// `body` is the raw response text; when it holds a Zendesk error payload the
/// payload's description is used as the message.
#[must_use]
pub fn map_status_to_error(status: StatusCode, body: &str, retry_after: Option<u64>) -> Error {
    let message = ApiErrorBody::parse(body)
        .and_then(|payload| payload.message())
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("no response body").to_string()
            } else {
                body.to_string()
            }
        });

    match status {
        StatusCode::BAD_REQUEST => Error::BadRequest(message),
        StatusCode::UNAUTHORIZED => Error::Unauthorized(message),
        StatusCode::FORBIDDEN => Error::Forbidden(message),
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::CONFLICT => Error::Conflict(message),
        StatusCode::UNPROCESSABLE_ENTITY => Error::UnprocessableEntity(message),
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited {
            retry_after,
            message,
        },
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            Error::ServiceUnavailable(format!("Zendesk temporarily unavailable: {message}"))
        }
        status if status.is_server_error() => {
            Error::ServiceUnavailable(format!("Zendesk server error {status}: {message}"))
        }
        status => Error::UnexpectedStatus {
            status: status.as_u16(),
            message,
        },
    }
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::UnprocessableEntity(_) => "UNPROCESSABLE_ENTITY",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::UnexpectedStatus { .. } => "UNEXPECTED_STATUS",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }

    /// HTTP status code carried by response-derived errors.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::UnprocessableEntity(_) => Some(422),
            Self::RateLimited { .. } => Some(429),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the failure is transient and the transport may retry it.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::ServiceUnavailable(_) | Self::Timeout(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::BadRequest("x".into()).error_code(), "BAD_REQUEST");
        assert_eq!(Error::Unauthorized("x".into()).error_code(), "UNAUTHORIZED");
        assert_eq!(Error::Forbidden("x".into()).error_code(), "FORBIDDEN");
        assert_eq!(Error::NotFound("x".into()).error_code(), "NOT_FOUND");
        assert_eq!(
            Error::UnprocessableEntity("x".into()).error_code(),
            "UNPROCESSABLE_ENTITY"
        );
        assert_eq!(
            Error::RateLimited {
                retry_after: None,
                message: "x".into()
            }
            .error_code(),
            "RATE_LIMITED"
        );
        assert_eq!(
            Error::UnexpectedStatus {
                status: 302,
                message: "x".into()
            }
            .error_code(),
            "UNEXPECTED_STATUS"
        );
        assert_eq!(Error::ParseError("x".into()).error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("ticket 7".to_string());
        assert_eq!(err.to_string(), "Not found: ticket 7");

        let err = Error::UnexpectedStatus {
            status: 302,
            message: "moved".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 302: moved");
    }

    #[test]
    fn maps_status_codes_to_variants() {
        let cases = [
            (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (StatusCode::FORBIDDEN, "FORBIDDEN"),
            (StatusCode::NOT_FOUND, "NOT_FOUND"),
            (StatusCode::CONFLICT, "CONFLICT"),
            (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE_ENTITY"),
            (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            (StatusCode::INTERNAL_SERVER_ERROR, "SERVICE_UNAVAILABLE"),
            (StatusCode::FOUND, "UNEXPECTED_STATUS"),
        ];

        for (status, code) in cases {
            assert_eq!(map_status_to_error(status, "", None).error_code(), code);
        }
    }

    #[test]
    fn uses_description_from_payload() {
        let body = r#"{"error":"RecordNotFound","description":"Not found"}"#;
        let err = map_status_to_error(StatusCode::NOT_FOUND, body, None);
        assert_eq!(err, Error::NotFound("Not found".to_string()));
    }

    #[test]
    fn uses_structured_error_message() {
        let body = r#"{"error":{"title":"Forbidden","message":"You do not have access to this page."}}"#;
        let err = map_status_to_error(StatusCode::FORBIDDEN, body, None);
        assert_eq!(
            err,
            Error::Forbidden("You do not have access to this page.".to_string())
        );
    }

    #[test]
    fn joins_error_list_entries() {
        let body = r#"{"errors":[{"code":"a","title":"First"},{"code":"b","detail":"Second"}]}"#;
        let err = map_status_to_error(StatusCode::BAD_REQUEST, body, None);
        assert_eq!(err, Error::BadRequest("First; Second".to_string()));
    }

    #[test]
    fn falls_back_to_raw_body_or_reason() {
        let err = map_status_to_error(StatusCode::CONFLICT, "plain text", None);
        assert_eq!(err, Error::Conflict("plain text".to_string()));

        let err = map_status_to_error(StatusCode::CONFLICT, "", None);
        assert_eq!(err, Error::Conflict("Conflict".to_string()));
    }

    #[test]
    fn rate_limit_keeps_retry_after() {
        let err = map_status_to_error(StatusCode::TOO_MANY_REQUESTS, "", Some(42));
        assert!(matches!(
            err,
            Error::RateLimited {
                retry_after: Some(42),
                ..
            }
        ));
        assert!(err.is_retryable());
        assert_eq!(err.status_code(), Some(429));
    }

    #[test]
    fn status_code_only_for_response_errors() {
        assert_eq!(Error::NotFound("x".into()).status_code(), Some(404));
        assert_eq!(Error::Timeout("x".into()).status_code(), None);
        assert_eq!(
            Error::UnexpectedStatus {
                status: 418,
                message: String::new()
            }
            .status_code(),
            Some(418)
        );
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let zendesk_err: Error = err.into();
        assert!(matches!(zendesk_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let zendesk_err: Error = err.into();
        assert!(matches!(zendesk_err, Error::ParseError(_)));
    }
}
