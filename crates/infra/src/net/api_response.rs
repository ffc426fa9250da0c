//! Classified outcome of a remote call.

use thiserror::Error;

/// Details of a failed remote call (transport, decode or non-2xx status).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}{}", render_cause(.cause))]
pub struct ApiError {
    pub message: String,

    /// Text of the underlying failure, shown verbatim after the message.
    pub cause: Option<String>,

    /// HTTP status when the server answered; `None` for transport failures.
    pub status_code: Option<u16>,

    /// Platform-specific error code from the response body, if any.
    pub error_code: Option<String>,
}

fn render_cause(cause: &Option<String>) -> String {
    cause.as_ref().map(|c| format!(": {c}")).unwrap_or_default()
}

/// Outcome of a repository call: success, not-found, or error.
///
/// Callers branch on [`ApiResponse::is_successful`] /
/// [`ApiResponse::is_not_successful`]. Not-found is an expected outcome of a
/// lookup and carries no status or cause; it is never folded into `Error`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    #[error("OK")]
    Success,

    #[error("{message}")]
    NotFound { message: String },

    #[error(transparent)]
    Error(ApiError),
}

impl ApiResponse {
    pub fn success() -> Self {
        Self::Success
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Not-found for a named entity, e.g. `App my-app not found`.
    pub fn entity_not_found(kind: &str, name: &str) -> Self {
        Self::not_found(format!("{kind} {name} not found"))
    }

    /// Error with a message and no further detail.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ApiError {
            message: message.into(),
            cause: None,
            status_code: None,
            error_code: None,
        })
    }

    /// Error wrapping an underlying failure (transport, decode, ...).
    pub fn with_error(message: impl Into<String>, cause: impl core::fmt::Display) -> Self {
        Self::Error(ApiError {
            message: message.into(),
            cause: Some(cause.to_string()),
            status_code: None,
            error_code: None,
        })
    }

    /// Error reported by the server with an HTTP status.
    pub fn with_status(
        message: impl Into<String>,
        status_code: u16,
        error_code: Option<String>,
    ) -> Self {
        Self::Error(ApiError {
            message: message.into(),
            cause: None,
            status_code: Some(status_code),
            error_code,
        })
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn is_not_successful(&self) -> bool {
        !self.is_successful()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// An error the server answered with 401 (stale or revoked token).
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Error(e) => e.status_code,
            _ => None,
        }
    }

    /// User-facing text: the not-found message, or the error message with its cause.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_variant_is_successful() {
        assert!(ApiResponse::success().is_successful());
        assert!(ApiResponse::not_found("Domain foo.com not found").is_not_successful());
        assert!(ApiResponse::error("boom").is_not_successful());
    }

    #[test]
    fn not_found_is_distinct_from_error() {
        let nf = ApiResponse::entity_not_found("Domain", "foo.com");
        assert!(nf.is_not_found());
        assert!(!nf.is_error());
        assert_eq!(nf.status_code(), None);
        assert_eq!(nf.message(), "Domain foo.com not found");

        let err = ApiResponse::with_status("Server error", 404, None);
        assert!(err.is_error());
        assert!(!err.is_not_found());
    }

    #[test]
    fn error_message_carries_cause_verbatim() {
        let response = ApiResponse::with_error("Did not work", "bummer");
        assert_eq!(response.message(), "Did not work: bummer");
    }

    #[test]
    fn only_401_errors_are_unauthorized() {
        assert!(ApiResponse::with_status("Invalid Auth Token", 401, None).is_unauthorized());
        assert!(!ApiResponse::with_status("Forbidden", 403, None).is_unauthorized());
        assert!(!ApiResponse::with_error("connection refused", "os error 111").is_unauthorized());
        assert!(!ApiResponse::not_found("App x not found").is_unauthorized());
    }
}
