//! Error types for SonarQube Web API operations.

use thiserror::Error;

/// Errors that can occur during SonarQube Web API operations.
#[derive(Debug, Error)]
pub enum SonarError {
    /// Configuration is missing or incomplete.
    #[error("SonarQube configuration required: {0}")]
    ConfigMissing(String),

    /// A required request parameter was absent or invalid.
    ///
    /// Raised by a builder before any network call is made.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Authentication or authorization failed.
    #[error("Not authorized (HTTP {status_code}): check your token and permissions")]
    Unauthorized { status_code: u16 },

    /// API request failed.
    #[error("SonarQube API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for SonarQube operations.
pub type Result<T> = core::result::Result<T, SonarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err = SonarError::Validation("'project' is required".to_string());
        assert_eq!(err.to_string(), "Invalid request: 'project' is required");
    }

    #[test]
    fn test_url_error_converts() {
        let err: SonarError = url::ParseError::EmptyHost.into();
        assert!(matches!(err, SonarError::Url(_)));
    }

    #[test]
    fn test_api_error_message() {
        let err = SonarError::Api {
            message: "database unavailable".to_string(),
            status_code: Some(500),
        };
        assert!(err.to_string().contains("database unavailable"));
    }
}
