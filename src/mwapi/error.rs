//! MediaWiki API error types

use thiserror::Error;

/// Errors from the MediaWiki API client
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {message}")]
    HttpError { message: String },

    #[error("API error for {page}: {message}")]
    ApiError { page: String, message: String },

    #[error("Malformed API response for {page}: {message}")]
    ParseError { page: String, message: String },
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::HttpError {
            message: "connection refused".to_string(),
        };
        assert!(format!("{err}").contains("connection refused"));

        let err = FetchError::ParseError {
            page: "Bread".to_string(),
            message: "missing 'query'".to_string(),
        };
        let text = format!("{err}");
        assert!(text.contains("Bread"));
        assert!(text.contains("missing 'query'"));
    }
}
