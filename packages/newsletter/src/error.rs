//! Error types for the newsletter renderer.
//!
//! The text pipeline itself is total and never fails. Errors only arise at
//! the boundary: reading input files and loading configuration.

use thiserror::Error;

/// Main error type for the newsletter library.
#[derive(Debug, Error)]
pub enum NewsletterError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Input document is larger than the accepted limit.
    #[error("Input exceeds maximum size limit ({size} bytes, max {max})")]
    InputTooLarge { size: usize, max: usize },

    /// Configuration value out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Base URL for relative links could not be parsed.
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Result type alias for newsletter operations.
pub type Result<T> = std::result::Result<T, NewsletterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NewsletterError::InvalidConfig("wrap width 5 is below minimum 20".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: wrap width 5 is below minimum 20"
        );
    }

    #[test]
    fn test_input_too_large_display() {
        let err = NewsletterError::InputTooLarge {
            size: 2_000_000,
            max: 1_000_000,
        };
        assert!(err.to_string().contains("2000000"));
        assert!(err.to_string().contains("max 1000000"));
    }

    #[test]
    fn test_invalid_base_url_display() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = NewsletterError::InvalidBaseUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid base URL 'not a url'"));
    }
}
