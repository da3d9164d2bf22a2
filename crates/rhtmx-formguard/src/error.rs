// File: rhtmx-formguard/src/error.rs
// Purpose: Error type shared by backends, config loading and the session

use thiserror::Error;

/// Errors raised while talking to the backend or loading configuration.
///
/// None of these reach the user as a distinct error: validators and the
/// translation cache absorb them into failing checks or empty messages.
#[derive(Debug, Error)]
pub enum FormGuardError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FormGuardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_decode_keeps_source() {
        let parse_error = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = FormGuardError::from(parse_error);

        assert!(matches!(err, FormGuardError::Decode(_)));
        assert!(err.to_string().starts_with("could not decode response body:"));
        assert!(err.source().is_some());
    }
}
