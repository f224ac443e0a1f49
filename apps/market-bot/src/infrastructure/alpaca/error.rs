//! Alpaca-specific error types.

use thiserror::Error;

use crate::application::ports::GatewayError;

/// Errors from the Alpaca gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlpacaError {
    /// HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(String),

    /// API returned an error.
    #[error("API error {status}: {code} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error code from the API, or the status code.
        code: String,
        /// Error message from the API.
        message: String,
    },

    /// Authentication failed.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Suggested retry delay in seconds.
        retry_after_secs: u64,
    },

    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl From<AlpacaError> for GatewayError {
    fn from(err: AlpacaError) -> Self {
        match err {
            AlpacaError::Http(message) | AlpacaError::Network(message) => {
                Self::Connection { message }
            }
            AlpacaError::Api {
                status, message, ..
            } => Self::Api { status, message },
            AlpacaError::AuthenticationFailed => Self::AuthenticationFailed,
            AlpacaError::RateLimited { .. } => Self::RateLimited,
            AlpacaError::JsonParse(message) => Self::InvalidResponse { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_maps_to_connection() {
        let err: GatewayError = AlpacaError::Network("connection refused".to_string()).into();
        assert!(matches!(err, GatewayError::Connection { .. }));
    }

    #[test]
    fn auth_error_maps_through() {
        let err: GatewayError = AlpacaError::AuthenticationFailed.into();
        assert_eq!(err, GatewayError::AuthenticationFailed);
    }

    #[test]
    fn api_error_keeps_status_and_message() {
        let err: GatewayError = AlpacaError::Api {
            status: 422,
            code: "42210000".to_string(),
            message: "invalid symbol".to_string(),
        }
        .into();
        assert_eq!(
            err,
            GatewayError::Api {
                status: 422,
                message: "invalid symbol".to_string()
            }
        );
    }

    #[test]
    fn json_error_maps_to_invalid_response() {
        let err: GatewayError = AlpacaError::JsonParse("eof".to_string()).into();
        assert!(matches!(err, GatewayError::InvalidResponse { .. }));
    }
}
