//! Gateway Error
//!
//! Port-level failure shared by the market data and brokerage ports.

/// Failure reported by a remote gateway.
///
/// The `Display` text is shown to users after the command's failure label,
/// so it stays short and free of credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response.
    #[error("connection error: {message}")]
    Connection {
        /// Error details.
        message: String,
    },

    /// Credentials were rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The API asked us to slow down.
    #[error("rate limited by the API")]
    RateLimited,

    /// The API answered with an error.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message reported by the API.
        message: String,
    },

    /// The response body could not be understood.
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },
}
