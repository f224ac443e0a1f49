//! HTTP client wrapper for the Alpaca REST APIs.
//!
//! One request per call: no retries and no backoff. Every request is counted
//! in the gateway metrics by endpoint and outcome.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api_types::AlpacaErrorResponse;
use super::config::AlpacaConfig;
use super::error::AlpacaError;
use crate::infrastructure::config::Credentials;
use crate::infrastructure::metrics::{GatewayEndpoint, GatewayOutcome, record_gateway_request};

/// HTTP client for the Alpaca trading and market data APIs.
#[derive(Debug, Clone)]
pub struct AlpacaHttpClient {
    client: Client,
    credentials: Credentials,
    trading_base_url: String,
    data_base_url: String,
}

impl AlpacaHttpClient {
    /// Create a new HTTP client from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are empty or the client cannot be
    /// built.
    pub fn new(config: &AlpacaConfig) -> Result<Self, AlpacaError> {
        if config.credentials.api_key().is_empty() || config.credentials.api_secret().is_empty() {
            return Err(AlpacaError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AlpacaError::Http(e.to_string()))?;

        Ok(Self {
            client,
            credentials: config.credentials.clone(),
            trading_base_url: config.trading_base_url.trim_end_matches('/').to_string(),
            data_base_url: config.data_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request to the trading API.
    pub async fn get<T, Q>(
        &self,
        endpoint: GatewayEndpoint,
        path: &str,
        query: &Q,
    ) -> Result<T, AlpacaError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.request(endpoint, &self.trading_base_url, path, query)
            .await
    }

    /// Make a GET request to the market data API.
    pub async fn data_get<T, Q>(
        &self,
        endpoint: GatewayEndpoint,
        path: &str,
        query: &Q,
    ) -> Result<T, AlpacaError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.request(endpoint, &self.data_base_url, path, query)
            .await
    }

    async fn request<T, Q>(
        &self,
        endpoint: GatewayEndpoint,
        base_url: &str,
        path: &str,
        query: &Q,
    ) -> Result<T, AlpacaError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let result = self.send(base_url, path, query).await;
        let outcome = match &result {
            Ok(_) => GatewayOutcome::Success,
            Err(
                AlpacaError::Api { .. }
                | AlpacaError::AuthenticationFailed
                | AlpacaError::RateLimited { .. },
            ) => GatewayOutcome::ApiError,
            Err(_) => GatewayOutcome::TransportError,
        };
        record_gateway_request(endpoint, outcome);
        result
    }

    async fn send<T, Q>(&self, base_url: &str, path: &str, query: &Q) -> Result<T, AlpacaError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{base_url}{path}");
        let request = self
            .client
            .get(&url)
            .header("APCA-API-KEY-ID", self.credentials.api_key())
            .header("APCA-API-SECRET-KEY", self.credentials.api_secret())
            .query(query);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AlpacaError::Network(format!("request to {path} timed out"))
            } else {
                AlpacaError::Network(e.without_url().to_string())
            }
        })?;

        let status = response.status();

        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| AlpacaError::Network(e.to_string()))?;
            return serde_json::from_str(&text).map_err(|e| AlpacaError::JsonParse(e.to_string()));
        }

        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let error_body = response.text().await.unwrap_or_default();

        let (error_code, error_message) =
            match serde_json::from_str::<AlpacaErrorResponse>(&error_body) {
                Ok(err) => (
                    err.code
                        .map_or_else(|| status.as_u16().to_string(), |code| code.to_string()),
                    err.message,
                ),
                Err(_) => (status.as_u16().to_string(), error_body),
            };

        tracing::warn!(
            path,
            status = status.as_u16(),
            code = %error_code,
            message = %error_message,
            "Alpaca request failed"
        );

        Err(classify_error(status, error_code, error_message, retry_after))
    }
}

/// Map a non-success status to an error.
fn classify_error(
    status: StatusCode,
    code: String,
    message: String,
    retry_after: Option<u64>,
) -> AlpacaError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AlpacaError::AuthenticationFailed,
        StatusCode::TOO_MANY_REQUESTS => AlpacaError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(60),
        },
        _ => AlpacaError::Api {
            status: status.as_u16(),
            code,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::Environment;

    #[test]
    fn classify_auth_errors() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            assert_eq!(
                classify_error(status, String::new(), String::new(), None),
                AlpacaError::AuthenticationFailed
            );
        }
    }

    #[test]
    fn classify_rate_limited() {
        assert_eq!(
            classify_error(StatusCode::TOO_MANY_REQUESTS, String::new(), String::new(), Some(5)),
            AlpacaError::RateLimited {
                retry_after_secs: 5
            }
        );
        assert_eq!(
            classify_error(StatusCode::TOO_MANY_REQUESTS, String::new(), String::new(), None),
            AlpacaError::RateLimited {
                retry_after_secs: 60
            }
        );
    }

    #[test]
    fn classify_other_errors_as_api() {
        let err = classify_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "42210000".to_string(),
            "invalid timeframe".to_string(),
            None,
        );
        assert!(matches!(err, AlpacaError::Api { status: 422, .. }));
    }

    #[test]
    fn empty_credentials_rejected() {
        let config = AlpacaConfig::new(
            Credentials::new(String::new(), "secret".to_string()),
            Environment::Paper,
        );
        assert_eq!(
            AlpacaHttpClient::new(&config).unwrap_err(),
            AlpacaError::AuthenticationFailed
        );
    }
}
