//! Forecast HTTP Client
//!
//! A small, type-safe HTTP client for the forecast API: job creation, status
//! polling, result retrieval and model usage accounting.
//!
//! # Example
//!
//! ```no_run
//! use forecast_client::ForecastClient;
//! use forecast_core::dto::job::CreateForecastJob;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ForecastClient::new("http://localhost:8080");
//!
//!     let job = client
//!         .create_job(&CreateForecastJob::new("arima", vec!["tech-42".to_string()]))
//!         .await?;
//!
//!     println!("Created job: {} ({})", job.id, job.status);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod jobs;
mod models;

pub use api::ForecastApi;
pub use error::{ClientError, Result};

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the forecast API
///
/// Methods are grouped by resource:
/// - Forecast jobs (create, status, results, cancel)
/// - Models (usage accounting)
#[derive(Debug, Clone)]
pub struct ForecastClient {
    /// Base URL of the API (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ForecastClient {
    /// Create a new forecast client
    ///
    /// # Example
    /// ```
    /// use forecast_client::ForecastClient;
    ///
    /// let client = ForecastClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new forecast client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use forecast_client::ForecastClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ForecastClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL from path segments
    ///
    /// Segments are percent-encoded, so ids can be passed through verbatim.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!("Base URL cannot take path segments: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(
                status.as_u16(),
                extract_error_message(&error_text),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Pull the message out of an `{"error": "..."}` body, falling back to the raw text
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ForecastClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ForecastClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = ForecastClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = ForecastClient::new("http://localhost:8080");
        let url = client
            .endpoint(&["api", "models", "arima v2/beta", "usage"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/models/arima%20v2%2Fbeta/usage"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ForecastClient::new("http://gateway.local/forecasting/");
        let url = client.endpoint(&["api", "forecast", "jobs"]).unwrap();
        assert_eq!(url.as_str(), "http://gateway.local/forecasting/api/forecast/jobs");
    }

    #[test]
    fn test_endpoint_rejects_invalid_base() {
        let client = ForecastClient::new("not a url");
        let err = client.endpoint(&["api"]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error":"Job abc not found"}"#),
            "Job abc not found"
        );
        assert_eq!(extract_error_message("plain failure"), "plain failure");
        assert_eq!(extract_error_message(""), "Unknown error");
    }
}
