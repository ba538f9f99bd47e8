use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::domain::FetchError;

#[derive(Error, Debug)]
pub enum RestError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl RestError {
    fn classify(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_connect() {
            RestError::Connect(err.to_string())
        } else {
            RestError::Http(err)
        }
    }
}

/// Convert infrastructure RestError to domain FetchError
impl From<RestError> for FetchError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Timeout => FetchError::Timeout,
            RestError::Connect(msg) => FetchError::Connect(msg),
            RestError::Status(code) => FetchError::Status(code),
            RestError::Http(e) => FetchError::Transport(e.to_string()),
        }
    }
}

/// REST client for the venue's metadata endpoints
/// Infrastructure component - handles HTTP communication
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RestError::classify)?;
        Ok(RestClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// GET a path and return the raw response body
    pub async fn get_text(&self, path: &str) -> Result<String, RestError> {
        self.request(path, &[]).await
    }

    /// GET a path with extra request headers (authenticated endpoints)
    pub async fn get_text_with_headers(
        &self,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<String, RestError> {
        self.request(path, headers).await
    }

    async fn request(&self, path: &str, headers: &[(&str, &str)]) -> Result<String, RestError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(RestError::classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RestError::Status(status.as_u16()));
        }

        response.text().await.map_err(RestError::classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_typed_fetch_error() {
        let fetch: FetchError = RestError::Status(503).into();
        assert!(matches!(fetch, FetchError::Status(503)));
    }

    #[test]
    fn test_timeout_maps_to_typed_fetch_error() {
        let fetch: FetchError = RestError::Timeout.into();
        assert!(matches!(fetch, FetchError::Timeout));
    }
}
