//! Fetch
//!
//! The transport behind the pipeline. Anything that can turn a URL into a
//! response body implements [`Fetch`]; [`HttpFetcher`] is the default.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Errors that can occur while fetching a source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{url} returned status {status}")]
    Status {
        /// Requested URL
        url: String,

        /// Response status
        status: StatusCode,
    },
}

/// Retrieves the raw body behind a URL.
#[automock]
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET `url` and return the full response body.
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// HTTP fetcher backed by `reqwest`. No retries, no authentication.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    /// Create a fetcher with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn mock_fetch_returns_configured_body() -> TestResult {
        let mut fetch = MockFetch::new();

        fetch
            .expect_get()
            .withf(|url| url == "http://example.test/a")
            .times(1)
            .returning(|_| Ok(b"[]".to_vec()));

        let body = fetch.get("http://example.test/a").await?;

        assert_eq!(body, b"[]");

        Ok(())
    }

    #[test]
    fn status_error_names_url_and_status() {
        let error = FetchError::Status {
            url: "http://example.test/a".to_string(),
            status: StatusCode::NOT_FOUND,
        };

        assert_eq!(
            error.to_string(),
            "http://example.test/a returned status 404 Not Found"
        );
    }
}
