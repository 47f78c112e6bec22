//! Fetching the two data sources.
//!
//! The update flow talks to a [`Source`], so the HTTP client can be swapped
//! for an in-memory source in tests.

use crate::config::HttpConfig;
use crate::error::FetchError;
use crate::utils::check_response_status;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Something that can answer a GET for a URL.
#[async_trait]
pub trait Source: Send + Sync {
    /// Fetches the body of `url` as text.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;

    /// Fetches the body of `url` and decodes it as JSON.
    async fn fetch_json(&self, url: &str) -> Result<JsonValue, FetchError> {
        let body = self.fetch_text(url).await?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// HTTP source backed by `reqwest`.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Creates a client with the configured user agent and timeout.
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(true);
        if config.timeout_sec > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_sec));
        }

        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Source for HttpSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let response = check_response_status(url, response)?;

        response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    #[async_trait]
    impl Source for Fixed {
        async fn fetch_text(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_fetch_json_decodes_body() {
        let value = Fixed(r#"{"Ch 1": 1000}"#)
            .fetch_json("https://example.com/words")
            .await
            .unwrap();
        assert_eq!(value["Ch 1"], 1000);
    }

    #[tokio::test]
    async fn test_fetch_json_reports_url_on_bad_body() {
        let err = Fixed("<html>")
            .fetch_json("https://example.com/words")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Decode { ref url, .. } if url == "https://example.com/words"
        ));
    }

    #[test]
    fn test_client_builds_with_and_without_timeout() {
        let mut config = HttpConfig::default();
        assert!(HttpSource::new(&config).is_ok());
        config.timeout_sec = 0;
        assert!(HttpSource::new(&config).is_ok());
    }
}
