use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("'{url}' answered {status}")]
    BadStatus { url: String, status: StatusCode },
}

/// Navigates to a URL and hands back the rendered document for querying.
#[async_trait]
pub trait Browser {
    async fn goto(&self, url: &str) -> Result<String, NavigationError>;
}

/// Production `Browser` backed by a single reqwest client. The client is
/// reused for the whole run, listing and detail pages alike.
pub struct HttpBrowser {
    client: Client,
}

impl HttpBrowser {
    pub fn new(navigation_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(navigation_timeout)
            .build()
            .expect("Error creating HTTP client");

        Self { client }
    }
}

#[async_trait]
impl Browser for HttpBrowser {
    #[instrument(skip(self))]
    async fn goto(&self, url: &str) -> Result<String, NavigationError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| NavigationError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NavigationError::BadStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| NavigationError::Request {
                url: url.to_string(),
                source,
            })?;

        debug!("Got {} bytes from '{}'", body.len(), url);

        Ok(body)
    }
}
