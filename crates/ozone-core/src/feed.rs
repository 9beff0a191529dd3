use crate::{AdvisoryConfig, AdvisoryError};
use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// A type that can produce the raw feed body.
pub trait FeedSource {
    /// Get the full body of the feed as one string.
    fn fetch(&self) -> Result<String, AdvisoryError>;
}

/// The live feed, one GET per fetch.
pub struct HttpFeed {
    url: String,
    timeout: Duration,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AdvisoryConfig) -> Self {
        Self::new(config.feed_url.clone(), config.timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedSource for HttpFeed {
    /// The status code is not checked: an error page is handed on like any
    /// other body and fails when it is parsed.
    fn fetch(&self) -> Result<String, AdvisoryError> {
        info!("Fetching ozone feed — url={}", self.url);
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let response = client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!("Ozone feed answered with non-success status — status={}", status);
        }

        let body = response.text()?;
        debug!("Downloaded ozone feed — status={} bytes={}", status, body.len());
        Ok(body)
    }
}

/// A feed body captured earlier.
pub struct StaticFeed {
    body: String,
}

impl StaticFeed {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }
}

impl FeedSource for StaticFeed {
    fn fetch(&self) -> Result<String, AdvisoryError> {
        Ok(self.body.clone())
    }
}
