pub mod advisory;
pub mod envelope;
pub mod feed;
pub mod handler;
pub mod response;
pub mod station;

use envelope::EnvelopeRepair;
use std::time::Duration;
use thiserror::Error;

/// Public ozone report of the Austrian Federal Environment Agency.
pub const FEED_URL: &str = "https://luft.umweltbundesamt.at/pub/ozonbericht/aktuell.json";

/// Vienna, Stephansplatz.
pub const STATION_ID: &str = "09:STEF";

const FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Feed request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Feed body too short for envelope repair: {len} chars, need more than {needed}")]
    EnvelopeTooShort { len: usize, needed: usize },
    #[error("Feed is not a valid JSON station array: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Station {0} not found in feed")]
    StationNotFound(String),
}

impl AdvisoryError {
    /// Whether the handler answers this failure with the fallback message.
    /// Transport failures are left to the host.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AdvisoryError::Transport(_))
    }
}

/// Everything one invocation needs to know about where to look.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryConfig {
    pub feed_url: String,
    pub station_id: String,
    pub envelope: EnvelopeRepair,
    pub timeout: Duration,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            feed_url: FEED_URL.to_string(),
            station_id: STATION_ID.to_string(),
            envelope: EnvelopeRepair::default(),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdvisoryConfig::default();
        assert_eq!(config.station_id, "09:STEF");
        assert!(config.feed_url.ends_with("/ozonbericht/aktuell.json"));
        assert_eq!(config.envelope.prefix_len, 14);
        assert_eq!(config.envelope.suffix_len, 5);
    }

    #[test]
    fn test_only_transport_is_unrecoverable() {
        assert!(AdvisoryError::StationNotFound("09:STEF".into()).is_recoverable());
        assert!(AdvisoryError::EnvelopeTooShort { len: 3, needed: 19 }.is_recoverable());

        let json = serde_json::from_str::<Vec<u8>>("[").unwrap_err();
        assert!(AdvisoryError::Json(json).is_recoverable());
    }
}
