//! One invocation: fetch, repair, look up, classify, respond.
//!
//! Everything after the fetch is covered by a single fallback: whatever goes
//! wrong while parsing or composing, the user hears [`FALLBACK_TEXT`] and the
//! session ends. The cause is kept for the log and for the caller. A fetch
//! that fails is returned as an error without any response, leaving it to
//! the host.
//!
//! [`FALLBACK_TEXT`]: crate::advisory::FALLBACK_TEXT

use crate::advisory::Advisory;
use crate::feed::{FeedSource, HttpFeed};
use crate::response::{ResponseEnvelope, ResponseSink};
use crate::station::{StationFeed, StationSummary};
use crate::{AdvisoryConfig, AdvisoryError};
use log::{debug, error, info};

/// What a completed invocation told the user.
#[derive(Debug)]
pub enum Outcome {
    Advisory(Advisory),
    Fallback(AdvisoryError),
}

impl Outcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }
}

pub struct OzoneAdvisory<F> {
    config: AdvisoryConfig,
    feed: F,
}

impl OzoneAdvisory<HttpFeed> {
    /// Handler against the live feed named in `config`.
    pub fn live(config: AdvisoryConfig) -> Self {
        let feed = HttpFeed::from_config(&config);
        Self { config, feed }
    }
}

impl<F: FeedSource> OzoneAdvisory<F> {
    pub fn new(config: AdvisoryConfig, feed: F) -> Self {
        Self { config, feed }
    }

    pub fn config(&self) -> &AdvisoryConfig {
        &self.config
    }

    /// Runs one invocation and hands exactly one payload to `sink`, unless
    /// the feed could not be fetched.
    pub fn handle(&self, sink: &mut impl ResponseSink) -> Result<Outcome, AdvisoryError> {
        let body = self.feed.fetch()?;

        let (payload, outcome) = match self.advise(&body) {
            Ok(advisory) => {
                info!("{}", advisory.text);
                let payload = ResponseEnvelope::from_advisory(&advisory);
                (payload, Outcome::Advisory(advisory))
            }
            Err(e) if e.is_recoverable() => {
                error!("{}", e);
                let fallback = Advisory::fallback();
                info!("{}", fallback.text);
                (ResponseEnvelope::from_advisory(&fallback), Outcome::Fallback(e))
            }
            Err(e) => return Err(e),
        };
        sink.respond(payload);

        Ok(outcome)
    }

    /// Parse and compose stages for a raw feed body.
    pub fn advise(&self, body: &str) -> Result<Advisory, AdvisoryError> {
        let json = self.config.envelope.repair(body)?;
        debug!("{}", json);

        let feed = StationFeed::parse(json)?;
        let station = feed.find(&self.config.station_id)?;
        debug!(
            "Selected station — id={} name={} stations_in_feed={}",
            station.id,
            station.name_or_unknown(),
            feed.len()
        );

        Ok(Advisory::compose(&station))
    }

    /// Stations the feed currently offers, in feed order.
    pub fn stations(&self) -> Result<Vec<StationSummary>, AdvisoryError> {
        let body = self.feed.fetch()?;
        let json = self.config.envelope.repair(&body)?;
        Ok(StationFeed::parse(json)?.summaries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{Tier, FALLBACK_TEXT};
    use crate::feed::StaticFeed;

    fn wrap(json: &str) -> String {
        format!("var ozondata= {};\n\n\n\n", json)
    }

    #[test]
    fn test_advise() {
        let body = wrap(
            r#"[{"id":"09:STEF","name":"Wien Stephansplatz","ozon1hTimestamp_utc":"2023-06-01T12:00:00Z","ozon1h":200}]"#,
        );
        let handler = OzoneAdvisory::new(AdvisoryConfig::default(), StaticFeed::new(""));
        let advisory = handler.advise(&body).unwrap();
        assert_eq!(advisory.tier, Some(Tier::Medium));
    }

    #[test]
    fn test_station_not_found_falls_back() {
        let body = wrap(
            r#"[{"id":"10:ILL1","name":"Illmitz","ozon1hTimestamp_utc":"2023-06-01T12:00:00Z","ozon1h":80}]"#,
        );
        let handler = OzoneAdvisory::new(AdvisoryConfig::default(), StaticFeed::new(body));
        let mut sink: Vec<ResponseEnvelope> = Vec::new();

        let outcome = handler.handle(&mut sink).unwrap();
        assert!(matches!(
            outcome,
            Outcome::Fallback(AdvisoryError::StationNotFound(_))
        ));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].text(), FALLBACK_TEXT);
    }

    #[test]
    fn test_configured_station() {
        let body = wrap(
            r#"[{"id":"10:ILL1","name":"Illmitz","ozon1hTimestamp_utc":"2023-06-01T12:00:00Z","ozon1h":80}]"#,
        );
        let config = AdvisoryConfig {
            station_id: "10:ILL1".into(),
            ..Default::default()
        };
        let handler = OzoneAdvisory::new(config, StaticFeed::new(body));
        let mut sink: Vec<ResponseEnvelope> = Vec::new();

        let outcome = handler.handle(&mut sink).unwrap();
        assert!(!outcome.is_fallback());
        assert!(sink[0].text().contains("Illmitz"));
    }

    #[test]
    fn test_offline_station_gets_unknown_tier() {
        let body = wrap(
            r#"[{"id":"09:STEF","name":"Wien Stephansplatz","ozon1hTimestamp_utc":null,"ozon1h":null}]"#,
        );
        let handler = OzoneAdvisory::new(AdvisoryConfig::default(), StaticFeed::new(body));
        let mut sink: Vec<ResponseEnvelope> = Vec::new();

        let outcome = handler.handle(&mut sink).unwrap();
        assert!(matches!(outcome, Outcome::Advisory(ref a) if a.tier == Some(Tier::Unknown)));
        let text = sink[0].text();
        assert!(text.contains("Wien Stephansplatz from unknown."));
        assert!(text.contains("seems to be wrong or not available"));
        assert_ne!(text, FALLBACK_TEXT);
    }

    #[test]
    fn test_stations() {
        let body = wrap(r#"[{"id":"10:ILL1","name":"Illmitz"},{"id":"09:STEF"}]"#);
        let handler = OzoneAdvisory::new(AdvisoryConfig::default(), StaticFeed::new(body));
        let stations = handler.stations().unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name.as_deref(), Some("Illmitz"));
        assert_eq!(stations[1].name, None);
    }
}
