use crate::station::StationRecord;
use std::fmt;

/// Information threshold for ozone (one-hour mean, µg/m³).
pub const INFORMATION_THRESHOLD: f64 = 150.0;
/// Alert threshold for ozone (one-hour mean, µg/m³).
pub const ALERT_THRESHOLD: f64 = 240.0;

pub const CARD_TITLE: &str = "JService.io";

pub const FALLBACK_TEXT: &str =
    "Something went wrong while processing the data. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Low,
    Medium,
    High,
    /// Exactly at the alert threshold, or not a number at all.
    Unknown,
}

impl Tier {
    /// Guards are evaluated in order and the first one that holds wins.
    /// A reading of exactly 240 passes none of them and is reported as
    /// Unknown, the same as NaN.
    pub fn classify(ozon1h: f64) -> Tier {
        if ozon1h < INFORMATION_THRESHOLD {
            Tier::Low
        } else if (INFORMATION_THRESHOLD..ALERT_THRESHOLD).contains(&ozon1h) {
            Tier::Medium
        } else if ozon1h > ALERT_THRESHOLD {
            Tier::High
        } else {
            Tier::Unknown
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Tier::Low => {
                "The ozone concentration is very low. No danger to human health exists."
            }
            Tier::Medium => {
                "The ozone concentration is medium. Ozone can cause damage to human health."
            }
            Tier::High => {
                "The ozone concentration is very high. Danger to human health exists. \
                 Please consult your doctor or pharmacist for more information. \
                 Additionally, please consult the website of Federal Environment Agency \
                 for more details."
            }
            Tier::Unknown => {
                "The measured value seems to be wrong or not available. \
                 Please consult the website of Federal Environment Agency for more information."
            }
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
            Tier::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Text of one response. Lives for one invocation only.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub tier: Option<Tier>,
    pub title: &'static str,
    pub text: String,
}

impl Advisory {
    pub fn compose(station: &StationRecord) -> Self {
        let tier = Tier::classify(station.ozon1h.value());
        let text = format!(
            "This is the most recent update of the ground-level ozone concentration at {} from {}. \
             The ozone concentration of the last hour is {} micrograms per cubic meter of air. {}",
            station.name_or_unknown(),
            station.timestamp_or_unknown(),
            station.ozon1h,
            tier.advice()
        );
        Self {
            tier: Some(tier),
            title: CARD_TITLE,
            text,
        }
    }

    pub fn fallback() -> Self {
        Self {
            tier: None,
            title: CARD_TITLE,
            text: FALLBACK_TEXT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::Reading;

    fn stephansplatz(ozon1h: Reading) -> StationRecord {
        StationRecord {
            id: "09:STEF".into(),
            name: Some("Wien Stephansplatz".into()),
            ozon1h_timestamp_utc: Some("2023-06-01T12:00:00Z".into()),
            ozon1h,
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Tier::classify(0.0), Tier::Low);
        assert_eq!(Tier::classify(149.9), Tier::Low);
        assert_eq!(Tier::classify(150.0), Tier::Medium);
        assert_eq!(Tier::classify(239.99), Tier::Medium);
        assert_eq!(Tier::classify(240.0), Tier::Unknown);
        assert_eq!(Tier::classify(240.01), Tier::High);
        assert_eq!(Tier::classify(f64::NAN), Tier::Unknown);
        assert_eq!(Tier::classify(f64::INFINITY), Tier::High);
        assert_eq!(Tier::classify(-5.0), Tier::Low);
    }

    #[test]
    fn test_compose() {
        let advisory = Advisory::compose(&stephansplatz(Reading::Number(120.0)));
        assert_eq!(advisory.tier, Some(Tier::Low));
        assert_eq!(advisory.title, "JService.io");
        assert_eq!(
            advisory.text,
            "This is the most recent update of the ground-level ozone concentration at \
             Wien Stephansplatz from 2023-06-01T12:00:00Z. The ozone concentration of the \
             last hour is 120 micrograms per cubic meter of air. The ozone concentration is \
             very low. No danger to human health exists."
        );
    }

    #[test]
    fn test_compose_numeric_string() {
        let advisory = Advisory::compose(&stephansplatz(Reading::Text("180".into())));
        assert_eq!(advisory.tier, Some(Tier::Medium));
        assert!(advisory.text.contains(" 180 micrograms"));
        assert!(advisory.text.ends_with("Ozone can cause damage to human health."));
    }

    #[test]
    fn test_compose_missing_reading() {
        let advisory = Advisory::compose(&stephansplatz(Reading::Missing));
        assert_eq!(advisory.tier, Some(Tier::Unknown));
        assert!(advisory.text.contains("seems to be wrong"));
    }

    #[test]
    fn test_fallback() {
        let advisory = Advisory::fallback();
        assert_eq!(advisory.tier, None);
        assert_eq!(advisory.text, FALLBACK_TEXT);
    }
}
