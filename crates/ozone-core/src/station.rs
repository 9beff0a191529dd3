use crate::AdvisoryError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// The one-hour ozone mean as the feed supplied it.
///
/// The publisher sends numbers most of the time but quoted numbers or nothing
/// at all for stations that are offline.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Reading {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Reading {
    /// Concentration in µg/m³, NaN when the feed value is not numeric.
    ///
    /// Text is read as a plain decimal number. Of the non-finite spellings
    /// only `Infinity` is accepted; `inf` or `nan` count as not numeric.
    pub fn value(&self) -> f64 {
        match self {
            Reading::Number(v) => *v,
            Reading::Text(s) => match s.trim() {
                "Infinity" | "+Infinity" => f64::INFINITY,
                "-Infinity" => f64::NEG_INFINITY,
                t => t
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .unwrap_or(f64::NAN),
            },
            Reading::Missing => f64::NAN,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Number(v) => write!(f, "{}", v),
            Reading::Text(s) => write!(f, "{}", s),
            Reading::Missing => f.write_str(UNKNOWN),
        }
    }
}

impl<'de> Deserialize<'de> for Reading {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64().map(Reading::Number).unwrap_or_default(),
            Value::String(s) => Reading::Text(s),
            _ => Reading::Missing,
        })
    }
}

/// One measurement station of the feed. Fields the advisory does not use are
/// ignored.
///
/// Offline stations are published with `null` in place of the timestamp and
/// reading, so nothing but `id` is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationRecord {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Passed through verbatim, never parsed as a date.
    #[serde(
        rename = "ozon1hTimestamp_utc",
        default,
        deserialize_with = "lenient_text"
    )]
    pub ozon1h_timestamp_utc: Option<String>,
    #[serde(default)]
    pub ozon1h: Reading,
}

impl StationRecord {
    pub fn name_or_unknown(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn timestamp_or_unknown(&self) -> &str {
        self.ozon1h_timestamp_utc.as_deref().unwrap_or(UNKNOWN)
    }
}

const UNKNOWN: &str = "unknown";

/// Strings as they are, numbers in their JSON spelling, anything else absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// `id` and `name` of a feed entry, for listing what the feed offers.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSummary {
    pub id: String,
    pub name: Option<String>,
}

/// The repaired feed: the station array, entries kept untyped until one is
/// selected so a malformed neighbour cannot spoil the lookup.
#[derive(Debug, Clone)]
pub struct StationFeed {
    entries: Vec<Value>,
}

impl StationFeed {
    pub fn parse(json: &str) -> Result<Self, AdvisoryError> {
        let entries: Vec<Value> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the record whose `id` equals `station_id` exactly.
    ///
    /// The feed order is not stable, so the array is scanned from the end and
    /// the last matching entry wins.
    pub fn find(&self, station_id: &str) -> Result<StationRecord, AdvisoryError> {
        let entry = self
            .entries
            .iter()
            .rev()
            .find(|e| e.get("id").and_then(Value::as_str) == Some(station_id))
            .ok_or_else(|| AdvisoryError::StationNotFound(station_id.to_string()))?;

        Ok(StationRecord::deserialize(entry)?)
    }

    /// Every entry carrying a string `id`, in feed order.
    pub fn summaries(&self) -> Vec<StationSummary> {
        self.entries
            .iter()
            .filter_map(|e| {
                let id = e.get("id")?.as_str()?.to_string();
                let name = e.get("name").and_then(Value::as_str).map(str::to_string);
                Some(StationSummary { id, name })
            })
            .collect()
    }
}
