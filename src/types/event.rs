//! Event record types
//!
//! An [`EventRecord`] is one cached event listing. Records are only
//! created by the ingestion pipeline and only removed by the retention
//! sweep; they are never updated in place.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Coarse estimate of transport demand at or after an event
///
/// Values outside `high`/`medium`/`low` (or a missing value) map to
/// [`Demand::Unknown`], which always ranks last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Demand {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

impl Demand {
    /// Sort rank, lower is more important
    pub fn rank(self) -> u8 {
        match self {
            Demand::High => 1,
            Demand::Medium => 2,
            Demand::Low => 3,
            Demand::Unknown => 4,
        }
    }

    /// Lowercase label as stored in the `demand` column
    pub fn as_str(self) -> &'static str {
        match self {
            Demand::High => "high",
            Demand::Medium => "medium",
            Demand::Low => "low",
            Demand::Unknown => "unknown",
        }
    }

    /// Parse a label, mapping anything unrecognised to `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Demand::High,
            "medium" => Demand::Medium,
            "low" => Demand::Low,
            _ => Demand::Unknown,
        }
    }
}

impl From<String> for Demand {
    fn from(label: String) -> Self {
        Demand::from_label(&label)
    }
}

impl std::fmt::Display for Demand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provenance tag stored with every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// Broad seven-day sweep
    #[default]
    Weekly,
    /// Incremental same-day sweep
    Daily,
    /// Inserted directly, not through a provider refresh
    Manual,
}

impl EventSource {
    pub fn as_str(self) -> &'static str {
        match self {
            EventSource::Weekly => "weekly",
            EventSource::Daily => "daily",
            EventSource::Manual => "manual",
        }
    }

    /// Parse a stored label
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "weekly" => Some(EventSource::Weekly),
            "daily" => Some(EventSource::Daily),
            "manual" => Some(EventSource::Manual),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified event ready to be inserted
///
/// `name` and `date` are required, but they are left optional here so the
/// store's NOT NULL constraints are the single place that rejects them.
/// A batch containing such a row is rolled back as a whole.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewEvent {
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub capacity: Option<i64>,
    pub event_type: Option<String>,
    pub demand: Demand,
    pub description: String,
    pub size_class: bool,
}

impl NewEvent {
    /// Minimal record with the two required fields, classified as not-small
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A stored event listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Surrogate id assigned by the store
    pub id: i64,
    pub date: NaiveDate,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(rename = "startTime", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub capacity: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    pub demand: Demand,
    #[serde(default)]
    pub description: String,
    /// True iff the capacity is known and below the small-venue threshold
    #[serde(rename = "sizeClass")]
    pub size_class: bool,
    #[serde(rename = "ingestedAt")]
    pub ingested_at: DateTime<Utc>,
    pub source: EventSource,
}
