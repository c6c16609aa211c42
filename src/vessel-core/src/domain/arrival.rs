use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ArrivalConfidence {
    High,
    Medium,
    Low,
}

/// Which classification rule produced an [ArrivalResult].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ArrivalMethod {
    NavigationStatus,
    MooredValidation,
    PortChange,
    EtaSpeedAnalysis,
    DestinationChange,
    None,
}

/// Advisory verdict on whether a vessel has reached its reported destination.
///
/// Computed on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalResult {
    pub has_arrived: bool,
    pub confidence: ArrivalConfidence,
    /// Human readable, not meant to be parsed.
    pub reason: String,
    pub arrival_method: ArrivalMethod,
    pub estimated_arrival_time: Option<DateTime<Utc>>,
    pub next_destination: Option<String>,
}

/// Colour family used when rendering an [ArrivalResult] as a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BadgeTone {
    Green,
    Yellow,
    Orange,
    Blue,
}

impl ArrivalResult {
    pub fn badge_tone(&self) -> BadgeTone {
        if !self.has_arrived {
            return BadgeTone::Blue;
        }
        match self.confidence {
            ArrivalConfidence::High => BadgeTone::Green,
            ArrivalConfidence::Medium => BadgeTone::Yellow,
            ArrivalConfidence::Low => BadgeTone::Orange,
        }
    }

    pub fn badge_label(&self) -> String {
        if self.has_arrived {
            format!("Arrived ({})", self.confidence)
        } else {
            "In transit".to_string()
        }
    }
}
