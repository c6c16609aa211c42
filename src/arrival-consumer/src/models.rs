use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_with::{DefaultOnError, DeserializeAs, DisplayFromStr, PickFirst, serde_as};
use tracing::warn;
use vessel_core::{ArrivalResult, BadgeTone, NavigationStatus, VesselSnapshot};

/// A row of the vessel position store as produced by the position sync job.
///
/// Rows written by older versions of the sync job use upper cased `_UTC` suffixes and some
/// providers send numbers as strings, both are folded here so the classifier only ever sees a
/// canonical [VesselSnapshot].
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VesselPositionRecord {
    #[serde(default, alias = "vessel_name")]
    pub name: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub imo: Option<i64>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub mmsi: Option<i64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub navigation_status: Option<RawNavigationStatus>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, LeadingFloat)>>>")]
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, LeadingFloat)>>>")]
    #[serde(default, alias = "latitude")]
    pub lat: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, LeadingFloat)>>>")]
    #[serde(default, alias = "longitude")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub eta_epoch: Option<f64>,
    #[serde(default, alias = "eta_UTC")]
    pub eta_utc: Option<String>,
    #[serde(default)]
    pub dep_port_unlocode: Option<String>,
    #[serde(default)]
    pub dest_port_unlocode: Option<String>,
    #[serde(default, alias = "last_position_UTC")]
    pub last_position_utc: Option<String>,
    #[serde(default, alias = "atd_UTC")]
    pub atd_utc: Option<String>,
}

/// Navigational status as either the provider string or the numeric AIS code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNavigationStatus {
    Code(i32),
    Text(String),
}

/// One input line, the previous snapshot is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrivalRequest {
    pub current: VesselPositionRecord,
    #[serde(default)]
    pub previous: Option<VesselPositionRecord>,
}

/// One output line, carrying the badge the result is rendered with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalVerdict {
    pub imo: Option<i64>,
    pub mmsi: Option<i64>,
    pub name: Option<String>,
    pub badge_tone: BadgeTone,
    pub badge_label: String,
    pub result: ArrivalResult,
}

impl ArrivalVerdict {
    pub fn new(snapshot: &VesselSnapshot, result: ArrivalResult) -> Self {
        Self {
            imo: snapshot.imo,
            mmsi: snapshot.mmsi,
            name: snapshot.name.clone(),
            badge_tone: result.badge_tone(),
            badge_label: result.badge_label(),
            result,
        }
    }
}

impl RawNavigationStatus {
    pub fn into_status(self) -> Option<NavigationStatus> {
        match self {
            RawNavigationStatus::Code(code) => Some(NavigationStatus::from_ais_code(code)),
            RawNavigationStatus::Text(text) if text.is_empty() => None,
            // Parsing falls back to `NavigationStatus::Other` and cannot fail
            RawNavigationStatus::Text(text) => text.parse().ok(),
        }
    }
}

impl From<VesselPositionRecord> for VesselSnapshot {
    fn from(value: VesselPositionRecord) -> Self {
        let VesselPositionRecord {
            name,
            imo,
            mmsi,
            navigation_status,
            speed,
            lat,
            lon,
            destination,
            eta_epoch,
            eta_utc,
            dep_port_unlocode,
            dest_port_unlocode,
            last_position_utc,
            atd_utc,
        } = value;

        VesselSnapshot {
            name,
            imo,
            mmsi,
            navigation_status: navigation_status.and_then(RawNavigationStatus::into_status),
            speed,
            latitude: lat,
            longitude: lon,
            destination,
            eta_epoch: eta_epoch.filter(|v| v.is_finite()).map(|v| v as i64),
            eta_utc: parse_timestamp("eta_utc", eta_utc),
            dep_port_unlocode,
            dest_port_unlocode,
            last_position_utc: parse_timestamp("last_position_utc", last_position_utc),
            atd_utc: parse_timestamp("atd_utc", atd_utc),
        }
    }
}

/// Reads the leading decimal number of a string, providers append units such as `12 kn`.
pub struct LeadingFloat;

impl<'de> DeserializeAs<'de, f64> for LeadingFloat {
    fn deserialize_as<D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        leading_float(&value)
            .ok_or_else(|| de::Error::custom(format!("'{value}' does not start with a number")))
    }
}

fn leading_float(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')))
        .unwrap_or(value.len());

    // `1e` and `1.5-` are not numbers on their own, so shrink until a prefix parses
    (1..=end).rev().find_map(|i| value[..i].parse().ok())
}

/// Accepts RFC 3339 and timezone-less timestamps, the latter are assumed to be UTC.
fn parse_timestamp(field: &'static str, value: Option<String>) -> Option<DateTime<Utc>> {
    let value = value.filter(|v| !v.is_empty())?;

    if let Ok(v) = DateTime::parse_from_rfc3339(&value) {
        return Some(v.with_timezone(&Utc));
    }

    match NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S%.f"))
    {
        Ok(v) => Some(v.and_utc()),
        Err(e) => {
            warn!("invalid {field} '{value}': {e:?}");
            None
        }
    }
}
