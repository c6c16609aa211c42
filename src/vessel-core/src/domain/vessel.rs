use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NavigationStatus;

/// The reported state of a vessel at one point in time.
///
/// Field names are canonical, any legacy casing from the position store has to be folded before
/// a snapshot is constructed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VesselSnapshot {
    pub name: Option<String>,
    pub imo: Option<i64>,
    pub mmsi: Option<i64>,
    pub navigation_status: Option<NavigationStatus>,
    /// Speed over ground in knots.
    pub speed: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub destination: Option<String>,
    /// Reported ETA as unix seconds.
    pub eta_epoch: Option<i64>,
    pub eta_utc: Option<DateTime<Utc>>,
    pub dep_port_unlocode: Option<String>,
    pub dest_port_unlocode: Option<String>,
    pub last_position_utc: Option<DateTime<Utc>>,
    pub atd_utc: Option<DateTime<Utc>>,
}

impl VesselSnapshot {
    /// Missing or non-finite speeds count as a vessel standing still.
    pub fn speed_knots(&self) -> f64 {
        self.speed.filter(|v| v.is_finite()).unwrap_or(0.)
    }

    /// Providers report a missing ETA as `0`.
    pub fn eta(&self) -> Option<i64> {
        self.eta_epoch.filter(|v| *v != 0)
    }

    pub fn eta_timestamp(&self) -> Option<DateTime<Utc>> {
        self.eta().and_then(|v| DateTime::from_timestamp(v, 0))
    }

    pub fn destination(&self) -> Option<&str> {
        non_empty(&self.destination)
    }

    pub fn dep_port(&self) -> Option<&str> {
        non_empty(&self.dep_port_unlocode)
    }

    pub fn dest_port(&self) -> Option<&str> {
        non_empty(&self.dest_port_unlocode)
    }

    pub fn has_status(&self, status: &NavigationStatus) -> bool {
        self.navigation_status.as_ref() == Some(status)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(any(test, feature = "test"))]
mod test {
    use chrono::Duration;
    use rand::{Rng, random};

    use super::*;

    impl VesselSnapshot {
        pub fn test_default() -> VesselSnapshot {
            let now = Utc::now();
            let mut rng = rand::rng();

            VesselSnapshot {
                name: Some("SPANACO ADVENTURE".to_string()),
                imo: Some(9014078),
                mmsi: Some(rng.random_range(200_000_000..800_000_000)),
                navigation_status: Some(NavigationStatus::UnderWayUsingEngine),
                speed: Some(12.4),
                latitude: Some(random::<f64>() * 180. - 90.),
                longitude: Some(random::<f64>() * 360. - 180.),
                destination: Some("Cartagena, CO".to_string()),
                eta_epoch: Some((now + Duration::days(3)).timestamp()),
                eta_utc: Some(now + Duration::days(3)),
                dep_port_unlocode: Some("USMIA".to_string()),
                dest_port_unlocode: Some("COCTG".to_string()),
                last_position_utc: Some(now),
                atd_utc: Some(now - Duration::days(2)),
            }
        }
    }
}
