use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::{ArrivalConfidence, ArrivalMethod, ArrivalResult, NavigationStatus, VesselSnapshot};

static STATIONARY_SPEED_LIMIT_KNOTS: f64 = 3.;
static MOORED_SPEED_LIMIT_KNOTS: f64 = 1.;
static OVERDUE_SPEED_LIMIT_KNOTS: f64 = 2.;
static MOORED_ETA_WINDOW: Duration = Duration::days(1);
static MIN_ETA_OVERDUE: Duration = Duration::hours(6);
static DEFAULT_TIME_THRESHOLD: Duration = Duration::hours(2);

/// Everything a rule is allowed to look at.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalContext<'a> {
    pub current: &'a VesselSnapshot,
    pub previous: Option<&'a VesselSnapshot>,
    pub now: DateTime<Utc>,
}

/// A single guard clause of the classifier.
///
/// Returning `Some` ends the evaluation, `None` passes the snapshot on to the next rule.
pub trait ArrivalRule: Send + Sync {
    fn method(&self) -> ArrivalMethod;
    fn evaluate(&self, ctx: &ArrivalContext<'_>) -> Option<ArrivalResult>;
}

/// Decides whether a vessel has arrived at its reported destination by running an ordered list of
/// rules, the first rule that produces a verdict wins.
///
/// Direct AIS signals are checked before ETA heuristics, free text destination comparisons come
/// last.
#[derive(Clone)]
pub struct ArrivalClassifier {
    rules: Vec<Arc<dyn ArrivalRule>>,
    // TODO: gate `EtaSpeedAnalysis` on this instead of `MIN_ETA_OVERDUE` once the intended
    // semantics of the threshold are confirmed, until then it is accepted but unused.
    pub time_threshold: Duration,
}

/// Classifies with the default rule set and the current wall clock.
pub fn detect_vessel_arrival(
    current: &VesselSnapshot,
    previous: Option<&VesselSnapshot>,
) -> ArrivalResult {
    ArrivalClassifier::default().classify(current, previous)
}

impl Default for ArrivalClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_THRESHOLD)
    }
}

impl ArrivalClassifier {
    pub fn new(time_threshold: Duration) -> Self {
        Self {
            rules: vec![
                Arc::new(TransitStatus),
                Arc::new(StationaryStatus),
                Arc::new(MooredValidation),
                Arc::new(PortChange),
                Arc::new(EtaSpeedAnalysis),
                Arc::new(DestinationChange),
            ],
            time_threshold,
        }
    }

    pub fn methods(&self) -> impl Iterator<Item = ArrivalMethod> + '_ {
        self.rules.iter().map(|r| r.method())
    }

    pub fn classify(
        &self,
        current: &VesselSnapshot,
        previous: Option<&VesselSnapshot>,
    ) -> ArrivalResult {
        self.classify_at(current, previous, Utc::now())
    }

    /// Same as [ArrivalClassifier::classify] but evaluated at `now`, identical inputs always
    /// produce identical results.
    pub fn classify_at(
        &self,
        current: &VesselSnapshot,
        previous: Option<&VesselSnapshot>,
        now: DateTime<Utc>,
    ) -> ArrivalResult {
        let ctx = ArrivalContext {
            current,
            previous,
            now,
        };

        let result = self
            .rules
            .iter()
            .find_map(|r| r.evaluate(&ctx))
            .unwrap_or_else(|| in_normal_transit(current));

        debug!(
            method = %result.arrival_method,
            has_arrived = result.has_arrived,
            confidence = %result.confidence,
            "classified vessel arrival"
        );

        result
    }
}

fn in_normal_transit(current: &VesselSnapshot) -> ArrivalResult {
    verdict(
        current,
        false,
        ArrivalConfidence::High,
        ArrivalMethod::None,
        "Vessel in normal transit".to_string(),
        None,
    )
}

fn verdict(
    current: &VesselSnapshot,
    has_arrived: bool,
    confidence: ArrivalConfidence,
    arrival_method: ArrivalMethod,
    reason: String,
    estimated_arrival_time: Option<DateTime<Utc>>,
) -> ArrivalResult {
    ArrivalResult {
        has_arrived,
        confidence,
        reason,
        arrival_method,
        estimated_arrival_time,
        next_destination: current.destination().map(ToString::to_string),
    }
}

pub struct TransitStatus;

impl ArrivalRule for TransitStatus {
    fn method(&self) -> ArrivalMethod {
        ArrivalMethod::NavigationStatus
    }

    fn evaluate(&self, ctx: &ArrivalContext<'_>) -> Option<ArrivalResult> {
        let status = ctx.current.navigation_status.as_ref()?;
        if !status.is_transit() {
            return None;
        }

        Some(verdict(
            ctx.current,
            false,
            ArrivalConfidence::High,
            self.method(),
            format!("Vessel in transit: \"{status}\""),
            None,
        ))
    }
}

pub struct StationaryStatus;

impl ArrivalRule for StationaryStatus {
    fn method(&self) -> ArrivalMethod {
        ArrivalMethod::NavigationStatus
    }

    fn evaluate(&self, ctx: &ArrivalContext<'_>) -> Option<ArrivalResult> {
        let status = ctx.current.navigation_status.as_ref()?;
        let speed = ctx.current.speed_knots();
        if !status.is_stationary() || speed > STATIONARY_SPEED_LIMIT_KNOTS {
            return None;
        }

        Some(verdict(
            ctx.current,
            true,
            ArrivalConfidence::High,
            self.method(),
            format!("Vessel stopped: \"{status}\" at {speed} knots"),
            ctx.current.last_position_utc,
        ))
    }
}

/// A `Moored` status only counts as an arrival when speed, ETA and destination agree. Always
/// terminal for moored vessels.
pub struct MooredValidation;

impl ArrivalRule for MooredValidation {
    fn method(&self) -> ArrivalMethod {
        ArrivalMethod::MooredValidation
    }

    fn evaluate(&self, ctx: &ArrivalContext<'_>) -> Option<ArrivalResult> {
        let current = ctx.current;
        if !current.has_status(&NavigationStatus::Moored) {
            return None;
        }

        let speed = current.speed_knots();
        let eta = current.eta().filter(|v| *v > 0);
        let now = ctx.now.timestamp();

        let near_eta = eta.is_some_and(|eta| now >= eta - MOORED_ETA_WINDOW.num_seconds());

        if speed <= MOORED_SPEED_LIMIT_KNOTS && near_eta && current.destination().is_some() {
            Some(verdict(
                current,
                true,
                ArrivalConfidence::High,
                self.method(),
                format!("Vessel moored at destination at {speed} knots close to ETA"),
                current.last_position_utc,
            ))
        } else {
            Some(verdict(
                current,
                false,
                ArrivalConfidence::Medium,
                self.method(),
                format!(
                    "Vessel moored but arrival criteria not met (speed: {speed}, ETA: {})",
                    if eta.is_some() { "defined" } else { "not defined" }
                ),
                None,
            ))
        }
    }
}

/// The previous leg's destination port becoming the departure port means the leg was completed.
pub struct PortChange;

impl ArrivalRule for PortChange {
    fn method(&self) -> ArrivalMethod {
        ArrivalMethod::PortChange
    }

    fn evaluate(&self, ctx: &ArrivalContext<'_>) -> Option<ArrivalResult> {
        let previous = ctx.previous?;
        let previous_dest = previous.dest_port()?;
        let current_dep = ctx.current.dep_port()?;

        if current_dep != previous_dest || previous.dep_port() == Some(current_dep) {
            return None;
        }

        Some(verdict(
            ctx.current,
            true,
            ArrivalConfidence::High,
            self.method(),
            format!("Departure port changed to previous destination: {current_dep}"),
            ctx.current.atd_utc,
        ))
    }
}

pub struct EtaSpeedAnalysis;

impl ArrivalRule for EtaSpeedAnalysis {
    fn method(&self) -> ArrivalMethod {
        ArrivalMethod::EtaSpeedAnalysis
    }

    fn evaluate(&self, ctx: &ArrivalContext<'_>) -> Option<ArrivalResult> {
        let current = ctx.current;
        let eta = current.eta()?;
        let now = ctx.now.timestamp();
        let speed = current.speed_knots();

        if now <= eta || speed > OVERDUE_SPEED_LIMIT_KNOTS || current.destination().is_none() {
            return None;
        }

        let overdue_secs = now - eta;
        if overdue_secs < MIN_ETA_OVERDUE.num_seconds() {
            return None;
        }

        let hours_overdue = (overdue_secs as f64 / 3600.).round();

        Some(verdict(
            current,
            true,
            ArrivalConfidence::Medium,
            self.method(),
            format!("ETA exceeded by {hours_overdue} hours at low speed ({speed} knots)"),
            current.eta_timestamp(),
        ))
    }
}

/// A destination replaced by an unrelated one suggests the old destination was reached.
pub struct DestinationChange;

impl ArrivalRule for DestinationChange {
    fn method(&self) -> ArrivalMethod {
        ArrivalMethod::DestinationChange
    }

    fn evaluate(&self, ctx: &ArrivalContext<'_>) -> Option<ArrivalResult> {
        let previous = ctx.previous?.destination()?;
        let current = ctx.current.destination.as_deref().unwrap_or_default();

        if current == previous {
            return None;
        }

        let previous_lower = previous.to_lowercase();
        let current_lower = current.to_lowercase();

        if previous_lower.contains(first_token(&current_lower))
            || current_lower.contains(first_token(&previous_lower))
        {
            return None;
        }

        Some(verdict(
            ctx.current,
            true,
            ArrivalConfidence::Low,
            self.method(),
            format!("Destination changed significantly: \"{previous}\" -> \"{current}\""),
            ctx.current.last_position_utc,
        ))
    }
}

fn first_token(destination: &str) -> &str {
    destination.split(',').next().unwrap_or_default()
}
