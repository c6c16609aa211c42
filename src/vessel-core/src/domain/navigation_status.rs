use std::fmt::{self, Display};

use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::EnumString;

/// Navigational state as reported over AIS by the vessel position provider.
///
/// Parsing is case sensitive and never fails, strings we do not recognize are kept verbatim in
/// [NavigationStatus::Other].
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, SerializeDisplay, DeserializeFromStr)]
pub enum NavigationStatus {
    #[strum(serialize = "Under way using engine")]
    UnderWayUsingEngine,
    #[strum(serialize = "At anchor")]
    AtAnchor,
    #[strum(serialize = "Not under command")]
    NotUnderCommand,
    #[strum(serialize = "Restricted manoeuvrability")]
    RestrictedManoeuvrability,
    #[strum(serialize = "Constrained by her draught")]
    ConstrainedByDraught,
    #[strum(serialize = "Moored")]
    Moored,
    #[strum(serialize = "Aground")]
    Aground,
    #[strum(serialize = "Engaged in fishing")]
    EngagedInFishing,
    #[strum(serialize = "Under way sailing")]
    UnderWaySailing,
    #[strum(serialize = "Berthed")]
    Berthed,
    #[strum(serialize = "Not defined")]
    NotDefined,
    #[strum(default)]
    Other(String),
}

impl NavigationStatus {
    /// Maps the numeric navigational status of AIS position reports (ITU-R M.1371).
    pub fn from_ais_code(code: i32) -> Self {
        match code {
            0 => Self::UnderWayUsingEngine,
            1 => Self::AtAnchor,
            2 => Self::NotUnderCommand,
            3 => Self::RestrictedManoeuvrability,
            4 => Self::ConstrainedByDraught,
            5 => Self::Moored,
            6 => Self::Aground,
            7 => Self::EngagedInFishing,
            8 => Self::UnderWaySailing,
            9..=14 => Self::Other(format!("Reserved {code}")),
            _ => Self::NotDefined,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::UnderWayUsingEngine => "Under way using engine",
            Self::AtAnchor => "At anchor",
            Self::NotUnderCommand => "Not under command",
            Self::RestrictedManoeuvrability => "Restricted manoeuvrability",
            Self::ConstrainedByDraught => "Constrained by her draught",
            Self::Moored => "Moored",
            Self::Aground => "Aground",
            Self::EngagedInFishing => "Engaged in fishing",
            Self::UnderWaySailing => "Under way sailing",
            Self::Berthed => "Berthed",
            Self::NotDefined => "Not defined",
            Self::Other(v) => v,
        }
    }

    /// Statuses that can only be reported by a vessel that is moving.
    pub fn is_transit(&self) -> bool {
        matches!(
            self,
            Self::UnderWayUsingEngine
                | Self::UnderWaySailing
                | Self::EngagedInFishing
                | Self::RestrictedManoeuvrability
        )
    }

    /// Statuses that indicate the vessel has stopped.
    ///
    /// `Moored` is not part of this set, it is validated separately by the classifier.
    pub fn is_stationary(&self) -> bool {
        matches!(
            self,
            Self::AtAnchor | Self::Berthed | Self::Aground | Self::NotUnderCommand
        )
    }
}

impl Display for NavigationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
