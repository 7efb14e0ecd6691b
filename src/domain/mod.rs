//! Domain types for the gadget lifecycle.
//!
//! A gadget moves between four statuses. Storage keeps the status as its
//! variant name, and the API accepts and emits the same spelling.

pub mod flair;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a gadget.
///
/// # Examples
///
/// ```rust
/// use gadgetry::domain::GadgetStatus;
///
/// let status: GadgetStatus = "Deployed".parse().unwrap();
/// assert!(status.can_transition_to(GadgetStatus::Destroyed));
/// assert!(!GadgetStatus::Destroyed.can_transition_to(GadgetStatus::Available));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum GadgetStatus {
    #[default]
    #[sea_orm(string_value = "Available")]
    Available,
    #[sea_orm(string_value = "Deployed")]
    Deployed,
    #[sea_orm(string_value = "Destroyed")]
    Destroyed,
    #[sea_orm(string_value = "Decommissioned")]
    Decommissioned,
}

impl GadgetStatus {
    pub const ALL: [Self; 4] = [
        Self::Available,
        Self::Deployed,
        Self::Destroyed,
        Self::Decommissioned,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Deployed => "Deployed",
            Self::Destroyed => "Destroyed",
            Self::Decommissioned => "Decommissioned",
        }
    }

    /// Whether moving from `self` to `next` is a legal lifecycle step.
    ///
    /// Staying in the same status is always allowed. A destroyed gadget can
    /// only be retired, and a retired gadget cannot be redeployed without
    /// first coming back to `Available`.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        match (*self, next) {
            (Self::Destroyed, Self::Available | Self::Deployed)
            | (Self::Decommissioned, Self::Deployed) => false,
            _ => true,
        }
    }

    /// Listed by default when no status filter is given.
    #[must_use]
    pub const fn is_listed_by_default(&self) -> bool {
        !matches!(self, Self::Decommissioned)
    }
}

impl fmt::Display for GadgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the four statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status '{0}'. Expected one of: Available, Deployed, Destroyed, Decommissioned")]
pub struct ParseStatusError(pub String);

impl FromStr for GadgetStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!("Available".parse(), Ok(GadgetStatus::Available));
        assert_eq!("Decommissioned".parse(), Ok(GadgetStatus::Decommissioned));
        assert!("available".parse::<GadgetStatus>().is_err());
        assert!("Lost".parse::<GadgetStatus>().is_err());
        assert!("".parse::<GadgetStatus>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for status in GadgetStatus::ALL {
            assert_eq!(status.to_string().parse(), Ok(status));
        }
    }

    #[test]
    fn test_same_status_is_always_allowed() {
        for status in GadgetStatus::ALL {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn test_transition_table() {
        use GadgetStatus::{Available, Decommissioned, Deployed, Destroyed};

        assert!(Available.can_transition_to(Deployed));
        assert!(Available.can_transition_to(Destroyed));
        assert!(Available.can_transition_to(Decommissioned));
        assert!(Deployed.can_transition_to(Available));
        assert!(Deployed.can_transition_to(Destroyed));
        assert!(Deployed.can_transition_to(Decommissioned));

        assert!(!Destroyed.can_transition_to(Available));
        assert!(!Destroyed.can_transition_to(Deployed));
        assert!(Destroyed.can_transition_to(Decommissioned));

        assert!(Decommissioned.can_transition_to(Available));
        assert!(!Decommissioned.can_transition_to(Deployed));
        assert!(Decommissioned.can_transition_to(Destroyed));
    }

    #[test]
    fn test_default_listing_excludes_decommissioned() {
        assert!(GadgetStatus::Available.is_listed_by_default());
        assert!(GadgetStatus::Destroyed.is_listed_by_default());
        assert!(!GadgetStatus::Decommissioned.is_listed_by_default());
    }

    #[test]
    fn test_serde_uses_variant_names() {
        let json = serde_json::to_string(&GadgetStatus::Deployed).unwrap();
        assert_eq!(json, "\"Deployed\"");
    }
}
