use crate::prelude::{GeoPosition, TransponderId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [FixQuality] tells which kind of observation produced a [Fix].
#[derive(Default, Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixQuality {
    /// Fix formed on an accepted range and the last range
    /// of the previous transponder.
    #[default]
    Accepted,
    /// Fix formed while processing a rejected range. The rejected range
    /// itself is not used: this fix relies on older ranges only.
    Rejected,
}

impl std::fmt::Display for FixQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Position fix, disambiguated by the [Tracker](crate::prelude::Tracker).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fix {
    /// Vehicle [GeoPosition]
    pub position: GeoPosition,
    /// Timestamp of the observation that produced this fix, in milliseconds
    pub timestamp_ms: u64,
    /// Baseline (previous, current transponder) this fix was solved on
    pub baseline: (TransponderId, TransponderId),
    /// [FixQuality]
    pub quality: FixQuality,
}

impl std::fmt::Display for Fix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}ms ({}->{}, {}) {}",
            self.timestamp_ms, self.baseline.0, self.baseline.1, self.quality, self.position
        )
    }
}

/// Continuity state: last known position and when it was last updated.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackedFix {
    /// Last known [GeoPosition]
    pub position: GeoPosition,
    /// Timestamp of the last fix, in milliseconds.
    /// None until the first fix following a reset.
    pub timestamp_ms: Option<u64>,
}

impl TrackedFix {
    /// [TrackedFix] at the start location
    pub(crate) fn start(position: GeoPosition) -> Self {
        Self {
            position,
            timestamp_ms: None,
        }
    }
}

impl From<&Fix> for TrackedFix {
    fn from(fix: &Fix) -> Self {
        Self {
            position: fix.position,
            timestamp_ms: Some(fix.timestamp_ms),
        }
    }
}
