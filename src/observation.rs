//! Range observations and per-transponder range samples
use crate::prelude::TransponderId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Range report from the acoustic modem, already tagged
/// as accepted or rejected upstream.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeObservation {
    /// [TransponderId] this range was measured to
    pub id: TransponderId,
    /// Measured (slant) range, in meters
    pub range_m: f64,
    /// Sampling instant, in milliseconds
    pub timestamp_ms: u64,
    /// Rejection reason, when this range was rejected upstream
    #[cfg_attr(feature = "serde", serde(default))]
    pub rejection: Option<String>,
}

impl RangeObservation {
    /// Builds an accepted [RangeObservation]
    pub fn accepted(id: TransponderId, range_m: f64, timestamp_ms: u64) -> Self {
        Self {
            id,
            range_m,
            timestamp_ms,
            rejection: None,
        }
    }

    /// Builds a rejected [RangeObservation]
    pub fn rejected(id: TransponderId, range_m: f64, timestamp_ms: u64, reason: &str) -> Self {
        Self {
            id,
            range_m,
            timestamp_ms,
            rejection: Some(reason.to_string()),
        }
    }

    /// Returns the rejection reason, if any. An empty reason is no reason.
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection.as_deref().filter(|reason| !reason.is_empty())
    }

    /// Returns true if this range was accepted upstream.
    pub fn is_accepted(&self) -> bool {
        self.rejection_reason().is_none()
    }
}

/// Last two ranges stored for one transponder.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeSample {
    pub(crate) last: f64,
    pub(crate) previous: f64,
}

impl Default for RangeSample {
    fn default() -> Self {
        Self {
            last: f64::NAN,
            previous: f64::NAN,
        }
    }
}

impl RangeSample {
    /// Stores a new range, the last one becomes the previous one.
    pub(crate) fn push(&mut self, range_m: f64) {
        self.previous = self.last;
        self.last = range_m;
    }

    /// Drops the last range.
    pub(crate) fn invalidate(&mut self) {
        self.last = f64::NAN;
    }

    /// Last accepted range, in meters
    pub fn last(&self) -> Option<f64> {
        Some(self.last).filter(|range| !range.is_nan())
    }

    /// Range accepted before the last one, in meters
    pub fn previous(&self) -> Option<f64> {
        Some(self.previous).filter(|range| !range.is_nan())
    }
}
