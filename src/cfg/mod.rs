#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{constants::DEFAULT_FIX_HISTORY_SIZE, prelude::Error};

mod ambiguity;
pub use ambiguity::AmbiguityReference;

fn default_vehicle_depth() -> f64 {
    0.0
}

fn default_history_size() -> usize {
    DEFAULT_FIX_HISTORY_SIZE
}

/// [Tracker](crate::prelude::Tracker) configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Depth of the plane the vehicle operates in, in meters (positive down).
    /// Slant ranges are flattened to horizontal ranges using the depth of each
    /// baseline origin transponder below this plane, and fixes are reported
    /// at this depth. This is not a 3D solution.
    #[cfg_attr(feature = "serde", serde(default = "default_vehicle_depth"))]
    pub vehicle_depth_m: f64,
    /// [AmbiguityReference] used to select one of the two bilateration candidates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ambiguity: AmbiguityReference,
    /// Number of fixes retained in the tracker history.
    /// Zero disables the history.
    #[cfg_attr(feature = "serde", serde(default = "default_history_size"))]
    pub history_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vehicle_depth_m: default_vehicle_depth(),
            ambiguity: AmbiguityReference::default(),
            history_size: default_history_size(),
        }
    }
}

impl Config {
    /// Returns [Config] that always resolves the ambiguity against
    /// the start location, like legacy LBL trackers did.
    /// You can then customize [Self] as you will.
    pub fn start_referenced_preset() -> Self {
        let mut s = Self::default();
        s.ambiguity = AmbiguityReference::Start;
        s
    }

    /// Copies and returns [Config] with updated vehicle depth (in meters).
    pub fn with_vehicle_depth(&self, depth_m: f64) -> Self {
        let mut s = self.clone();
        s.vehicle_depth_m = depth_m;
        s
    }

    /// Copies and returns [Config] with updated [AmbiguityReference].
    pub fn with_ambiguity_reference(&self, ambiguity: AmbiguityReference) -> Self {
        let mut s = self.clone();
        s.ambiguity = ambiguity;
        s
    }

    /// Copies and returns [Config] with updated history size.
    pub fn with_history_size(&self, size: usize) -> Self {
        let mut s = self.clone();
        s.history_size = size;
        s
    }

    /// Verifies this [Config] is usable.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.vehicle_depth_m.is_finite() {
            return Err(Error::InvalidConfiguration("vehicle depth is not a number"));
        }
        if self.vehicle_depth_m < 0.0 {
            return Err(Error::InvalidConfiguration("negative vehicle depth"));
        }
        Ok(())
    }
}
