use crate::prelude::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference location against which the two bilateration
/// candidates are compared. The closest candidate wins.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AmbiguityReference {
    /// Compare to the last known position (continuity).
    /// The vehicle is assumed not to move further than the
    /// ambiguity gap between two consecutive fixes.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "last-known", alias = "last_known"))]
    LastKnown,

    /// Always compare to the start location. Only meaningful when
    /// the vehicle operates close to its start location, on one side
    /// of every baseline.
    #[cfg_attr(feature = "serde", serde(alias = "start"))]
    Start,
}

impl std::fmt::Display for AmbiguityReference {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::LastKnown => write!(fmt, "last-known"),
            Self::Start => write!(fmt, "start"),
        }
    }
}

impl std::str::FromStr for AmbiguityReference {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-known" | "last_known" | "lastknown" => Ok(Self::LastKnown),
            "start" => Ok(Self::Start),
            _ => Err(Error::UnknownAmbiguityReference),
        }
    }
}
