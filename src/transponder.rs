//! Seabed transponders
use crate::prelude::GeoPosition;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [TransponderId] identifies a transponder by its index within the ring.
/// Channel labels (for example "ch3") are resolved by the caller.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransponderId(pub u16);

impl TransponderId {
    /// Index of this transponder within the ring
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for TransponderId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TransponderId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed acoustic beacon with a known geographic position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transponder {
    /// [TransponderId]
    pub id: TransponderId,
    /// Readable name
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// [GeoPosition] of this transponder
    pub position: GeoPosition,
}

impl Transponder {
    /// Builds a new [Transponder], named after its identifier,
    /// which is also its index in the ring.
    pub fn new(id: u16, position: GeoPosition) -> Self {
        let id = TransponderId(id);
        Self {
            id,
            name: format!("T{}", id),
            position,
        }
    }

    /// Copies and returns [Transponder] with updated name.
    pub fn with_name(&self, name: &str) -> Self {
        let mut s = self.clone();
        s.name = name.to_string();
        s
    }
}

impl std::fmt::Display for Transponder {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({}) {}", self.name, self.id, self.position)
    }
}
