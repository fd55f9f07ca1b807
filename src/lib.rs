#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod bilateration;
mod cfg;
mod constants;
mod error;
mod frame;
mod observation;
mod position;
mod shared;
mod tracker;
mod transponder;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::bilateration::{solve, Candidate, Candidates};
    pub use crate::cfg::{AmbiguityReference, Config};
    pub use crate::error::Error;
    pub use crate::frame::{build_frames, BaselineFrame};
    pub use crate::observation::{RangeObservation, RangeSample};
    pub use crate::position::GeoPosition;
    pub use crate::shared::SharedTracker;
    pub use crate::tracker::{Fix, FixQuality, TrackedFix, Tracker};
    pub use crate::transponder::{Transponder, TransponderId};
    // re-export
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
