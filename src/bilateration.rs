//! Planar bilateration
//!
//! Two ranges, measured from both ends of a known baseline, constrain the
//! vehicle to the intersection of two circles. There are 0 or 2 real
//! solutions, mirrored across the baseline. Picking one of them requires
//! auxiliary knowledge and is left to the [Tracker](crate::prelude::Tracker).
use log::debug;

use crate::prelude::{BaselineFrame, GeoPosition};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One solution of the bilateration problem.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    /// Offset across the baseline (local X axis), in meters
    pub x_m: f64,
    /// Offset along the baseline (local Y axis), in meters
    pub y_m: f64,
    /// Geographic [GeoPosition]
    pub position: GeoPosition,
}

/// Both solutions of the bilateration problem. They only differ by the sign
/// of their cross-baseline component, and are both valid with respect
/// to the two range constraints.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidates {
    /// Solution on the positive side of the baseline
    pub primary: Candidate,
    /// Solution on the negative side of the baseline
    pub mirror: Candidate,
}

impl Candidates {
    /// Distances of the primary and mirror solutions to `reference`, in meters.
    pub fn distances_to(&self, reference: &GeoPosition) -> (f64, f64) {
        (
            reference.distance_m(&self.primary.position),
            reference.distance_m(&self.mirror.position),
        )
    }

    /// Returns the [Candidate] closest to `reference`.
    /// Ties are resolved in favor of the primary solution.
    pub fn closest_to(&self, reference: &GeoPosition) -> &Candidate {
        let (primary, mirror) = self.distances_to(reference);
        if primary <= mirror {
            &self.primary
        } else {
            &self.mirror
        }
    }
}

/// Horizontal range, from a slant range measured to a transponder
/// sitting `depth_m` below the vehicle plane.
fn horizontal_range(range_m: f64, depth_m: f64) -> f64 {
    (range_m.powi(2) - depth_m.powi(2)).sqrt()
}

/// Solves the local (x, y) offset, given horizontal ranges to both ends of a baseline
/// of length `baseline_m`. Returns the positive-x solution.
fn solve_local(h_a: f64, h_b: f64, baseline_m: f64) -> Option<(f64, f64)> {
    let (p_a, p_b) = (0.0, baseline_m);

    let denominator = 2.0 * p_b - 2.0 * p_a;
    if denominator == 0.0 {
        return None;
    }

    let y = (h_a.powi(2) - h_b.powi(2) + p_b.powi(2) - p_a.powi(2)) / denominator;
    let radicand = h_a.powi(2) - (y - p_a).powi(2);

    if !radicand.is_finite() || radicand < 0.0 || !y.is_finite() {
        return None;
    }

    Some((radicand.sqrt(), y))
}

/// Bilateration attempt on the given [BaselineFrame].
/// ## Inputs
/// - range_a_m: slant range to the frame origin (first transponder), in meters
/// - range_b_m: slant range to the next transponder, in meters
/// - frame: [BaselineFrame]
/// - depth_m: depth of the frame origin transponder below the vehicle plane
///   (flat correction of both slant ranges). Candidates are placed in that plane.
/// ## Returns
/// - [Candidates] when the two ranges are consistent with the baseline
/// - None otherwise (degenerate baseline, missing or inconsistent ranges).
pub fn solve(
    range_a_m: f64,
    range_b_m: f64,
    frame: &BaselineFrame,
    depth_m: f64,
) -> Option<Candidates> {
    if frame.is_degenerate() {
        return None;
    }

    if !range_a_m.is_finite() || !range_b_m.is_finite() {
        return None;
    }

    if range_a_m < 0.0 || range_b_m < 0.0 {
        return None;
    }

    let h_a = horizontal_range(range_a_m, depth_m);
    let h_b = horizontal_range(range_b_m, depth_m);

    let (x, y) = solve_local(h_a, h_b, frame.distance_m)?;

    debug!("{}: offset_x={:.3}m offset_y={:.3}m", frame, x, y);

    let vehicle_depth_m = frame.origin.depth_m - depth_m;

    let candidate = |x_m: f64| {
        let mut position = frame.to_geodetic(x_m, y);
        position.depth_m = vehicle_depth_m;
        Candidate {
            x_m,
            y_m: y,
            position,
        }
    };

    let candidates = Candidates {
        primary: candidate(x),
        mirror: candidate(-x),
    };

    if !candidates.primary.position.is_finite() || !candidates.mirror.position.is_finite() {
        return None;
    }

    Some(candidates)
}
