//! Baseline frames
use std::f64::consts::FRAC_PI_2;

use itertools::Itertools;
use log::{debug, warn};
use map_3d::{deg2rad, rad2deg};
use nalgebra::{Rotation3, Vector3};

use crate::{
    constants::MIN_BASELINE_M,
    prelude::{GeoPosition, Transponder, TransponderId},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [BaselineFrame] is the local tangent plane attached to one baseline:
/// the pair formed by a transponder and the next one in the ring.
/// Its Y axis runs along the baseline, toward the next transponder,
/// its X axis crosses the baseline.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaselineFrame {
    /// Transponder this frame is attached to
    pub from: TransponderId,
    /// Next transponder in the ring
    pub to: TransponderId,
    /// Frame origin: position of the first transponder
    pub origin: GeoPosition,
    /// Frame orientation with respect to north, in degrees
    pub yaw_deg: f64,
    /// Horizontal baseline length, in meters
    pub distance_m: f64,
    /// Accumulated north offset of the frame origin, in meters
    pub offset_north_m: f64,
    /// Accumulated east offset of the frame origin, in meters
    pub offset_east_m: f64,
}

impl BaselineFrame {
    /// Builds the [BaselineFrame] going from `a` to `b`.
    pub fn new(a: &Transponder, b: &Transponder) -> Self {
        let distance_m = a.position.horizontal_distance_m(&b.position);
        let bearing = a.position.xy_angle(&b.position);
        Self {
            from: a.id,
            to: b.id,
            origin: a.position,
            yaw_deg: rad2deg(bearing - FRAC_PI_2),
            distance_m,
            offset_north_m: 0.0,
            offset_east_m: 0.0,
        }
    }

    /// Returns true when both transponders are (nearly) coincident:
    /// no position may be solved on this baseline.
    pub fn is_degenerate(&self) -> bool {
        !self.distance_m.is_finite() || self.distance_m < MIN_BASELINE_M
    }

    /// Rotates a local offset (x: across the baseline, y: along the baseline)
    /// into the inertial frame, and returns the (north, east) offset in meters
    /// relative to the frame origin.
    pub fn to_inertial(&self, x: f64, y: f64) -> (f64, f64) {
        let rot = Rotation3::from_euler_angles(0.0, 0.0, deg2rad(self.yaw_deg));
        let ned = rot * Vector3::new(x, y, 0.0);
        (ned[0] + self.offset_north_m, ned[1] + self.offset_east_m)
    }

    /// Converts a local offset to a [GeoPosition], at the depth of the origin.
    pub fn to_geodetic(&self, x: f64, y: f64) -> GeoPosition {
        let (north, east) = self.to_inertial(x, y);
        self.origin.displaced(north, east)
    }
}

impl std::fmt::Display for BaselineFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}->{}: yaw={:.3}°, baseline={:.3}m",
            self.from, self.to, self.yaw_deg, self.distance_m
        )
    }
}

/// Builds one [BaselineFrame] per consecutive pair of the transponder ring,
/// the last transponder pairing with the first one. Frames are indexed like
/// the ring itself.
pub fn build_frames(transponders: &[Transponder]) -> Vec<BaselineFrame> {
    transponders
        .iter()
        .circular_tuple_windows::<(_, _)>()
        .map(|(a, b)| {
            let frame = BaselineFrame::new(a, b);
            if frame.is_degenerate() {
                warn!("{}: degenerate baseline, no fix possible", frame);
            } else {
                debug!("{}", frame);
            }
            frame
        })
        .collect()
}
