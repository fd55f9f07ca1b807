//! Geographic positions and local tangent plane offsets
use std::f64::consts::PI;

use map_3d::{deg2rad, ecef2geodetic, geodetic2ecef, rad2deg, Ellipsoid};
use nalgebra::{Matrix3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// WGS84 geographic position of a transponder, of the vehicle
/// or of any solution candidate.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPosition {
    /// Latitude in decimal degrees
    pub lat_ddeg: f64,
    /// Longitude in decimal degrees
    pub long_ddeg: f64,
    /// Depth below the ellipsoid in meters (positive down)
    #[cfg_attr(feature = "serde", serde(default))]
    pub depth_m: f64,
}

impl std::fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "lat={:.7}°, long={:.7}°, depth={:.2}m",
            self.lat_ddeg, self.long_ddeg, self.depth_m
        )
    }
}

impl GeoPosition {
    /// Builds a new [GeoPosition]
    /// - latitude [ddeg]
    /// - longitude [ddeg]
    /// - depth [m], positive down
    pub fn new(lat_ddeg: f64, long_ddeg: f64, depth_m: f64) -> Self {
        Self {
            lat_ddeg,
            long_ddeg,
            depth_m,
        }
    }

    /// Builds a new [GeoPosition] at the surface (zero depth).
    pub fn from_lat_long(lat_ddeg: f64, long_ddeg: f64) -> Self {
        Self::new(lat_ddeg, long_ddeg, 0.0)
    }

    /// Builds a new [GeoPosition] from WGS84 ECEF coordinates in meters.
    pub fn from_ecef(ecef: Vector3<f64>) -> Self {
        let (lat, long, alt) = ecef2geodetic(ecef[0], ecef[1], ecef[2], Ellipsoid::WGS84);
        Self {
            lat_ddeg: rad2deg(lat),
            long_ddeg: rad2deg(long),
            depth_m: -alt,
        }
    }

    /// Returns WGS84 ECEF coordinates in meters.
    pub fn ecef(&self) -> Vector3<f64> {
        let (x, y, z) = geodetic2ecef(
            deg2rad(self.lat_ddeg),
            deg2rad(self.long_ddeg),
            -self.depth_m,
            Ellipsoid::WGS84,
        );
        Vector3::new(x, y, z)
    }

    /// Returns true if all coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat_ddeg.is_finite() && self.long_ddeg.is_finite() && self.depth_m.is_finite()
    }

    /// ECEF to North East Down rotation, at this position.
    fn ecef_to_ned(&self) -> Matrix3<f64> {
        let (lat, long) = (deg2rad(self.lat_ddeg), deg2rad(self.long_ddeg));
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_long, cos_long) = long.sin_cos();
        Matrix3::new(
            -sin_lat * cos_long,
            -sin_lat * sin_long,
            cos_lat,
            -sin_long,
            cos_long,
            0.0,
            -cos_lat * cos_long,
            -cos_lat * sin_long,
            -sin_lat,
        )
    }

    /// Offset of [Self] relative to `other`, expressed in the
    /// North East Down frame attached to `other`, in meters.
    pub fn offset_from(&self, other: &Self) -> Vector3<f64> {
        other.ecef_to_ned() * (self.ecef() - other.ecef())
    }

    /// Returns a new [GeoPosition] displaced from [Self] by a
    /// north and east offset in meters. Depth is preserved.
    pub fn displaced(&self, north_m: f64, east_m: f64) -> Self {
        let ned = Vector3::new(north_m, east_m, 0.0);
        let ecef = self.ecef() + self.ecef_to_ned().transpose() * ned;
        let mut displaced = Self::from_ecef(ecef);
        displaced.depth_m = self.depth_m;
        displaced
    }

    /// Horizontal (north/east plane) distance to `other`, in meters.
    pub fn horizontal_distance_m(&self, other: &Self) -> f64 {
        let offset = other.offset_from(self);
        (offset[0].powi(2) + offset[1].powi(2)).sqrt()
    }

    /// Slant distance to `other`, in meters.
    pub fn distance_m(&self, other: &Self) -> f64 {
        other.offset_from(self).norm()
    }

    /// Angle of the vector going from [Self] to `other`, in the north/east
    /// plane, measured from north toward east, in radians within [0, 2π).
    pub fn xy_angle(&self, other: &Self) -> f64 {
        let offset = other.offset_from(self);
        let angle = offset[1].atan2(offset[0]);
        if angle < 0.0 {
            angle + 2.0 * PI
        } else {
            angle
        }
    }
}
