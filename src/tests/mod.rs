mod tracker;

use log::LevelFilter;
use std::sync::Once;

use crate::prelude::{GeoPosition, Transponder};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// Origin of the test field (first transponder)
pub const ORIGIN_LAT_DDEG: f64 = 41.1850;
pub const ORIGIN_LONG_DDEG: f64 = -8.7060;

/// Maximal horizontal error on test fixes
pub const MAX_FIX_ERROR_M: f64 = 1.0E-3;

pub fn origin() -> GeoPosition {
    GeoPosition::from_lat_long(ORIGIN_LAT_DDEG, ORIGIN_LONG_DDEG)
}

/// Local point of the test field, `north_m`/`east_m` away from the origin.
pub fn local(north_m: f64, east_m: f64) -> GeoPosition {
    origin().displaced(north_m, east_m)
}

/// Test field: T0 at the origin, T1 100m east, T2 100m north.
pub fn triangle() -> Vec<Transponder> {
    triangle_at_depth(0.0)
}

/// [triangle] test field, moored `depth_m` below the surface.
pub fn triangle_at_depth(depth_m: f64) -> Vec<Transponder> {
    let moored = |north_m: f64, east_m: f64| GeoPosition {
        depth_m,
        ..local(north_m, east_m)
    };
    vec![
        Transponder::new(0, moored(0.0, 0.0)),
        Transponder::new(1, moored(0.0, 100.0)),
        Transponder::new(2, moored(100.0, 0.0)),
    ]
}

/// Range that a vehicle at `vehicle` would measure to `transponder`,
/// with transponders sitting `depth_m` below the vehicle.
pub fn range_to(transponder: &Transponder, vehicle: &GeoPosition, depth_m: f64) -> f64 {
    let horizontal = transponder.position.horizontal_distance_m(vehicle);
    (horizontal.powi(2) + depth_m.powi(2)).sqrt()
}
