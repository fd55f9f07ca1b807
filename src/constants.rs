/// Minimal number of transponders forming a ring (a single baseline,
/// walked in both directions).
pub const MIN_TRANSPONDERS: usize = 2;

/// Default number of fixes retained by the tracker history
pub const DEFAULT_FIX_HISTORY_SIZE: usize = 100;

/// Baselines shorter than this (in meters) are considered degenerate
pub const MIN_BASELINE_M: f64 = 1.0E-6;
