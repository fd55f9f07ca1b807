use std::collections::VecDeque;

use log::{debug, warn};

use crate::{
    bilateration,
    cfg::{AmbiguityReference, Config},
    observation::RangeSample,
    prelude::{Fix, FixQuality, TrackedFix, TransponderId},
    tracker::ring::Ring,
};

/// Mutable part of the [Tracker](crate::prelude::Tracker).
/// Every update consumes the current state and one observation,
/// and returns the next state and possible [Fix].
#[derive(Debug, Clone, Default)]
pub(crate) struct TrackerState {
    pub samples: Vec<RangeSample>,
    pub fix: TrackedFix,
    pub history: VecDeque<Fix>,
}

impl TrackerState {
    /// Fresh [TrackerState]: no ranges, fix at the start location.
    pub fn new(ring: &Ring) -> Self {
        Self {
            samples: vec![RangeSample::default(); ring.len()],
            fix: TrackedFix::start(ring.start),
            history: VecDeque::new(),
        }
    }

    /// Solves and disambiguates a new [Fix] on the baseline `(prev, current)`.
    fn solve(
        &self,
        cfg: &Config,
        ring: &Ring,
        (prev, current): (usize, usize),
        (range_a_m, range_b_m): (f64, f64),
        timestamp_ms: u64,
        quality: FixQuality,
    ) -> Option<Fix> {
        let frame = &ring.frames[prev];

        // origin transponder depth, below the vehicle plane
        let depth_m = frame.origin.depth_m - cfg.vehicle_depth_m;

        let candidates = bilateration::solve(range_a_m, range_b_m, frame, depth_m)?;

        let reference = match cfg.ambiguity {
            AmbiguityReference::LastKnown => self.fix.position,
            AmbiguityReference::Start => ring.start,
        };

        let (primary_dist, mirror_dist) = candidates.distances_to(&reference);
        let selected = candidates.closest_to(&reference);

        debug!(
            "{}: candidates at {:.3}m / {:.3}m from {} reference",
            frame, primary_dist, mirror_dist, cfg.ambiguity
        );

        Some(Fix {
            position: selected.position,
            timestamp_ms,
            baseline: (
                TransponderId(prev as u16),
                TransponderId(current as u16),
            ),
            quality,
        })
    }

    /// Returns [Self] with `fix` as the new tracked fix.
    fn with_fix(mut self, cfg: &Config, fix: &Fix) -> Self {
        self.fix = TrackedFix::from(fix);
        if cfg.history_size > 0 {
            while self.history.len() >= cfg.history_size {
                self.history.pop_front();
            }
            self.history.push_back(*fix);
        }
        self
    }

    /// Processes an accepted range: solves with the last range of the previous
    /// transponder, then stores this range.
    pub fn accept(
        self,
        cfg: &Config,
        ring: &Ring,
        (prev, current): (usize, usize),
        range_m: f64,
        timestamp_ms: u64,
    ) -> (Self, Option<Fix>) {
        let range_a_m = self.samples[prev].last;

        let fix = self.solve(
            cfg,
            ring,
            (prev, current),
            (range_a_m, range_m),
            timestamp_ms,
            FixQuality::Accepted,
        );

        let mut next = match &fix {
            Some(fix) => {
                debug!("new fix: {}", fix);
                self.with_fix(cfg, fix)
            },
            None => {
                debug!(
                    "{}ms ({}->{}): no fix",
                    timestamp_ms, ring.transponders[prev].id, ring.transponders[current].id
                );
                self
            },
        };

        next.samples[current].push(range_m);
        (next, fix)
    }

    /// Processes a rejected range. The rejected range is dropped, but a fix is
    /// still attempted with the stored ranges of both transponders.
    pub fn reject(
        self,
        cfg: &Config,
        ring: &Ring,
        (prev, current): (usize, usize),
        timestamp_ms: u64,
        reason: &str,
    ) -> (Self, Option<Fix>) {
        let range_a_m = self.samples[prev].last;
        let range_b_m = self.samples[current].previous;

        let fix = self.solve(
            cfg,
            ring,
            (prev, current),
            (range_a_m, range_b_m),
            timestamp_ms,
            FixQuality::Rejected,
        );

        let mut next = match &fix {
            Some(fix) => {
                warn!("fix from stale ranges ({}): {}", reason, fix);
                self.with_fix(cfg, fix)
            },
            None => self,
        };

        next.samples[current].invalidate();
        (next, fix)
    }
}
