//! LBL fix tracker
use std::collections::VecDeque;

use log::{error, info};

use crate::prelude::{
    BaselineFrame, Config, Error, GeoPosition, RangeObservation, RangeSample, Transponder,
    TransponderId,
};

mod fix;
mod ring;
mod state;

pub use fix::{Fix, FixQuality, TrackedFix};

use ring::Ring;
use state::TrackerState;

/// [Tracker] owns the transponder ring and the continuity state,
/// and turns a stream of range observations into position [Fix]es.
///
/// Each range is paired with the last range of the previous transponder
/// in the ring, the pair is solved on their baseline, and the ambiguity
/// is resolved against the last known position.
///
/// A [Tracker] is either uninitialized (no transponder ring loaded,
/// see [Tracker::default]) or ready. Loading a ring ([Tracker::new],
/// [Tracker::reset_with]) or resetting ([Tracker::reset]) makes it ready.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    /// [Config]
    cfg: Config,
    /// Transponder ring, None until loaded
    ring: Option<Ring>,
    /// Continuity state
    state: TrackerState,
}

impl Tracker {
    /// Creates a new [Tracker], ready to process range observations.
    /// ## Inputs
    /// - cfg: [Config] preset
    /// - transponders: ring of [Transponder]s, in ring order:
    ///   the transponder at index `i` must be identified as `i`.
    ///   At least 2 transponders are required.
    /// - start: start location, used as first reference to resolve the ambiguity.
    pub fn new(
        cfg: Config,
        transponders: Vec<Transponder>,
        start: GeoPosition,
    ) -> Result<Self, Error> {
        let mut s = Self::with_config(cfg)?;
        s.reset_with(transponders, start)?;
        Ok(s)
    }

    /// Creates an uninitialized [Tracker], with given [Config].
    /// Load a transponder ring with [Tracker::reset_with].
    pub fn with_config(cfg: Config) -> Result<Self, Error> {
        cfg.validate().map_err(|e| {
            error!("{}", e);
            e
        })?;
        Ok(Self {
            cfg,
            ring: None,
            state: TrackerState::default(),
        })
    }

    /// Loads a new transponder ring and start location.
    /// Frames are rebuilt, ranges are cleared and the fix returns to `start`.
    /// On error, [Self] is left untouched.
    pub fn reset_with(
        &mut self,
        transponders: Vec<Transponder>,
        start: GeoPosition,
    ) -> Result<(), Error> {
        let ring = Ring::new(transponders, start)?;
        self.state = TrackerState::new(&ring);
        info!("tracker reset: {} transponders, start {}", ring.len(), start);
        self.ring = Some(ring);
        Ok(())
    }

    /// Resets [Self] with the current transponder ring and start location.
    pub fn reset(&mut self) -> Result<(), Error> {
        let ring = self.ring.as_ref().ok_or(Error::Uninitialized)?;
        let ring = Ring::new(ring.transponders.clone(), ring.start)?;
        self.state = TrackerState::new(&ring);
        info!("tracker reset: {} transponders, start {}", ring.len(), ring.start);
        self.ring = Some(ring);
        Ok(())
    }

    /// Returns true once a transponder ring is loaded.
    pub fn is_ready(&self) -> bool {
        self.ring.is_some()
    }

    /// Processes an accepted range.
    /// ## Inputs
    /// - id: [TransponderId] the range was measured to
    /// - range_m: slant range in meters
    /// - timestamp_ms: sampling instant in milliseconds
    /// ## Returns
    /// - Some([Fix]) when a new position was resolved
    /// - None when no position could be resolved: missing range on the previous
    ///   transponder, or ranges inconsistent with the baseline. The tracked fix
    ///   is left unchanged.
    /// - [Error] on unknown transponder or uninitialized [Tracker].
    pub fn update_range_accepted(
        &mut self,
        id: TransponderId,
        range_m: f64,
        timestamp_ms: u64,
    ) -> Result<Option<Fix>, Error> {
        let ring = self.ring.as_ref().ok_or(Error::Uninitialized)?;
        let baseline = ring.baseline(id)?;
        let (state, fix) = std::mem::take(&mut self.state).accept(
            &self.cfg,
            ring,
            baseline,
            range_m,
            timestamp_ms,
        );
        self.state = state;
        Ok(fix)
    }

    /// Processes a rejected range. The range itself is discarded and
    /// the last range stored for this transponder is invalidated. A fix is
    /// still attempted from the stored ranges, and flagged [FixQuality::Rejected].
    pub fn update_range_rejected(
        &mut self,
        id: TransponderId,
        range_m: f64,
        timestamp_ms: u64,
        reason: &str,
    ) -> Result<Option<Fix>, Error> {
        let ring = self.ring.as_ref().ok_or(Error::Uninitialized)?;
        let baseline = ring.baseline(id)?;
        info!(
            "{}ms: range {:.3}m to {} rejected ({})",
            timestamp_ms, range_m, id, reason
        );
        let (state, fix) =
            std::mem::take(&mut self.state).reject(&self.cfg, ring, baseline, timestamp_ms, reason);
        self.state = state;
        Ok(fix)
    }

    /// Processes a range, accepted when no (or an empty) rejection reason is given.
    pub fn update_range(
        &mut self,
        id: TransponderId,
        range_m: f64,
        timestamp_ms: u64,
        reason: Option<&str>,
    ) -> Result<Option<Fix>, Error> {
        match reason.filter(|reason| !reason.is_empty()) {
            None => self.update_range_accepted(id, range_m, timestamp_ms),
            Some(reason) => self.update_range_rejected(id, range_m, timestamp_ms, reason),
        }
    }

    /// Processes a [RangeObservation].
    pub fn update(&mut self, observation: &RangeObservation) -> Result<Option<Fix>, Error> {
        self.update_range(
            observation.id,
            observation.range_m,
            observation.timestamp_ms,
            observation.rejection_reason(),
        )
    }

    /// Last known [GeoPosition]: the start location until the first fix.
    pub fn last_known_position(&self) -> GeoPosition {
        self.state.fix.position
    }

    /// Timestamp of the last fix (in milliseconds), None until the first fix.
    pub fn last_known_timestamp_ms(&self) -> Option<u64> {
        self.state.fix.timestamp_ms
    }

    /// Current [TrackedFix]
    pub fn tracked_fix(&self) -> TrackedFix {
        self.state.fix
    }

    /// Returns the [RangeSample] stored for this transponder.
    pub fn range_sample(&self, id: TransponderId) -> Option<RangeSample> {
        self.state.samples.get(id.index()).copied()
    }

    /// Returns the [Transponder] ring (empty when uninitialized).
    pub fn transponders(&self) -> &[Transponder] {
        self.ring
            .as_ref()
            .map(|ring| ring.transponders.as_slice())
            .unwrap_or_default()
    }

    /// Returns the [BaselineFrame]s, indexed like the ring (empty when uninitialized).
    pub fn frames(&self) -> &[BaselineFrame] {
        self.ring
            .as_ref()
            .map(|ring| ring.frames.as_slice())
            .unwrap_or_default()
    }

    /// Start location, when initialized.
    pub fn start(&self) -> Option<GeoPosition> {
        self.ring.as_ref().map(|ring| ring.start)
    }

    /// Most recent [Fix]es, oldest first.
    pub fn history(&self) -> &VecDeque<Fix> {
        &self.state.history
    }

    /// [Config] in use
    pub fn config(&self) -> &Config {
        &self.cfg
    }
}
