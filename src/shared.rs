//! Thread safe tracker handle
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};

use crate::prelude::{
    Error, Fix, GeoPosition, RangeObservation, TrackedFix, Tracker, Transponder, TransponderId,
};

/// [SharedTracker] serializes all operations of one [Tracker]
/// under a single lock. Clone it to hand it to several range listeners.
#[derive(Debug, Clone, Default)]
pub struct SharedTracker {
    inner: Arc<Mutex<Tracker>>,
}

impl From<Tracker> for SharedTracker {
    fn from(tracker: Tracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }
}

impl SharedTracker {
    /// Wraps a [Tracker]
    pub fn new(tracker: Tracker) -> Self {
        Self::from(tracker)
    }

    /// A panic may have interrupted an update while the lock was held:
    /// the [Tracker] is then reset before being handed out again.
    fn lock(&self) -> MutexGuard<'_, Tracker> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned tracker lock");
            let mut tracker = poisoned.into_inner();
            if let Err(e) = tracker.reset() {
                debug!("poisoned tracker not reset: {}", e);
            }
            self.inner.clear_poison();
            tracker
        })
    }

    /// Runs `f` with exclusive access to the [Tracker].
    pub fn with<T>(&self, f: impl FnOnce(&mut Tracker) -> T) -> T {
        f(&mut self.lock())
    }

    /// See [Tracker::reset_with]
    pub fn reset_with(
        &self,
        transponders: Vec<Transponder>,
        start: GeoPosition,
    ) -> Result<(), Error> {
        self.lock().reset_with(transponders, start)
    }

    /// See [Tracker::reset]
    pub fn reset(&self) -> Result<(), Error> {
        self.lock().reset()
    }

    /// See [Tracker::update_range_accepted]
    pub fn update_range_accepted(
        &self,
        id: TransponderId,
        range_m: f64,
        timestamp_ms: u64,
    ) -> Result<Option<Fix>, Error> {
        self.lock().update_range_accepted(id, range_m, timestamp_ms)
    }

    /// See [Tracker::update_range_rejected]
    pub fn update_range_rejected(
        &self,
        id: TransponderId,
        range_m: f64,
        timestamp_ms: u64,
        reason: &str,
    ) -> Result<Option<Fix>, Error> {
        self.lock()
            .update_range_rejected(id, range_m, timestamp_ms, reason)
    }

    /// See [Tracker::update_range]
    pub fn update_range(
        &self,
        id: TransponderId,
        range_m: f64,
        timestamp_ms: u64,
        reason: Option<&str>,
    ) -> Result<Option<Fix>, Error> {
        self.lock().update_range(id, range_m, timestamp_ms, reason)
    }

    /// See [Tracker::update]
    pub fn update(&self, observation: &RangeObservation) -> Result<Option<Fix>, Error> {
        self.lock().update(observation)
    }

    /// Consistent copy of the [TrackedFix]
    pub fn snapshot(&self) -> TrackedFix {
        self.lock().tracked_fix()
    }

    /// See [Tracker::last_known_position]
    pub fn last_known_position(&self) -> GeoPosition {
        self.lock().last_known_position()
    }

    /// See [Tracker::last_known_timestamp_ms]
    pub fn last_known_timestamp_ms(&self) -> Option<u64> {
        self.lock().last_known_timestamp_ms()
    }
}
