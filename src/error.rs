use thiserror::Error;

use crate::prelude::TransponderId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A transponder ring needs at least two transponders to form
    /// a single baseline.
    #[error("not enough transponders: {0} (at least 2 are required)")]
    NotEnoughTransponders(usize),

    /// Transponders must be listed in ring order: the transponder at index `i`
    /// is identified by `i`.
    #[error("transponder #{index} is identified as {id}: ring order mismatch")]
    MisorderedTransponder { index: usize, id: TransponderId },

    /// Range observation refers to a transponder that is not part of the ring.
    #[error("unknown transponder {0}")]
    UnknownTransponder(TransponderId),

    /// The [Tracker](crate::prelude::Tracker) has not been loaded with any
    /// transponder ring yet.
    #[error("tracker is not initialized: no transponders loaded")]
    Uninitialized,

    /// Invalid [Config](crate::prelude::Config) value.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    #[error("unknown ambiguity reference")]
    UnknownAmbiguityReference,
}
