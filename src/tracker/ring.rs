use log::error;

use crate::{
    constants::MIN_TRANSPONDERS,
    prelude::{build_frames, BaselineFrame, Error, GeoPosition, Transponder, TransponderId},
};

/// Transponder ring, its baseline frames and the start location.
/// Immutable until the next reset.
#[derive(Debug, Clone)]
pub(crate) struct Ring {
    pub transponders: Vec<Transponder>,
    pub frames: Vec<BaselineFrame>,
    pub start: GeoPosition,
}

impl Ring {
    pub fn new(transponders: Vec<Transponder>, start: GeoPosition) -> Result<Self, Error> {
        if transponders.len() < MIN_TRANSPONDERS {
            error!(
                "invalid ring: {} transponder(s), at least {} are required",
                transponders.len(),
                MIN_TRANSPONDERS
            );
            return Err(Error::NotEnoughTransponders(transponders.len()));
        }

        for (index, transponder) in transponders.iter().enumerate() {
            if transponder.id.index() != index {
                error!("invalid ring: {} found at index #{}", transponder, index);
                return Err(Error::MisorderedTransponder {
                    index,
                    id: transponder.id,
                });
            }
        }

        let frames = build_frames(&transponders);

        Ok(Self {
            transponders,
            frames,
            start,
        })
    }

    pub fn len(&self) -> usize {
        self.transponders.len()
    }

    /// Returns (previous, current) ring indexes for this [TransponderId].
    pub fn baseline(&self, id: TransponderId) -> Result<(usize, usize), Error> {
        let size = self.len();
        let current = id.index();
        if current >= size {
            return Err(Error::UnknownTransponder(id));
        }
        Ok(((current + size - 1) % size, current))
    }
}
