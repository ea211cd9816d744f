//! Fixed-capacity ring of inter-arrival gaps.
//!
//! # Layout
//! ```text
//!   samples: [f64; capacity]     capacity is a power of two
//!   next_index: total gaps ever written
//!
//!   write slot  = next_index & (capacity - 1)
//!   valid slots = samples[..min(next_index, capacity)]
//! ```
//!
//! Slots past the valid prefix still hold their initial zeros. Every reader
//! goes through `valid()`, so those zeros are never counted.

use crossbeam_utils::CachePadded;

use crate::error::ConfigError;

/// Bounded sliding window of inter-arrival gaps in milliseconds.
#[derive(Debug)]
pub struct SampleRing {
    /// Write counter, kept on its own cache line.
    next_index: CachePadded<u64>,
    mask: u64,
    samples: Box<[f64]>,
}

impl SampleRing {
    /// Create a ring holding `capacity` gaps.
    ///
    /// `capacity` must be a power of two; `DetectorConfig::resolve` guarantees it.
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            next_index: CachePadded::new(0),
            mask: capacity as u64 - 1,
            samples: vec![0.0; capacity].into_boxed_slice(),
        }
    }

    /// Create a ring holding `capacity` gaps, reporting allocation failure
    /// instead of aborting.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        debug_assert!(capacity.is_power_of_two());
        let too_large = || ConfigError::WindowTooLarge {
            requested: capacity as u64,
        };

        let mut samples = Vec::new();
        samples.try_reserve_exact(capacity).map_err(|_| too_large())?;
        samples.resize(capacity, 0.0);

        Ok(Self {
            next_index: CachePadded::new(0),
            mask: capacity as u64 - 1,
            samples: samples.into_boxed_slice(),
        })
    }

    #[cfg(test)]
    pub(crate) fn write_counter(&self) -> &CachePadded<u64> {
        &self.next_index
    }

    /// Number of slots in the ring.
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Number of gaps currently considered, at most `capacity`.
    pub fn len(&self) -> usize {
        usize::try_from(*self.next_index).map_or(self.capacity(), |n| n.min(self.capacity()))
    }

    pub fn is_empty(&self) -> bool {
        *self.next_index == 0
    }

    /// Total gaps ever written, including overwritten ones.
    pub fn written(&self) -> u64 {
        *self.next_index
    }

    /// Store a gap, overwriting the oldest once the ring is full.
    pub fn push(&mut self, gap: f64) {
        let slot = (*self.next_index & self.mask) as usize;
        self.samples[slot] = gap;
        *self.next_index = self.next_index.wrapping_add(1);
    }

    /// The slots holding real samples, in storage order.
    pub fn valid(&self) -> &[f64] {
        &self.samples[..self.len()]
    }

    /// How many stored gaps are `<= bound`.
    pub fn count_at_most(&self, bound: f64) -> usize {
        self.valid().iter().filter(|&&gap| gap <= bound).count()
    }
}
