//! Bounded uniform draws via rejection sampling
//!
//! A 32-bit word reduced with `% range` favours the low values whenever 2^32
//! is not a multiple of `range`. Words at or above the largest multiple of
//! `range` that fits in 2^32 are thrown away and redrawn instead.

use super::source::EntropySource;
use crate::error::{EntropyError, SelectorError};

/// Consecutive rejected draws before the source is declared stuck.
/// Each draw is rejected with probability < 1/2, so an honest source
/// trips this less than once in 2^64 calls.
pub const MAX_REJECTIONS: u32 = 64;

/// Exclusive upper bound on accepted 32-bit words for `range` outcomes:
/// `floor(2^32 / range) * range`
#[inline]
pub fn unbiased_limit(range: u64) -> u64 {
    debug_assert!(range >= 1);
    ((1u64 << 32) / range) * range
}

/// Uniform integer selector over an entropy source
#[derive(Debug, Clone)]
pub struct RandomSelector<S> {
    source: S,
    /// Total rejected draws (diagnostics only)
    rejected: u64,
}

impl<S: EntropySource> RandomSelector<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            rejected: 0,
        }
    }

    /// Uniform integer in `[min, max]`, inclusive on both ends
    pub fn draw_uniform(&mut self, min: u32, max: u32) -> Result<u32, SelectorError> {
        if min > max {
            return Err(SelectorError::EmptyRange { min, max });
        }

        let range = u64::from(max - min) + 1;
        if range == 1 {
            return Ok(min);
        }

        let limit = unbiased_limit(range);
        for _ in 0..MAX_REJECTIONS {
            let word = u64::from(self.source.next_u32()?);
            if word < limit {
                // word % range < range <= 2^32, and min + it <= max
                return Ok(min + (word % range) as u32);
            }
            self.rejected += 1;
            log::debug!("Rejected draw {} (limit {}, range {})", word, limit, range);
        }

        log::error!("Entropy source stuck: {} consecutive rejections", MAX_REJECTIONS);
        Err(EntropyError::Exhausted {
            attempts: MAX_REJECTIONS,
        }
        .into())
    }

    /// Number of draws discarded so far
    pub fn rejected_draws(&self) -> u64 {
        self.rejected
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
