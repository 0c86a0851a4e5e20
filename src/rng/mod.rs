//! Unbiased random selection
//!
//! Entropy comes from a pluggable `EntropySource`; bounded integers are drawn
//! with rejection sampling so every value in the range is equally likely.
//! - `OsEntropy`: OS / browser CSPRNG, used for real spins
//! - `SeededEntropy`: PCG32, reproducible, for tests and replays only

pub mod selector;
pub mod source;

pub use selector::{MAX_REJECTIONS, RandomSelector, unbiased_limit};
pub use source::{EntropySource, OsEntropy, SeededEntropy};
