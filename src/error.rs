//! Error types
//!
//! Only two things can actually go wrong at runtime: a bad forced value typed
//! by the operator, and an entropy source that stops producing usable bits.
//! A spin request while the wheel is already turning is not an error.

/// Failure to obtain random bits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntropyError {
    /// The platform random source reported an error
    #[error("random source unavailable: {0}")]
    Unavailable(String),
    /// Too many consecutive draws were rejected; the stream is not varying
    #[error("random source exhausted after {attempts} rejected draws")]
    Exhausted { attempts: u32 },
}

/// Errors from bounded draws
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty range: min {min} is greater than max {max}")]
    EmptyRange { min: u32, max: u32 },
    #[error(transparent)]
    Entropy(#[from] EntropyError),
}

/// Errors surfaced by a spin request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpinError {
    /// Forced value missing, non-numeric, or outside 1..=100
    #[error("enter a DEMO number between 1 and 100 (got {input:?})")]
    InvalidForcedValue { input: String },
    #[error(transparent)]
    Selector(#[from] SelectorError),
}

impl From<EntropyError> for SpinError {
    fn from(err: EntropyError) -> Self {
        SpinError::Selector(SelectorError::Entropy(err))
    }
}

impl SpinError {
    /// True for errors that mean no spin can ever succeed again
    pub fn is_fatal(&self) -> bool {
        matches!(self, SpinError::Selector(SelectorError::Entropy(_)))
    }
}

/// Errors loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
