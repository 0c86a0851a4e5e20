//! Choosing the winning value
//!
//! Demo mode pins the result to an operator-typed number; otherwise the
//! value is drawn uniformly from 1..=100.

use serde::{Deserialize, Serialize};

use super::spin::WinningValue;
use crate::error::SpinError;
use crate::rng::{EntropySource, RandomSelector};

/// Raw operator input for demo mode, validated at spin time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForcedValue {
    raw: String,
}

impl ForcedValue {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whole number in 1..=100, or `InvalidForcedValue`
    pub fn parse(&self) -> Result<WinningValue, SpinError> {
        let invalid = || SpinError::InvalidForcedValue {
            input: self.raw.clone(),
        };
        let number: u32 = self.raw.trim().parse().map_err(|_| invalid())?;
        WinningValue::new(number).ok_or_else(invalid)
    }
}

/// Demo-mode switch and its forced value. Lives for the session only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoMode {
    pub enabled: bool,
    pub value: ForcedValue,
}

impl DemoMode {
    /// Forced value for the next spin, if demo mode is on
    pub fn forced_value(&self) -> Option<&ForcedValue> {
        self.enabled.then_some(&self.value)
    }
}

impl From<u32> for ForcedValue {
    fn from(value: u32) -> Self {
        Self::new(value.to_string())
    }
}

/// Forced value if one is given, otherwise a fair draw
pub fn choose_winning_value<S: EntropySource>(
    forced: Option<&ForcedValue>,
    selector: &mut RandomSelector<S>,
) -> Result<WinningValue, SpinError> {
    match forced {
        Some(forced) => forced.parse(),
        None => {
            let drawn = selector.draw_uniform(WinningValue::MIN, WinningValue::MAX)?;
            WinningValue::try_from(drawn)
        }
    }
}
