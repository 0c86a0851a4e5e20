//! Session identifier
//!
//! Shown under the wheel as `<millis>-<nonce>` in base 36. Purely cosmetic:
//! nothing reads it back and it has no influence on outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SelectorError;
use crate::rng::{EntropySource, RandomSelector};

/// Nonce is drawn from [0, NONCE_LIMIT)
pub const NONCE_LIMIT: u32 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSeed(String);

impl SessionSeed {
    /// New seed from the current time and a fresh nonce
    pub fn generate<S: EntropySource>(selector: &mut RandomSelector<S>) -> Result<Self, SelectorError> {
        let nonce = selector.draw_uniform(0, NONCE_LIMIT - 1)?;
        Ok(Self::from_parts(now_millis(), nonce))
    }

    pub fn from_parts(millis: u64, nonce: u32) -> Self {
        Self(format!("{}-{}", to_base36(millis), to_base36(u64::from(nonce))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase base-36 digits
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(target_arch = "wasm32")]
fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
