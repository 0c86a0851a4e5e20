//! Pure spin math: winning value -> rotation
//!
//! The wheel turns clockwise, so a wheel-frame angle `a` appears on screen at
//! `a + rotation`. Landing the winning wedge's center under the pointer means
//! `rotation = pointer - center (mod 360)`, plus whole turns for show.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::wedge::Wedge;
use crate::consts::{ROTATION_PRECISION, SEGMENT_ANGLE, WEDGE_COUNT};
use crate::error::SpinError;
use crate::normalize_degrees;

/// A wheel label that can win: 1..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WinningValue(u32);

impl WinningValue {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = WEDGE_COUNT;

    pub fn new(value: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    pub fn wedge(self) -> Wedge {
        Wedge::from(self)
    }
}

impl TryFrom<u32> for WinningValue {
    type Error = SpinError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| SpinError::InvalidForcedValue {
            input: value.to_string(),
        })
    }
}

impl From<WinningValue> for u32 {
    fn from(value: WinningValue) -> Self {
        value.0
    }
}

impl fmt::Display for WinningValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything decided about one spin before it is animated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinPlan {
    pub value: WinningValue,
    /// Whole turns added for show
    pub turns: u32,
    /// Wheel-frame center of the winning wedge
    pub center: f64,
    /// Rotation added by this spin (always > 0)
    pub delta: f64,
    /// Cumulative rotation before and after the spin
    pub from: f64,
    pub to: f64,
}

/// Wheel-frame angle of the winning wedge's center
#[inline]
pub fn wedge_center(value: WinningValue) -> f64 {
    (value.get() - 1) as f64 * SEGMENT_ANGLE + SEGMENT_ANGLE / 2.0
}

/// Round to millidegrees
#[inline]
pub fn round_rotation(degrees: f64) -> f64 {
    (degrees * ROTATION_PRECISION).round() / ROTATION_PRECISION
}

/// Plan a spin from `current_rotation` that comes to rest with `value`
/// under a pointer at `pointer_angle`.
///
/// From rest at 0 this is `turns * 360 + (pointer - center)`. Later spins
/// also subtract where the wheel currently rests, so the cumulative rotation
/// keeps growing while still landing on the right wedge.
pub fn plan_spin(value: WinningValue, turns: u32, pointer_angle: f64, current_rotation: f64) -> SpinPlan {
    let center = wedge_center(value);
    let rest = normalize_degrees(current_rotation);
    let delta = round_rotation(turns as f64 * 360.0 + (pointer_angle - center) - rest);

    SpinPlan {
        value,
        turns,
        center,
        delta,
        from: current_rotation,
        to: round_rotation(current_rotation + delta),
    }
}
