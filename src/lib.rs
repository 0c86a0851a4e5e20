//! Spin Wheel - a 1-100 prize wheel
//!
//! Core modules:
//! - `rng`: Unbiased bounded draws over a cryptographic entropy source
//! - `wheel`: Wedge geometry, spin math, virtual timers and the spin controller
//! - `easing`: CSS-style cubic-bezier curves for the spin animation
//! - `render`: SVG markup for the wheel and pointer
//! - `session`: Cosmetic per-session identifier
//! - `settings`: Read-only spin and animation tunables

pub mod easing;
pub mod error;
pub mod render;
pub mod rng;
pub mod session;
pub mod settings;
pub mod wheel;

pub use error::{EntropyError, SelectorError, SettingsError, SpinError};
pub use settings::Settings;

use glam::Vec2;

/// Wheel configuration constants
pub mod consts {
    /// Number of wedges on the wheel (labels 1..=WEDGE_COUNT)
    pub const WEDGE_COUNT: u32 = 100;
    /// Angular size of one wedge in degrees
    pub const SEGMENT_ANGLE: f64 = 360.0 / WEDGE_COUNT as f64;

    /// Length of the rotation animation
    pub const SPIN_ANIMATION_MS: u32 = 4500;
    /// Delay before the result is published (slightly past the animation)
    pub const SETTLE_DELAY_MS: u32 = 4600;

    /// Extra full turns per spin, inclusive range
    pub const MIN_TURNS: u32 = 6;
    pub const MAX_TURNS: u32 = 10;

    /// Where the stationary pointer sits, degrees clockwise from 12 o'clock
    pub const DEFAULT_POINTER_ANGLE: f64 = 270.0;

    /// Rotation targets are rounded to this many steps per degree
    pub const ROTATION_PRECISION: f64 = 1000.0;

    /// Wheel dimensions (SVG user units)
    pub const WHEEL_RADIUS: f32 = 240.0;
    pub const LABEL_RADIUS: f32 = 200.0;
    pub const VIEWBOX_HALF: f32 = 260.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Convert polar (r, degrees clockwise from 12 o'clock) to screen
/// coordinates with y pointing down
#[inline]
pub fn polar_to_cartesian(r: f32, degrees: f32) -> Vec2 {
    let rad = (degrees - 90.0).to_radians();
    Vec2::new(r * rad.cos(), r * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-9);
        assert!((normalize_degrees(2428.2) - 268.2).abs() < 1e-9);
    }

    #[test]
    fn test_polar_to_cartesian_screen_frame() {
        let top = polar_to_cartesian(100.0, 0.0);
        assert!(top.x.abs() < 1e-4 && (top.y + 100.0).abs() < 1e-4);

        let right = polar_to_cartesian(100.0, 90.0);
        assert!((right.x - 100.0).abs() < 1e-4 && right.y.abs() < 1e-4);

        let left = polar_to_cartesian(100.0, 270.0);
        assert!((left.x + 100.0).abs() < 1e-4 && left.y.abs() < 1e-3);
    }
}
