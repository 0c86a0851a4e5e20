//! CSS-style cubic-bezier easing
//!
//! The curve runs from (0, 0) to (1, 1) through two control points. A y
//! coordinate above 1 makes the wheel overshoot the target and drift back,
//! which reads as a mechanical stop.

use serde::{Deserialize, Serialize};

/// Easing curve equivalent to `cubic-bezier(x1, y1, x2, y2)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Default for CubicBezier {
    /// Overshoot-and-settle curve used for spins
    fn default() -> Self {
        Self::new(0.17, 0.89, 0.32, 1.27)
    }
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub const fn linear() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// x control points must stay in [0, 1] for x(t) to be monotonic
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.x1)
            && (0.0..=1.0).contains(&self.x2)
            && self.y1.is_finite()
            && self.y2.is_finite()
    }

    #[inline]
    fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
        // B(t) with P0 = 0, P3 = 1
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    #[inline]
    fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Curve parameter t whose x equals `x`
    fn solve_t(&self, x: f64) -> f64 {
        // Newton first, bisection if the slope flattens out
        let mut t = x;
        for _ in 0..8 {
            let err = Self::bezier(t, self.x1, self.x2) - x;
            if err.abs() < 1e-7 {
                return t;
            }
            let slope = Self::bezier_slope(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let bx = Self::bezier(t, self.x1, self.x2);
            if (bx - x).abs() < 1e-7 {
                break;
            }
            if bx < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    /// Eased progress for linear time progress `x` in [0, 1]
    pub fn ease(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        Self::bezier(self.solve_t(x), self.y1, self.y2)
    }

    /// `transition-timing-function` value
    pub fn to_css(&self) -> String {
        format!("cubic-bezier({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}
