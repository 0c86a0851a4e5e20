//! Wedge geometry
//!
//! Angles are degrees in the wheel's own frame, measured clockwise from
//! 12 o'clock. Wedge `i` spans `[i * 3.6, (i + 1) * 3.6)` and carries label `i + 1`.

use serde::{Deserialize, Serialize};

use super::spin::WinningValue;
use crate::consts::{SEGMENT_ANGLE, WEDGE_COUNT};
use crate::normalize_degrees;

/// One labeled angular segment of the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wedge {
    index: u32,
}

impl Wedge {
    /// Wedge by index (0-based). None if past the last wedge.
    pub fn from_index(index: u32) -> Option<Self> {
        (index < WEDGE_COUNT).then_some(Self { index })
    }

    /// Wedge by its printed label (1-based)
    pub fn from_label(label: u32) -> Option<Self> {
        label.checked_sub(1).and_then(Self::from_index)
    }

    /// All wedges in drawing order
    pub fn all() -> impl Iterator<Item = Wedge> {
        (0..WEDGE_COUNT).map(|index| Wedge { index })
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn label(&self) -> u32 {
        self.index + 1
    }

    pub fn start_angle(&self) -> f64 {
        self.index as f64 * SEGMENT_ANGLE
    }

    pub fn end_angle(&self) -> f64 {
        (self.index + 1) as f64 * SEGMENT_ANGLE
    }

    pub fn center_angle(&self) -> f64 {
        self.start_angle() + SEGMENT_ANGLE / 2.0
    }

    /// Check if a wheel-frame angle falls inside this wedge
    pub fn contains_angle(&self, angle: f64) -> bool {
        let a = normalize_degrees(angle);
        a >= self.start_angle() && a < self.end_angle()
    }

    /// Alternating fill so neighbours are distinguishable
    pub fn is_even(&self) -> bool {
        self.index % 2 == 0
    }
}

impl From<WinningValue> for Wedge {
    fn from(value: WinningValue) -> Self {
        Self {
            index: value.get() - 1,
        }
    }
}

/// Which wedge sits under a stationary pointer once the wheel has turned
/// `rotation` degrees clockwise
pub fn wedge_under_pointer(rotation: f64, pointer_angle: f64) -> Wedge {
    let local = normalize_degrees(pointer_angle - rotation);
    let index = ((local / SEGMENT_ANGLE).floor() as u32).min(WEDGE_COUNT - 1);
    Wedge { index }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Wedge::from_label(1).map(|w| w.index()), Some(0));
        assert_eq!(Wedge::from_label(100).map(|w| w.index()), Some(99));
        assert!(Wedge::from_label(0).is_none());
        assert!(Wedge::from_label(101).is_none());
        assert_eq!(Wedge::all().count(), 100);
        assert_eq!(Wedge::all().last().map(|w| w.label()), Some(100));
    }

    #[test]
    fn test_angles() {
        let first = Wedge::from_label(1).unwrap();
        assert!((first.center_angle() - 1.8).abs() < 1e-9);
        assert_eq!(first.start_angle(), 0.0);

        let last = Wedge::from_label(100).unwrap();
        assert!((last.end_angle() - 360.0).abs() < 1e-9);
        assert!((last.center_angle() - 358.2).abs() < 1e-9);
    }

    #[test]
    fn test_contains_angle_wraps() {
        let first = Wedge::from_label(1).unwrap();
        assert!(first.contains_angle(1.0));
        assert!(first.contains_angle(361.0));
        assert!(!first.contains_angle(-1.0));

        let last = Wedge::from_label(100).unwrap();
        assert!(last.contains_angle(-1.0));
    }

    #[test]
    fn test_wedge_under_pointer_at_rest() {
        // Unrotated wheel: pointer at 12 o'clock reads wedge 1
        assert_eq!(wedge_under_pointer(0.0, 0.0).label(), 1);
        assert_eq!(wedge_under_pointer(0.0, 360.0).label(), 1);
        // Pointer at 9 o'clock reads 270 / 3.6 = index 75
        assert_eq!(wedge_under_pointer(0.0, 270.0).label(), 76);
    }

    #[test]
    fn test_wedge_under_pointer_after_rotation() {
        // Worked example: value 1, 6 turns, pointer 270
        assert_eq!(wedge_under_pointer(2428.2, 270.0).label(), 1);
        // Rotating back by one wedge moves the next label under the pointer
        assert_eq!(wedge_under_pointer(2428.2 - 3.6, 270.0).label(), 2);
    }
}
