//! SVG wheel markup
//!
//! Coordinates are SVG user units centred on the wheel, y pointing down.
//! The rotor group holds the wedges and labels and is the only part that
//! rotates; the pointer is drawn outside it.

use glam::Vec2;

use crate::consts::{LABEL_RADIUS, SEGMENT_ANGLE, VIEWBOX_HALF, WHEEL_RADIUS};
use crate::polar_to_cartesian;
use crate::wheel::Wedge;

/// Element id of the rotating group
pub const ROTOR_ID: &str = "wheel-rotor";
/// Element id of the stationary pointer
pub const POINTER_ID: &str = "wheel-pointer";

const FILL_EVEN: &str = "#f3f4f8";
const FILL_ODD: &str = "#e6e8f1";
const LABEL_FONT_SIZE: f32 = 9.0;

/// Pointer triangle size
const POINTER_HALF_WIDTH: f32 = 14.0;
const POINTER_LENGTH: f32 = 22.0;

/// CSS transform for the rotor at `rotation` degrees
pub fn rotor_transform(rotation: f64) -> String {
    format!("rotate({}deg)", rotation)
}

/// Wheel drawing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelSvg {
    pub radius: f32,
    pub label_radius: f32,
    pub pointer_angle: f64,
    /// Initial rotor rotation
    pub rotation: f64,
}

impl Default for WheelSvg {
    fn default() -> Self {
        Self {
            radius: WHEEL_RADIUS,
            label_radius: LABEL_RADIUS,
            pointer_angle: crate::consts::DEFAULT_POINTER_ANGLE,
            rotation: 0.0,
        }
    }
}

impl WheelSvg {
    pub fn new(pointer_angle: f64, rotation: f64) -> Self {
        Self {
            pointer_angle,
            rotation,
            ..Self::default()
        }
    }

    /// Pie-slice path for one wedge
    pub fn wedge_path(&self, wedge: Wedge) -> String {
        let start = polar_to_cartesian(self.radius, wedge.end_angle() as f32);
        let end = polar_to_cartesian(self.radius, wedge.start_angle() as f32);
        let large_arc = if SEGMENT_ANGLE <= 180.0 { 0 } else { 1 };
        format!(
            "M 0 0 L {:.3} {:.3} A {r} {r} 0 {} 0 {:.3} {:.3} Z",
            start.x,
            start.y,
            large_arc,
            end.x,
            end.y,
            r = self.radius
        )
    }

    /// Where a wedge's label is centred
    pub fn label_position(&self, wedge: Wedge) -> Vec2 {
        polar_to_cartesian(self.label_radius, wedge.center_angle() as f32)
    }

    /// Pointer triangle: tip just inside the rim, base outside it
    pub fn pointer_points(&self) -> [Vec2; 3] {
        let angle = self.pointer_angle as f32;
        let tip = polar_to_cartesian(self.radius - 4.0, angle);
        let base = polar_to_cartesian(self.radius - 4.0 + POINTER_LENGTH, angle);
        let radial = base.normalize_or_zero();
        let across = Vec2::new(-radial.y, radial.x) * POINTER_HALF_WIDTH;
        [tip, base + across, base - across]
    }

    fn wedge_group(&self, wedge: Wedge) -> String {
        let fill = if wedge.is_even() { FILL_EVEN } else { FILL_ODD };
        let label = self.label_position(wedge);
        let angle = wedge.center_angle();
        format!(
            concat!(
                "<g>",
                "<path d=\"{}\" fill=\"{}\" stroke=\"#fff\" stroke-width=\"0.5\"/>",
                "<text x=\"{:.3}\" y=\"{:.3}\" font-size=\"{}\" text-anchor=\"middle\" ",
                "dominant-baseline=\"middle\" transform=\"rotate({}, {:.3}, {:.3})\">{}</text>",
                "</g>"
            ),
            self.wedge_path(wedge),
            fill,
            label.x,
            label.y,
            LABEL_FONT_SIZE,
            angle,
            label.x,
            label.y,
            wedge.label()
        )
    }

    /// Complete `<svg>` document
    pub fn render(&self) -> String {
        let half = VIEWBOX_HALF;
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">",
            -half,
            -half,
            2.0 * half,
            2.0 * half
        );

        svg.push_str(&format!(
            "<g id=\"{}\" style=\"transform: {}; transform-origin: 0 0\">",
            ROTOR_ID,
            rotor_transform(self.rotation)
        ));
        for wedge in Wedge::all() {
            svg.push_str(&self.wedge_group(wedge));
        }
        svg.push_str("</g>");

        let points = self
            .pointer_points()
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            "<polygon id=\"{}\" points=\"{}\" fill=\"#000\"/>",
            POINTER_ID, points
        ));

        svg.push_str("</svg>");
        svg
    }
}
