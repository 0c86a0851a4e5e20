//! Wheel presentation
//!
//! Produces SVG markup only; animating the rotor is left to the host
//! (a CSS transition in the browser).

pub mod svg;

pub use svg::{POINTER_ID, ROTOR_ID, WheelSvg, rotor_transform};
