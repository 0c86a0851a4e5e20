//! Wheel model and spin control
//!
//! Everything here is independent of rendering:
//! - Wedge geometry and the pure rotation math can be tested without a display
//! - Time only advances when the host calls `advance`, so tests use virtual time

pub mod controller;
pub mod spin;
pub mod state;
pub mod timer;
pub mod trigger;
pub mod wedge;

pub use controller::{SpinConfig, SpinController, SpinOutcome};
pub use spin::{SpinPlan, WinningValue, plan_spin, round_rotation, wedge_center};
pub use state::{SpinEvent, SpinPhase, SpinState};
pub use timer::{TimerHandle, TimerQueue};
pub use trigger::{DemoMode, ForcedValue, choose_winning_value};
pub use wedge::{Wedge, wedge_under_pointer};
