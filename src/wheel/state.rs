//! Spin state and events

use serde::{Deserialize, Serialize};

use super::spin::{SpinPlan, WinningValue};

/// Idle -> Spinning -> Idle, nothing else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    #[default]
    Idle,
    /// Animation running; further spin requests are ignored
    Spinning,
}

/// Observable wheel state, owned by the controller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpinState {
    /// Cumulative clockwise rotation in degrees; only ever grows
    pub rotation: f64,
    pub phase: SpinPhase,
    /// Last settled value, cleared while a spin is running
    pub result: Option<WinningValue>,
    /// Completed spins this session
    pub spins: u32,
}

impl SpinState {
    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    pub(crate) fn begin(&mut self, plan: &SpinPlan) {
        self.phase = SpinPhase::Spinning;
        self.result = None;
        self.rotation = plan.to;
    }

    pub(crate) fn settle(&mut self, value: WinningValue) {
        self.phase = SpinPhase::Idle;
        self.result = Some(value);
        self.spins += 1;
    }
}

/// Notifications for the host, drained after each call into the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpinEvent {
    /// Animate to `plan.to` over `animation_ms`
    Started { plan: SpinPlan, animation_ms: u32 },
    /// The wheel has come to rest; show the value
    Settled { value: WinningValue, rotation: f64 },
}
