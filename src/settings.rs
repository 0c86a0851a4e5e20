//! Wheel settings
//!
//! Spin and animation tunables only. They are read once at start-up (from a
//! JSON file natively) and never written back. Demo mode is session state and
//! lives in `wheel::DemoMode`, not here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::easing::CubicBezier;
use crate::error::SettingsError;
use crate::wheel::SpinConfig;

/// Wheel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Geometry ===
    /// Pointer position, degrees clockwise from 12 o'clock
    pub pointer_angle: f64,

    // === Spin feel ===
    pub min_turns: u32,
    pub max_turns: u32,
    /// Rotation animation length (ms)
    pub animation_ms: u32,
    /// Delay before the result is shown (ms)
    pub settle_ms: u32,
    /// Animation timing curve
    pub easing: CubicBezier,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pointer_angle: DEFAULT_POINTER_ANGLE,

            min_turns: MIN_TURNS,
            max_turns: MAX_TURNS,
            animation_ms: SPIN_ANIMATION_MS,
            settle_ms: SETTLE_DELAY_MS,
            easing: CubicBezier::default(),
        }
    }
}

impl Settings {
    /// Env var naming a native settings file
    pub const PATH_ENV: &'static str = "SPIN_WHEEL_SETTINGS";

    /// Spin ranges are checked by `SpinConfig`; the easing curve here
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.spin_config().validate()?;
        if !self.easing.is_valid() {
            return Err(SettingsError::Invalid {
                field: "easing",
                reason: "x control points must be within 0..=1".to_string(),
            });
        }
        Ok(())
    }

    /// Spin parameters for the controller
    pub fn spin_config(&self) -> SpinConfig {
        SpinConfig {
            pointer_angle: self.pointer_angle,
            min_turns: self.min_turns,
            max_turns: self.max_turns,
            animation_ms: self.animation_ms,
            settle_ms: self.settle_ms,
        }
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load from the file named by `SPIN_WHEEL_SETTINGS`, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            return Self::default();
        };
        match Self::load_from(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file: {}", e);
                Self::default()
            }
        }
    }
}
