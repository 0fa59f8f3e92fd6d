//! Recognized configuration surface of the engine.

use serde::{Deserialize, Serialize};

use crate::math::Point;
use crate::raw::RawWheel;

/// Override hook for the wheel scale calculator.
pub type WheelScaleFn = fn(&RawWheel, &WheelConfig) -> f64;
/// Override hook for the wheel pan calculator.
pub type WheelMoveFn = fn(&RawWheel, &WheelConfig) -> Point;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PointerConfig {
    /// Call `preventDefault` on pointer/mouse presses (and on releases while
    /// a press is active).
    pub prevent_default: bool,
    /// Suppress the browser context menu on the surface element.
    pub prevent_default_menu: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Call `preventDefault` on wheel and platform gesture events.
    pub prevent_default: bool,
    /// Strength of the wheel zoom step, clamped into `[0, 1]` on use.
    pub zoom_speed: f64,
    /// Multiplier applied to wheel pan deltas.
    pub move_speed: f64,
    /// Strength of platform-gesture rotation, clamped into `[0, 1]` on use.
    pub rotate_speed: f64,
    #[serde(skip)]
    pub get_scale: Option<WheelScaleFn>,
    #[serde(skip)]
    pub get_move: Option<WheelMoveFn>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            prevent_default: true,
            zoom_speed: 0.5,
            move_speed: 1.0,
            rotate_speed: 0.5,
            get_scale: None,
            get_move: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct InteractionConfig {
    pub pointer: PointerConfig,
    pub wheel: WheelConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = InteractionConfig::default();
        assert!(!config.pointer.prevent_default);
        assert!(!config.pointer.prevent_default_menu);
        assert!(config.wheel.prevent_default);
        assert_eq!(config.wheel.zoom_speed, 0.5);
        assert_eq!(config.wheel.move_speed, 1.0);
        assert_eq!(config.wheel.rotate_speed, 0.5);
        assert!(config.wheel.get_scale.is_none());
        assert!(config.wheel.get_move.is_none());
    }

    #[test]
    fn serde_round_trip_skips_override_hooks() {
        let mut config = InteractionConfig::default();
        config.wheel.rotate_speed = 0.8;
        config.wheel.get_scale = Some(|_, _| 2.0);

        let json = serde_json::to_string(&config).unwrap();
        let back: InteractionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.wheel.rotate_speed, 0.8);
        // Function hooks are runtime-only wiring; they do not survive serde.
        assert!(back.wheel.get_scale.is_none());
    }
}
