//! Converts wheel ticks and Safari gesture deltas into the transform
//! vocabulary. The gesture formulas (the squared scale and the
//! `/ 4 + 0.1` rotate-speed remap) are empirically tuned behavioral
//! contracts; tests pin their exact outputs.

use std::f64::consts::PI;

use crate::config::WheelConfig;
use crate::math::{Point, within};
use crate::raw::RawWheel;

const MIN_WHEEL_SCALE: f64 = 0.5;
const MAX_WHEEL_SCALE: f64 = 1.5;

/// Default wheel scale calculator. Without the ctrl/meta precision-zoom
/// trigger the result is the neutral `1.0`; with it, one tick maps to a
/// clamped step monotonic in the delta.
pub fn wheel_scale(e: &RawWheel, config: &WheelConfig) -> f64 {
    if !(e.modifiers.ctrl || e.modifiers.meta) {
        return 1.0;
    }
    let delta = if e.delta.y != 0.0 { e.delta.y } else { e.delta.x };
    let speed = within(config.zoom_speed, 0.0, 1.0);
    within(1.0 - delta * speed / 100.0, MIN_WHEEL_SCALE, MAX_WHEEL_SCALE)
}

/// Default wheel pan calculator: scroll content against the delta.
pub fn wheel_move(e: &RawWheel, config: &WheelConfig) -> Point {
    Point::new(
        -e.delta.x * config.move_speed * 2.0,
        -e.delta.y * config.move_speed * 2.0,
    )
}

/// Last-seen absolute scale/rotation of the platform gesture family, used
/// to turn the absolute reports into per-event increments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureAccumulator {
    scale: f64,
    rotation: f64,
}

impl Default for GestureAccumulator {
    fn default() -> Self {
        Self { scale: 1.0, rotation: 0.0 }
    }
}

impl GestureAccumulator {
    /// Called at gesture start.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Folds in the latest absolute report and returns
    /// `(change_scale, change_angle)` relative to the previous one.
    pub fn advance(&mut self, scale: f64, rotation: f64) -> (f64, f64) {
        let change_scale = if self.scale.abs() < f64::EPSILON { 1.0 } else { scale / self.scale };
        let change_angle = rotation - self.rotation;
        self.scale = scale;
        self.rotation = rotation;
        (change_scale, change_angle)
    }
}

/// The gesture family under-reports relative to the touch-geometry path;
/// squaring the per-event scale change compensates.
pub fn gesture_zoom_scale(change_scale: f64) -> f64 {
    change_scale * change_scale
}

/// Degrees of canonical rotation for one gesture change. `rotate_speed` is
/// clamped into `[0, 1]` then remapped into `[0.1, 0.35]`, keeping rotation
/// feel consistent with the touch-geometry path.
pub fn gesture_rotation(change_angle: f64, rotate_speed: f64) -> f64 {
    let speed = within(rotate_speed, 0.0, 1.0);
    change_angle / PI * 180.0 * (speed / 4.0 + 0.1)
}
