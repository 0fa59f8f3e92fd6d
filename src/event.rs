//! Canonical events produced by the engine, independent of which device
//! family reported the physical action. Downstream wraps these into its own
//! bubbling event objects; `target`/`current` stamping happens there.

use serde::{Deserialize, Serialize};

use crate::math::Point;

/// Modifier-key snapshot taken from the raw browser event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

/// Stamped once per raw event and shared by every canonical event derived
/// from it, so one wheel tick or touch frame never mixes modifier states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBase {
    /// Event timestamp in milliseconds (the browser's event clock).
    pub time: f64,
    pub modifiers: Modifiers,
}

/// Button-mask bits of the `buttons` field on pointer/mouse events.
pub mod buttons {
    pub const LEFT: u16 = 1;
    pub const RIGHT: u16 = 2;
    pub const MIDDLE: u16 = 4;

    pub fn left(mask: u16) -> bool {
        mask & LEFT != 0
    }

    pub fn right(mask: u16) -> bool {
        mask & RIGHT != 0
    }

    pub fn middle(mask: u16) -> bool {
        mask & MIDDLE != 0
    }
}

/// Payload for the single-pointer events.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerData {
    pub base: EventBase,
    /// Surface-local position.
    pub point: Point,
    /// Identifier of the pointer or touch contact driving the event.
    pub pointer_id: i32,
    /// Button mask; touch contacts report the primary button.
    pub buttons: u16,
}

/// Payload for pan commands (multi-touch centroid drift or wheel scroll).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub base: EventBase,
    /// Anchor of the transform: gesture centroid or wheel cursor position.
    pub center: Point,
    /// Translation delta for this frame.
    pub delta: Point,
}

/// Payload for zoom commands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomData {
    pub base: EventBase,
    pub center: Point,
    /// Multiplicative scale for this frame; `1.0` is neutral.
    pub scale: f64,
}

/// Payload for rotate commands. Rotation is in degrees, positive per the
/// geometry layer's angle convention.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotateData {
    pub base: EventBase,
    pub center: Point,
    pub rotation: f64,
}

/// The canonical interaction stream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown(PointerData),
    PointerMove(PointerData),
    PointerUp(PointerData),
    PointerCancel(PointerData),
    Move(MoveData),
    Zoom(ZoomData),
    Rotate(RotateData),
    TransformEnd,
}

impl InputEvent {
    /// Canonical events always bubble through the scene dispatch.
    pub fn bubbles(&self) -> bool {
        true
    }

    pub fn base(&self) -> Option<&EventBase> {
        match self {
            InputEvent::PointerDown(d)
            | InputEvent::PointerMove(d)
            | InputEvent::PointerUp(d)
            | InputEvent::PointerCancel(d) => Some(&d.base),
            InputEvent::Move(d) => Some(&d.base),
            InputEvent::Zoom(d) => Some(&d.base),
            InputEvent::Rotate(d) => Some(&d.base),
            InputEvent::TransformEnd => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_mask_helpers() {
        assert!(buttons::left(buttons::LEFT | buttons::MIDDLE));
        assert!(buttons::middle(buttons::LEFT | buttons::MIDDLE));
        assert!(!buttons::right(buttons::LEFT | buttons::MIDDLE));
        assert!(!buttons::left(0));
    }

    #[test]
    fn base_is_shared_by_pointer_variants() {
        let base = EventBase { time: 12.5, modifiers: Modifiers { shift: true, ..Default::default() } };
        let data = PointerData { base, point: Point::new(1.0, 2.0), pointer_id: 7, buttons: 1 };
        let down = InputEvent::PointerDown(data);
        assert_eq!(down.base().unwrap().time, 12.5);
        assert!(down.base().unwrap().modifiers.shift);
        assert!(down.bubbles());
        assert!(InputEvent::TransformEnd.base().is_none());
    }
}
