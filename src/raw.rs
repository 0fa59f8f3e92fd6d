//! Platform-free projections of the browser input events. The DOM seam
//! builds these (client coordinates already mapped into surface-local space)
//! so the whole core stays testable without a browser.

use serde::{Deserialize, Serialize};

use crate::event::Modifiers;
use crate::math::Point;

/// One pointer- or mouse-family event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawPointer {
    pub time: f64,
    pub point: Point,
    pub pointer_id: i32,
    pub buttons: u16,
    pub modifiers: Modifiers,
    /// Whether the browser target was the attached surface element. Window
    /// listeners see traffic for the whole page; this drives the filter.
    pub on_view: bool,
}

/// One contact of a touch frame, identifier stable across frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchContact {
    pub id: i32,
    pub point: Point,
}

/// One touch-family event: the full current contact list plus the contacts
/// that changed in this event (for `touchend`, the lifted ones).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawTouch {
    pub time: f64,
    pub touches: Vec<TouchContact>,
    pub changed: Vec<TouchContact>,
    pub modifiers: Modifiers,
    pub on_view: bool,
}

impl RawTouch {
    /// The contact driving single-pointer semantics: the first active one,
    /// falling back to the first changed one once all fingers lifted.
    pub fn primary(&self) -> Option<&TouchContact> {
        self.touches.first().or_else(|| self.changed.first())
    }
}

/// One wheel tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawWheel {
    pub time: f64,
    pub point: Point,
    pub delta: Point,
    pub modifiers: Modifiers,
}

/// One Safari two-finger gesture event; scale/rotation are the absolute
/// values the platform reports since the gesture began.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawGesture {
    pub time: f64,
    pub point: Point,
    pub scale: f64,
    pub rotation: f64,
    pub modifiers: Modifiers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_prefers_active_contacts() {
        let frame = RawTouch {
            time: 0.0,
            touches: vec![TouchContact { id: 3, point: Point::new(1.0, 1.0) }],
            changed: vec![TouchContact { id: 9, point: Point::new(2.0, 2.0) }],
            modifiers: Modifiers::default(),
            on_view: true,
        };
        assert_eq!(frame.primary().unwrap().id, 3);

        let ended = RawTouch { touches: vec![], ..frame };
        assert_eq!(ended.primary().unwrap().id, 9);
    }
}
