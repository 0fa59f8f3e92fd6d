//! The interaction session: one per attached surface. Owns the arbitration
//! state machine, the press state, the tracked touch pair, the gesture
//! accumulator and the keyboard context, and emits the canonical stream
//! through the sink supplied at construction.
//!
//! Handlers run to completion on one thread; the sink is called while the
//! session is borrowed and must not re-enter it.

use crate::arbiter::{Arbiter, Family};
use crate::config::InteractionConfig;
use crate::event::{
    EventBase, InputEvent, MoveData, PointerData, RotateData, ZoomData, buttons,
};
use crate::keyboard::Keyboard;
use crate::math::Point;
use crate::multitouch::{PinchDelta, match_pair, pinch_delta};
use crate::raw::{RawGesture, RawPointer, RawTouch, RawWheel, TouchContact};
use crate::wheel::{GestureAccumulator, gesture_rotation, gesture_zoom_scale, wheel_move, wheel_scale};

/// State captured when a primary press begins; exists exactly while a press
/// has been emitted without a matching release or cancel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DownData {
    pub family: Family,
    pub pointer_id: i32,
    pub point: Point,
    pub buttons: u16,
    base: EventBase,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    PrimaryDown(DownData),
    MultiTouch { pair: [TouchContact; 2] },
}

pub struct InteractionSession {
    config: InteractionConfig,
    keyboard: Keyboard,
    arbiter: Arbiter,
    phase: Phase,
    gesture: GestureAccumulator,
    emit: Box<dyn FnMut(InputEvent)>,
}

impl InteractionSession {
    pub fn new(config: InteractionConfig, emit: impl FnMut(InputEvent) + 'static) -> Self {
        Self {
            config,
            keyboard: Keyboard::default(),
            arbiter: Arbiter::default(),
            phase: Phase::Idle,
            gesture: GestureAccumulator::default(),
            emit: Box::new(emit),
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InteractionConfig {
        &mut self.config
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn down_data(&self) -> Option<DownData> {
        match self.phase {
            Phase::PrimaryDown(down) => Some(down),
            _ => None,
        }
    }

    pub fn multi_touch_active(&self) -> bool {
        matches!(self.phase, Phase::MultiTouch { .. })
    }

    /// Returns the session to `Idle`: clears the press and tracked pair,
    /// cancels the debounce deadline, resets the gesture accumulator and the
    /// keyboard context. Called by the DOM seam on detach; idempotent.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.arbiter.reset();
        self.gesture.reset();
        self.keyboard.clear();
    }

    // pointer

    pub fn on_pointer_down(&mut self, e: &RawPointer) {
        self.arbiter.note_pointer();
        if self.multi_touch_active() {
            return;
        }
        self.press(Family::Pointer, e);
    }

    pub fn on_pointer_move(&mut self, e: &RawPointer) {
        self.arbiter.note_pointer();
        if self.multi_touch_active() || self.ignore_window_event(e.on_view) {
            return;
        }
        self.slide(e);
    }

    pub fn on_pointer_up(&mut self, e: &RawPointer) {
        if self.multi_touch_active() || self.ignore_window_event(e.on_view) {
            return;
        }
        self.release(Family::Pointer, e);
    }

    pub fn on_pointer_cancel(&mut self) {
        if self.multi_touch_active() {
            return;
        }
        self.cancel_press();
    }

    // mouse

    pub fn on_mouse_down(&mut self, e: &RawPointer) {
        if self.multi_touch_active() || !self.arbiter.allows_mouse(e.time) {
            return;
        }
        self.press(Family::Mouse, e);
    }

    pub fn on_mouse_move(&mut self, e: &RawPointer) {
        if self.multi_touch_active()
            || !self.arbiter.allows_mouse(e.time)
            || self.ignore_window_event(e.on_view)
        {
            return;
        }
        self.slide(e);
    }

    pub fn on_mouse_up(&mut self, e: &RawPointer) {
        if self.multi_touch_active()
            || !self.arbiter.allows_mouse(e.time)
            || self.ignore_window_event(e.on_view)
        {
            return;
        }
        self.release(Family::Mouse, e);
    }

    // touch

    pub fn on_touch_start(&mut self, e: &RawTouch) {
        self.arbiter.touch_start();
        if e.touches.len() >= 2 {
            // Entering (or re-entering) multi-touch kills any single drag
            // and snapshots the pair tracked for the rest of the gesture.
            self.cancel_press();
            self.phase = Phase::MultiTouch { pair: [e.touches[0], e.touches[1]] };
            return;
        }
        if !self.arbiter.allows_touch() {
            return;
        }
        if let Some(contact) = e.touches.first() {
            self.press(Family::Touch, &touch_pointer(e, contact));
        }
    }

    pub fn on_touch_move(&mut self, e: &RawTouch) {
        if let Phase::MultiTouch { pair } = self.phase {
            if e.touches.len() >= 2
                && let Some(next) = match_pair(&e.touches, &pair)
            {
                let delta = pinch_delta(
                    &[pair[0].point, pair[1].point],
                    &[next[0].point, next[1].point],
                );
                self.phase = Phase::MultiTouch { pair: next };
                self.emit_transform(delta, base_of(e.time, e.modifiers));
            }
            // A frame missing a tracked identifier is discarded, not guessed.
            return;
        }
        if !self.arbiter.allows_touch() || self.ignore_window_event(e.on_view) {
            return;
        }
        if let Some(contact) = e.touches.first() {
            self.slide(&touch_pointer(e, contact));
        }
    }

    pub fn on_touch_end(&mut self, e: &RawTouch) {
        self.arbiter.touch_released(e.time, e.touches.is_empty());
        if self.multi_touch_active() {
            if e.touches.len() < 2 {
                self.phase = Phase::Idle;
                (self.emit)(InputEvent::TransformEnd);
            }
            return;
        }
        if !self.arbiter.allows_touch() {
            return;
        }
        if let Some(contact) = e.changed.first().or_else(|| e.touches.first()) {
            self.release(Family::Touch, &touch_pointer(e, contact));
        }
    }

    pub fn on_touch_cancel(&mut self, e: &RawTouch) {
        self.arbiter.touch_released(e.time, e.touches.is_empty());
        if self.multi_touch_active() {
            if e.touches.len() < 2 {
                self.phase = Phase::Idle;
                (self.emit)(InputEvent::TransformEnd);
            }
            return;
        }
        if !self.arbiter.allows_touch() {
            return;
        }
        self.cancel_press();
    }

    // wheel

    pub fn on_wheel(&mut self, e: &RawWheel) {
        let wheel = self.config.wheel;
        let scale = match wheel.get_scale {
            Some(calc) => calc(e, &wheel),
            None => wheel_scale(e, &wheel),
        };
        let base = base_of(e.time, e.modifiers);
        if scale != 1.0 {
            (self.emit)(InputEvent::Zoom(ZoomData { base, center: e.point, scale }));
        } else {
            let delta = match wheel.get_move {
                Some(calc) => calc(e, &wheel),
                None => wheel_move(e, &wheel),
            };
            (self.emit)(InputEvent::Move(MoveData { base, center: e.point, delta }));
        }
    }

    // platform gesture

    pub fn on_gesture_start(&mut self, _e: &RawGesture) {
        self.gesture.reset();
    }

    pub fn on_gesture_change(&mut self, e: &RawGesture) {
        let (change_scale, change_angle) = self.gesture.advance(e.scale, e.rotation);
        let base = base_of(e.time, e.modifiers);
        (self.emit)(InputEvent::Zoom(ZoomData {
            base,
            center: e.point,
            scale: gesture_zoom_scale(change_scale),
        }));
        (self.emit)(InputEvent::Rotate(RotateData {
            base,
            center: e.point,
            rotation: gesture_rotation(change_angle, self.config.wheel.rotate_speed),
        }));
    }

    pub fn on_gesture_end(&mut self, _e: &RawGesture) {
        (self.emit)(InputEvent::TransformEnd);
    }

    // keyboard

    pub fn on_key_down(&mut self, code: &str) {
        self.keyboard.set_down(code);
    }

    pub fn on_key_up(&mut self, code: &str) {
        self.keyboard.set_up(code);
    }

    pub fn on_window_blur(&mut self) {
        self.keyboard.clear();
    }

    // emission

    fn press(&mut self, family: Family, e: &RawPointer) {
        let down = DownData {
            family,
            pointer_id: e.pointer_id,
            point: e.point,
            buttons: e.buttons,
            base: base_of(e.time, e.modifiers),
        };
        self.phase = Phase::PrimaryDown(down);
        (self.emit)(InputEvent::PointerDown(pointer_data(e)));
    }

    fn slide(&mut self, e: &RawPointer) {
        (self.emit)(InputEvent::PointerMove(pointer_data(e)));
    }

    fn release(&mut self, family: Family, e: &RawPointer) {
        match self.phase {
            Phase::PrimaryDown(down) if down.family == family => {}
            // No unmatched releases: without a press of this family the
            // stream stays silent.
            _ => return,
        }
        self.phase = Phase::Idle;
        (self.emit)(InputEvent::PointerUp(pointer_data(e)));
    }

    /// Cancels an in-flight press, synthesizing the cancel event from the
    /// press-time data since no raw event accompanies it.
    fn cancel_press(&mut self) {
        if let Phase::PrimaryDown(down) = std::mem::replace(&mut self.phase, Phase::Idle) {
            (self.emit)(InputEvent::PointerCancel(PointerData {
                base: down.base,
                point: down.point,
                pointer_id: down.pointer_id,
                buttons: down.buttons,
            }));
        }
    }

    fn emit_transform(&mut self, d: PinchDelta, base: EventBase) {
        (self.emit)(InputEvent::Rotate(RotateData {
            base,
            center: d.center,
            rotation: d.angle.to_degrees(),
        }));
        (self.emit)(InputEvent::Zoom(ZoomData { base, center: d.center, scale: d.scale }));
        (self.emit)(InputEvent::Move(MoveData { base, center: d.center, delta: d.pan }));
    }

    /// Window listeners see traffic for the whole page: with no active press
    /// and a foreign target the event is not ours.
    fn ignore_window_event(&self, on_view: bool) -> bool {
        !matches!(self.phase, Phase::PrimaryDown(_)) && !on_view
    }
}

fn base_of(time: f64, modifiers: crate::event::Modifiers) -> EventBase {
    EventBase { time, modifiers }
}

fn pointer_data(e: &RawPointer) -> PointerData {
    PointerData {
        base: base_of(e.time, e.modifiers),
        point: e.point,
        pointer_id: e.pointer_id,
        buttons: e.buttons,
    }
}

fn touch_pointer(e: &RawTouch, contact: &TouchContact) -> RawPointer {
    RawPointer {
        time: e.time,
        point: contact.point,
        pointer_id: contact.id,
        buttons: buttons::LEFT,
        modifiers: e.modifiers,
        on_view: e.on_view,
    }
}
