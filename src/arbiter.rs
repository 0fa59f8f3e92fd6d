//! Event-family arbitration: exactly one of {pointer, touch, mouse} drives
//! single-pointer semantics at a time, priority pointer > touch > mouse.
//! Browsers replay a touch as synthetic mouse events after the finger lifts;
//! the debounce window swallows those. The window is held as an explicit
//! deadline compared against event timestamps rather than a platform timer,
//! so cancellation (new touch, reset, detach) is just clearing the field.

use serde::{Deserialize, Serialize};

/// How long mouse events stay suppressed after the last touch contact lifts.
pub const MOUSE_DEBOUNCE_MS: f64 = 500.0;

/// Which device family owns an interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Family {
    Pointer,
    Mouse,
    Touch,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Arbiter {
    use_pointer: bool,
    touch_held: bool,
    mouse_block_until: Option<f64>,
}

impl Arbiter {
    /// Latches the pointer family. Once a surface has reported one pointer
    /// event it keeps reporting them, so the latch holds for the lifetime of
    /// the session and survives `reset`.
    pub fn note_pointer(&mut self) {
        self.use_pointer = true;
    }

    pub fn pointer_seen(&self) -> bool {
        self.use_pointer
    }

    /// Touch may drive single-pointer semantics only while no pointer
    /// family has been observed.
    pub fn allows_touch(&self) -> bool {
        !self.use_pointer
    }

    /// A touch contact went down: mouse suppression becomes unconditional
    /// and any pending debounce deadline is cancelled.
    pub fn touch_start(&mut self) {
        self.touch_held = true;
        self.mouse_block_until = None;
    }

    /// A touch frame ended. Only when the last contact lifted does the
    /// debounce window start; with fingers still down, mouse events stay
    /// suppressed outright.
    pub fn touch_released(&mut self, time: f64, all_lifted: bool) {
        if all_lifted {
            self.touch_held = false;
            self.mouse_block_until = Some(time + MOUSE_DEBOUNCE_MS);
        }
    }

    pub fn allows_mouse(&self, time: f64) -> bool {
        if self.use_pointer || self.touch_held {
            return false;
        }
        self.mouse_block_until.is_none_or(|until| time >= until)
    }

    /// Clears transient suppression state. The pointer latch is a device
    /// capability, not interaction state, and stays.
    pub fn reset(&mut self) {
        self.touch_held = false;
        self.mouse_block_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_latch_suppresses_touch_and_mouse() {
        let mut arbiter = Arbiter::default();
        assert!(arbiter.allows_touch());
        assert!(arbiter.allows_mouse(0.0));

        arbiter.note_pointer();
        assert!(!arbiter.allows_touch());
        assert!(!arbiter.allows_mouse(10_000.0));

        // The latch survives a reset.
        arbiter.reset();
        assert!(arbiter.pointer_seen());
        assert!(!arbiter.allows_mouse(10_000.0));
    }

    #[test]
    fn debounce_window_swallows_synthetic_mouse() {
        let mut arbiter = Arbiter::default();
        arbiter.touch_start();
        assert!(!arbiter.allows_mouse(1_000.0));

        arbiter.touch_released(1_000.0, true);
        assert!(!arbiter.allows_mouse(1_000.0));
        assert!(!arbiter.allows_mouse(1_499.9));
        assert!(arbiter.allows_mouse(1_500.0));
    }

    #[test]
    fn new_touch_cancels_pending_debounce() {
        let mut arbiter = Arbiter::default();
        arbiter.touch_start();
        arbiter.touch_released(1_000.0, true);

        arbiter.touch_start();
        assert!(!arbiter.allows_mouse(2_000.0));
        arbiter.touch_released(2_000.0, true);
        assert!(!arbiter.allows_mouse(2_400.0));
        assert!(arbiter.allows_mouse(2_500.0));
    }

    #[test]
    fn partial_release_keeps_mouse_suppressed() {
        let mut arbiter = Arbiter::default();
        arbiter.touch_start();
        arbiter.touch_released(1_000.0, false);
        // One finger lifted, another still down: no window, still held.
        assert!(!arbiter.allows_mouse(5_000.0));

        arbiter.touch_released(5_000.0, true);
        assert!(arbiter.allows_mouse(5_500.0));
    }

    #[test]
    fn reset_cancels_suppression() {
        let mut arbiter = Arbiter::default();
        arbiter.touch_start();
        arbiter.touch_released(1_000.0, true);
        arbiter.reset();
        assert!(arbiter.allows_mouse(1_001.0));
    }
}
