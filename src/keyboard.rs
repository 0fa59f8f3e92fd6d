//! Held-key tracking. One writer (the session's key-down/key-up entry
//! points), many synchronous readers. Cleared on window blur so keys whose
//! key-up the browser swallowed do not stay stuck; a key-up lost while the
//! window keeps focus is not recoverable and stays held by contract.

use std::collections::HashSet;

#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    held: HashSet<String>,
}

impl Keyboard {
    /// Marks a physical key code as held. Repeats for an already-held key
    /// (browser auto-repeat) are idempotent.
    pub fn set_down(&mut self, code: &str) {
        self.held.insert(code.to_owned());
    }

    pub fn set_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    pub fn space_held(&self) -> bool {
        self.is_held("Space")
    }

    pub fn alt_held(&self) -> bool {
        self.is_held("AltLeft") || self.is_held("AltRight")
    }

    pub fn ctrl_held(&self) -> bool {
        self.is_held("ControlLeft") || self.is_held("ControlRight")
    }

    pub fn shift_held(&self) -> bool {
        self.is_held("ShiftLeft") || self.is_held("ShiftRight")
    }

    pub fn meta_held(&self) -> bool {
        self.is_held("MetaLeft") || self.is_held("MetaRight")
    }

    /// Drops every held key. Invoked on window blur / visibility loss.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_up_round_trip() {
        let mut kb = Keyboard::default();
        kb.set_down("Space");
        assert!(kb.space_held());
        kb.set_up("Space");
        assert!(!kb.space_held());
    }

    #[test]
    fn repeated_down_is_idempotent() {
        let mut kb = Keyboard::default();
        kb.set_down("ShiftLeft");
        kb.set_down("ShiftLeft");
        assert!(kb.shift_held());
        // One release is enough no matter how many repeats arrived.
        kb.set_up("ShiftLeft");
        assert!(!kb.shift_held());
    }

    #[test]
    fn modifier_helpers_check_both_sides() {
        let mut kb = Keyboard::default();
        kb.set_down("ControlRight");
        kb.set_down("MetaLeft");
        assert!(kb.ctrl_held());
        assert!(kb.meta_held());
        assert!(!kb.alt_held());
    }

    #[test]
    fn clear_releases_everything() {
        let mut kb = Keyboard::default();
        kb.set_down("AltLeft");
        kb.set_down("KeyA");
        kb.clear();
        assert!(!kb.alt_held());
        assert!(!kb.is_held("KeyA"));
    }
}
