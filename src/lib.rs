//! Input normalization & gesture engine for a browser canvas surface.
//!
//! Browsers report one physical action through several overlapping event
//! families (pointer, mouse, touch, wheel, Safari's two-finger gesture).
//! This crate arbitrates between them (priority pointer > touch > mouse,
//! with a debounce swallowing the synthetic mouse replay after a touch),
//! tracks two-finger state into pan/zoom/rotate transforms, converts wheel
//! ticks into the same vocabulary, and emits one canonical event stream.
//!
//! The core (`session` and everything below it) is platform-free and
//! operates on surface-local raw event structs; `dom` binds it to a real
//! element via `web-sys`. The consumer supplies an emit sink and wraps the
//! canonical events into its own bubbling scene dispatch.

pub mod arbiter;
pub mod config;
pub mod dom;
pub mod event;
pub mod keyboard;
pub mod math;
pub mod multitouch;
pub mod raw;
pub mod session;
pub mod wheel;

pub use arbiter::{Family, MOUSE_DEBOUNCE_MS};
pub use config::{InteractionConfig, PointerConfig, WheelConfig};
pub use dom::DomInteraction;
pub use event::{EventBase, InputEvent, Modifiers, MoveData, PointerData, RotateData, ZoomData};
pub use keyboard::Keyboard;
pub use math::{Bounds, Point, to_local};
pub use multitouch::{PinchDelta, pinch_delta};
pub use raw::{RawGesture, RawPointer, RawTouch, RawWheel, TouchContact};
pub use session::{DownData, InteractionSession};
pub use wheel::GestureAccumulator;
