//! Wires a browser element to an [`InteractionSession`]. Press origins,
//! wheel ticks and platform gestures are element-scoped; moves, releases,
//! cancels, keys and blur are window-scoped so drags survive leaving the
//! element. The listener set is a static table walked for both attach and
//! detach. Everything here needs a real DOM, so behavior lives (and is
//! tested) in the platform-free core.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{EventTarget, HtmlElement};

use crate::config::InteractionConfig;
use crate::event::{InputEvent, Modifiers};
use crate::math::{Bounds, Point, to_local};
use crate::raw::{RawGesture, RawPointer, RawTouch, RawWheel, TouchContact};
use crate::session::InteractionSession;

type Handler = Closure<dyn FnMut(web_sys::Event)>;

struct Listener {
    on_window: bool,
    name: &'static str,
    handler: Handler,
}

/// Listener lifecycle for one surface element. Detach is idempotent, safe
/// without a prior attach, and runs on drop; it always cancels the
/// session's debounce state via [`InteractionSession::reset`].
pub struct DomInteraction {
    view: HtmlElement,
    session: Rc<RefCell<InteractionSession>>,
    listeners: Vec<Listener>,
}

impl DomInteraction {
    pub fn new(
        view: HtmlElement,
        config: InteractionConfig,
        emit: impl FnMut(InputEvent) + 'static,
    ) -> Self {
        Self {
            view,
            session: Rc::new(RefCell::new(InteractionSession::new(config, emit))),
            listeners: Vec::new(),
        }
    }

    pub fn session(&self) -> &Rc<RefCell<InteractionSession>> {
        &self.session
    }

    pub fn attach(&mut self) -> Result<(), JsValue> {
        if !self.listeners.is_empty() {
            return Ok(());
        }
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let listeners = self.build_listeners();
        for listener in &listeners {
            let target: &EventTarget =
                if listener.on_window { window.as_ref() } else { self.view.as_ref() };
            target.add_event_listener_with_callback(
                listener.name,
                listener.handler.as_ref().unchecked_ref(),
            )?;
        }
        self.listeners = listeners;
        Ok(())
    }

    pub fn detach(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let window = web_sys::window();
        for listener in self.listeners.drain(..) {
            let target: Option<&EventTarget> = if listener.on_window {
                window.as_ref().map(|w| w.as_ref())
            } else {
                Some(self.view.as_ref())
            };
            if let Some(target) = target {
                let _ = target.remove_event_listener_with_callback(
                    listener.name,
                    listener.handler.as_ref().unchecked_ref(),
                );
            }
        }
        self.session.borrow_mut().reset();
    }

    fn build_listeners(&self) -> Vec<Listener> {
        let mut out = Vec::new();

        // Pointer family: highest priority, supersedes touch and mouse.
        out.push(self.listener(false, "pointerdown", |s, view, e| {
            let e: web_sys::PointerEvent = e.unchecked_into();
            if s.config().pointer.prevent_default {
                e.prevent_default();
            }
            s.on_pointer_down(&pointer_raw(&e, view));
        }));
        out.push(self.listener(true, "pointermove", |s, view, e| {
            let e: web_sys::PointerEvent = e.unchecked_into();
            s.on_pointer_move(&pointer_raw(&e, view));
        }));
        out.push(self.listener(true, "pointerup", |s, view, e| {
            let e: web_sys::PointerEvent = e.unchecked_into();
            if s.down_data().is_some() && s.config().pointer.prevent_default {
                e.prevent_default();
            }
            s.on_pointer_up(&pointer_raw(&e, view));
        }));
        out.push(self.listener(true, "pointercancel", |s, _view, _e| {
            s.on_pointer_cancel();
        }));

        // Mouse family: only drives anything on pointer-less engines.
        out.push(self.listener(false, "mousedown", |s, view, e| {
            let e: web_sys::MouseEvent = e.unchecked_into();
            if s.config().pointer.prevent_default {
                e.prevent_default();
            }
            s.on_mouse_down(&mouse_raw(&e, view));
        }));
        out.push(self.listener(true, "mousemove", |s, view, e| {
            let e: web_sys::MouseEvent = e.unchecked_into();
            s.on_mouse_move(&mouse_raw(&e, view));
        }));
        out.push(self.listener(true, "mouseup", |s, view, e| {
            let e: web_sys::MouseEvent = e.unchecked_into();
            if s.down_data().is_some() && s.config().pointer.prevent_default {
                e.prevent_default();
            }
            s.on_mouse_up(&mouse_raw(&e, view));
        }));

        // Touch family: single-pointer fallback plus the multi-touch path.
        out.push(self.listener(false, "touchstart", |s, view, e| {
            let e: web_sys::TouchEvent = e.unchecked_into();
            e.prevent_default();
            s.on_touch_start(&touch_raw(&e, view));
        }));
        out.push(self.listener(true, "touchmove", |s, view, e| {
            let e: web_sys::TouchEvent = e.unchecked_into();
            s.on_touch_move(&touch_raw(&e, view));
        }));
        out.push(self.listener(true, "touchend", |s, view, e| {
            let e: web_sys::TouchEvent = e.unchecked_into();
            s.on_touch_end(&touch_raw(&e, view));
        }));
        out.push(self.listener(true, "touchcancel", |s, view, e| {
            let e: web_sys::TouchEvent = e.unchecked_into();
            s.on_touch_cancel(&touch_raw(&e, view));
        }));

        // Wheel and the Safari two-finger gesture family.
        out.push(self.listener(false, "wheel", |s, view, e| {
            let e: web_sys::WheelEvent = e.unchecked_into();
            if s.config().wheel.prevent_default {
                e.prevent_default();
            }
            s.on_wheel(&wheel_raw(&e, view));
        }));
        out.push(self.listener(false, "gesturestart", |s, view, e| {
            if s.config().wheel.prevent_default {
                e.prevent_default();
            }
            s.on_gesture_start(&gesture_raw(&e, view));
        }));
        out.push(self.listener(false, "gesturechange", |s, view, e| {
            if s.config().wheel.prevent_default {
                e.prevent_default();
            }
            s.on_gesture_change(&gesture_raw(&e, view));
        }));
        out.push(self.listener(false, "gestureend", |s, view, e| {
            if s.config().wheel.prevent_default {
                e.prevent_default();
            }
            s.on_gesture_end(&gesture_raw(&e, view));
        }));

        // Keyboard context and its blur-clear contract.
        out.push(self.listener(true, "keydown", |s, _view, e| {
            let e: web_sys::KeyboardEvent = e.unchecked_into();
            s.on_key_down(&e.code());
        }));
        out.push(self.listener(true, "keyup", |s, _view, e| {
            let e: web_sys::KeyboardEvent = e.unchecked_into();
            s.on_key_up(&e.code());
        }));
        out.push(self.listener(true, "blur", |s, _view, _e| {
            s.on_window_blur();
        }));

        out.push(self.listener(false, "contextmenu", |s, _view, e| {
            if s.config().pointer.prevent_default_menu {
                e.prevent_default();
            }
        }));

        out
    }

    fn listener(
        &self,
        on_window: bool,
        name: &'static str,
        handle: fn(&mut InteractionSession, &HtmlElement, web_sys::Event),
    ) -> Listener {
        let session = self.session.clone();
        let view = self.view.clone();
        let handler = Closure::wrap(Box::new(move |e: web_sys::Event| {
            handle(&mut session.borrow_mut(), &view, e);
        }) as Box<dyn FnMut(_)>);
        Listener { on_window, name, handler }
    }
}

impl Drop for DomInteraction {
    fn drop(&mut self) {
        self.detach();
    }
}

// raw-event conversion

fn view_bounds(view: &HtmlElement) -> Bounds {
    let rect = view.get_bounding_client_rect();
    Bounds { x: rect.x(), y: rect.y(), width: rect.width(), height: rect.height() }
}

fn is_view_target(e: &web_sys::Event, view: &HtmlElement) -> bool {
    let view: &EventTarget = view.as_ref();
    e.target().is_some_and(|t| &t == view)
}

fn mouse_modifiers(e: &web_sys::MouseEvent) -> Modifiers {
    Modifiers { alt: e.alt_key(), ctrl: e.ctrl_key(), shift: e.shift_key(), meta: e.meta_key() }
}

fn pointer_raw(e: &web_sys::PointerEvent, view: &HtmlElement) -> RawPointer {
    RawPointer {
        time: e.time_stamp(),
        point: to_local(Point::new(e.client_x() as f64, e.client_y() as f64), &view_bounds(view)),
        pointer_id: e.pointer_id(),
        buttons: e.buttons(),
        modifiers: mouse_modifiers(e),
        on_view: is_view_target(e, view),
    }
}

fn mouse_raw(e: &web_sys::MouseEvent, view: &HtmlElement) -> RawPointer {
    RawPointer {
        time: e.time_stamp(),
        point: to_local(Point::new(e.client_x() as f64, e.client_y() as f64), &view_bounds(view)),
        pointer_id: 1,
        buttons: e.buttons(),
        modifiers: mouse_modifiers(e),
        on_view: is_view_target(e, view),
    }
}

fn touch_raw(e: &web_sys::TouchEvent, view: &HtmlElement) -> RawTouch {
    let bounds = view_bounds(view);
    RawTouch {
        time: e.time_stamp(),
        touches: contacts(&e.touches(), &bounds),
        changed: contacts(&e.changed_touches(), &bounds),
        modifiers: Modifiers {
            alt: e.alt_key(),
            ctrl: e.ctrl_key(),
            shift: e.shift_key(),
            meta: e.meta_key(),
        },
        on_view: is_view_target(e, view),
    }
}

fn contacts(list: &web_sys::TouchList, bounds: &Bounds) -> Vec<TouchContact> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchContact {
            id: t.identifier(),
            point: to_local(Point::new(t.client_x() as f64, t.client_y() as f64), bounds),
        })
        .collect()
}

fn wheel_raw(e: &web_sys::WheelEvent, view: &HtmlElement) -> RawWheel {
    RawWheel {
        time: e.time_stamp(),
        point: to_local(Point::new(e.client_x() as f64, e.client_y() as f64), &view_bounds(view)),
        delta: Point::new(e.delta_x(), e.delta_y()),
        modifiers: mouse_modifiers(e),
    }
}

/// Safari's GestureEvent has no web-sys binding; read its fields through
/// reflection and fall back to neutral values when absent.
fn gesture_raw(e: &web_sys::Event, view: &HtmlElement) -> RawGesture {
    RawGesture {
        time: e.time_stamp(),
        point: to_local(
            Point::new(js_number(e, "clientX").unwrap_or(0.0), js_number(e, "clientY").unwrap_or(0.0)),
            &view_bounds(view),
        ),
        scale: js_number(e, "scale").unwrap_or(1.0),
        rotation: js_number(e, "rotation").unwrap_or(0.0),
        modifiers: Modifiers {
            alt: js_bool(e, "altKey"),
            ctrl: js_bool(e, "ctrlKey"),
            shift: js_bool(e, "shiftKey"),
            meta: js_bool(e, "metaKey"),
        },
    }
}

fn js_number(e: &web_sys::Event, key: &str) -> Option<f64> {
    js_sys::Reflect::get(e.as_ref(), &JsValue::from_str(key)).ok().and_then(|v| v.as_f64())
}

fn js_bool(e: &web_sys::Event, key: &str) -> bool {
    js_sys::Reflect::get(e.as_ref(), &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
