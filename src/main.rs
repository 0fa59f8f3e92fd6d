// Demo surface: a canvas whose camera is driven entirely by the canonical
// event stream. Drag to pan, pinch or ctrl+wheel to zoom, two-finger rotate
// on touch/trackpad. Every canonical event is also logged as a JSON line.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use scene_input::{DomInteraction, InputEvent, InteractionConfig, Point, PointerConfig};

fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

#[derive(Clone, Debug)]
struct Camera {
    offset_x: f64,
    offset_y: f64,
    zoom: f64,
    rotation_deg: f64,
    dragging: bool,
    last: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset_x: 480.0,
            offset_y: 320.0,
            zoom: 1.0,
            rotation_deg: 0.0,
            dragging: false,
            last: Point::new(0.0, 0.0),
        }
    }
}

fn apply(cam: &mut Camera, event: &InputEvent) {
    match event {
        InputEvent::PointerDown(d) => {
            cam.dragging = true;
            cam.last = d.point;
        }
        InputEvent::PointerMove(d) => {
            if cam.dragging {
                cam.offset_x += d.point.x - cam.last.x;
                cam.offset_y += d.point.y - cam.last.y;
                cam.last = d.point;
            }
        }
        InputEvent::PointerUp(_) | InputEvent::PointerCancel(_) => cam.dragging = false,
        InputEvent::Move(m) => {
            cam.offset_x += m.delta.x;
            cam.offset_y += m.delta.y;
        }
        InputEvent::Zoom(z) => {
            let next = (cam.zoom * z.scale).clamp(0.2, 5.0);
            let applied = next / cam.zoom;
            cam.offset_x = z.center.x - (z.center.x - cam.offset_x) * applied;
            cam.offset_y = z.center.y - (z.center.y - cam.offset_y) * applied;
            cam.zoom = next;
        }
        InputEvent::Rotate(r) => cam.rotation_deg += r.rotation,
        InputEvent::TransformEnd => {}
    }
}

fn draw(canvas: &HtmlCanvasElement, cam: &Camera) {
    let ctx = match canvas.get_context("2d").ok().flatten() {
        Some(c) => match c.dyn_into::<CanvasRenderingContext2d>() {
            Ok(c) => c,
            Err(_) => return,
        },
        None => return,
    };
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str("#0e1116");
    ctx.fill_rect(0.0, 0.0, w, h);

    let rad = cam.rotation_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    ctx.set_transform(
        cam.zoom * cos,
        cam.zoom * sin,
        -cam.zoom * sin,
        cam.zoom * cos,
        cam.offset_x,
        cam.offset_y,
    )
    .ok();

    // Grid centered on the camera origin.
    ctx.set_stroke_style_str("#2f3641");
    ctx.set_line_width((1.0 / cam.zoom).max(0.001));
    let half = 10;
    let step = 40.0;
    let extent = half as f64 * step;
    for i in -half..=half {
        let at = i as f64 * step;
        ctx.begin_path();
        ctx.move_to(at, -extent);
        ctx.line_to(at, extent);
        ctx.stroke();
        ctx.begin_path();
        ctx.move_to(-extent, at);
        ctx.line_to(extent, at);
        ctx.stroke();
    }

    ctx.set_fill_style_str("#58a6ff");
    ctx.fill_rect(-20.0, -20.0, 40.0, 40.0);
    ctx.set_stroke_style_str("#1f6feb");
    ctx.set_line_width((2.0 / cam.zoom).max(0.001));
    ctx.stroke_rect(-120.0, -80.0, 240.0, 160.0);
}

#[function_component(App)]
fn app() -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((), move |_| {
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");
            canvas.set_width(960);
            canvas.set_height(640);

            let camera = Rc::new(RefCell::new(Camera::default()));
            draw(&canvas, &camera.borrow());

            let mut interaction = {
                let canvas = canvas.clone();
                let camera = camera.clone();
                let config = InteractionConfig {
                    pointer: PointerConfig { prevent_default: true, prevent_default_menu: true },
                    ..Default::default()
                };
                DomInteraction::new(canvas.clone().into(), config, move |event| {
                    apply(&mut camera.borrow_mut(), &event);
                    draw(&canvas, &camera.borrow());
                    if let Ok(line) = serde_json::to_string(&event) {
                        clog(&line);
                    }
                })
            };
            if let Err(err) = interaction.attach() {
                clog(&format!("attach failed: {err:?}"));
            }

            // Dropping the interaction detaches every listener.
            move || drop(interaction)
        });
    }

    html! {
        <div id="root">
            <canvas ref={canvas_ref} style="display:block; touch-action:none;" />
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
