//! Browser bindings: the 2D context, the host image loader, JS rooms, and
//! DOM event listeners.
//!
//! This is the only module that talks to `web_sys`. Everything it hands to
//! the controller core is a plain Rust type from [`crate::input`] or a trait
//! object, so the core never needs a browser.

use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

use crate::config::ControllerConfig;
use crate::controller::ImageLoader;
use crate::draw::Surface;
use crate::error::CanvasError;
use crate::input::{KeyEvent, Point};
use crate::room::Room;
use crate::scene::{ButtonCallback, LoadRequest};

#[wasm_bindgen]
extern "C" {
    /// Page-provided `loadImage(ctx, id, source, imagesJson)`.
    #[wasm_bindgen(js_name = loadImage, catch)]
    fn load_image_js(ctx: &CanvasRenderingContext2d, id: &str, source: &str, images_json: &str) -> Result<(), JsValue>;
}

// =============================================================
// Lookup
// =============================================================

/// The page's `document`.
///
/// # Errors
///
/// Fails outside a browser window.
pub fn document() -> Result<Document, CanvasError> {
    web_sys::window().ok_or(CanvasError::NoWindow)?.document().ok_or(CanvasError::NoDocument)
}

/// The `<canvas>` element with id `canvas_id`.
///
/// # Errors
///
/// Fails if no element has that id or it is not a canvas.
pub fn canvas_by_id(document: &Document, canvas_id: &str) -> Result<HtmlCanvasElement, CanvasError> {
    document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| CanvasError::CanvasNotFound(canvas_id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| CanvasError::NotACanvas(canvas_id.to_owned()))
}

/// Resolve the drawing context of `kind` (normally `"2d"`).
///
/// # Errors
///
/// Fails if the canvas has no such context or it is not a 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement, kind: &str) -> Result<CanvasRenderingContext2d, CanvasError> {
    canvas
        .get_context(kind)
        .map_err(|e| CanvasError::host(&e))?
        .ok_or_else(|| CanvasError::NoContext(kind.to_owned()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| CanvasError::NoContext(kind.to_owned()))
}

/// Parse an optional host config object. `undefined` and `null` mean defaults.
///
/// # Errors
///
/// Fails if the object cannot be stringified or does not match the config shape.
pub fn config_from_js(value: &JsValue) -> Result<ControllerConfig, CanvasError> {
    if value.is_undefined() || value.is_null() {
        return Ok(ControllerConfig::default());
    }
    let json = js_sys::JSON::stringify(value).map_err(|e| CanvasError::host(&e))?;
    ControllerConfig::from_json(&String::from(json))
}

// =============================================================
// Surface
// =============================================================

/// [`Surface`] over a live canvas element.
pub struct BrowserSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl BrowserSurface {
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    #[must_use]
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// Top-left of the canvas in client coordinates.
    #[must_use]
    pub fn origin(&self) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(rect.left(), rect.top())
    }
}

impl Surface for BrowserSurface {
    fn size(&self) -> (f64, f64) {
        (f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn begin_path(&self) {
        self.ctx.begin_path();
    }

    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), CanvasError> {
        self.ctx.arc(x, y, radius, start, end).map_err(|e| CanvasError::host(&e))
    }

    fn rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rect(x, y, width, height);
    }

    fn stroke(&self) {
        self.ctx.stroke();
    }

    fn set_font(&self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_fill_style(&self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_text_align(&self, align: &str) {
        self.ctx.set_text_align(align);
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), CanvasError> {
        self.ctx.fill_text(text, x, y).map_err(|e| CanvasError::host(&e))
    }
}

// =============================================================
// Loader
// =============================================================

/// [`ImageLoader`] that forwards to the page's global `loadImage`.
pub struct HostLoader {
    ctx: CanvasRenderingContext2d,
}

impl HostLoader {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl ImageLoader for HostLoader {
    fn load_image(&self, request: &LoadRequest) -> Result<(), CanvasError> {
        load_image_js(&self.ctx, &request.id, &request.source, &request.images_json).map_err(|e| CanvasError::host(&e))
    }
}

// =============================================================
// Room and callbacks
// =============================================================

/// A JS object exposing `keyDown(key)` and `keyUp(key)`.
pub struct JsRoom {
    target: JsValue,
}

impl JsRoom {
    #[must_use]
    pub fn new(target: JsValue) -> Self {
        Self { target }
    }

    fn call(&self, method: &str, key: &str) -> Result<(), CanvasError> {
        let func = Reflect::get(&self.target, &JsValue::from_str(method))
            .map_err(|e| CanvasError::host(&e))?
            .dyn_into::<Function>()
            .map_err(|_| CanvasError::Host(format!("room.{method} is not a function")))?;
        func.call1(&self.target, &JsValue::from_str(key))
            .map(drop)
            .map_err(|e| CanvasError::host(&e))
    }
}

impl Room for JsRoom {
    fn key_down(&mut self, key: &str) -> Result<(), CanvasError> {
        self.call("keyDown", key)
    }

    fn key_up(&mut self, key: &str) -> Result<(), CanvasError> {
        self.call("keyUp", key)
    }
}

/// Wrap a JS function as a button callback. Exceptions are logged, not rethrown.
#[must_use]
pub fn js_callback(func: Function) -> ButtonCallback {
    Rc::new(move || {
        if let Err(err) = func.call0(&JsValue::NULL) {
            log::warn!("button callback threw: {}", CanvasError::host(&err));
        }
    })
}

// =============================================================
// Events
// =============================================================

/// Reduce a DOM keyboard event to a [`KeyEvent`].
#[must_use]
pub fn key_event(ev: &KeyboardEvent) -> KeyEvent {
    KeyEvent {
        key: ev.key(),
        key_code: ev.key_code(),
        shift: ev.shift_key(),
        caps_lock: ev.get_modifier_state("CapsLock"),
    }
}

/// Client-space position of a mouse event.
#[must_use]
pub fn client_point(ev: &MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

/// The controller's three DOM listeners. Dropping this unregisters them.
pub struct Listeners {
    canvas: HtmlCanvasElement,
    body: HtmlElement,
    mouse_down: Closure<dyn FnMut(MouseEvent)>,
    key_down: Closure<dyn FnMut(KeyboardEvent)>,
    key_up: Closure<dyn FnMut(KeyboardEvent)>,
}

impl Listeners {
    /// Register `mousedown` on the canvas and `keydown`/`keyup` on the body.
    ///
    /// # Errors
    ///
    /// Fails if the browser rejects a registration.
    pub fn attach(
        canvas: HtmlCanvasElement,
        body: HtmlElement,
        mouse_down: impl FnMut(MouseEvent) + 'static,
        key_down: impl FnMut(KeyboardEvent) + 'static,
        key_up: impl FnMut(KeyboardEvent) + 'static,
    ) -> Result<Self, CanvasError> {
        let listeners = Self {
            canvas,
            body,
            mouse_down: Closure::new(mouse_down),
            key_down: Closure::new(key_down),
            key_up: Closure::new(key_up),
        };
        listeners
            .canvas
            .add_event_listener_with_callback_and_bool("mousedown", listeners.mouse_down.as_ref().unchecked_ref(), false)
            .map_err(|e| CanvasError::host(&e))?;
        listeners
            .body
            .add_event_listener_with_callback_and_bool("keydown", listeners.key_down.as_ref().unchecked_ref(), false)
            .map_err(|e| CanvasError::host(&e))?;
        listeners
            .body
            .add_event_listener_with_callback_and_bool("keyup", listeners.key_up.as_ref().unchecked_ref(), false)
            .map_err(|e| CanvasError::host(&e))?;
        Ok(listeners)
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        let removals = [
            self.canvas.remove_event_listener_with_callback_and_bool(
                "mousedown",
                self.mouse_down.as_ref().unchecked_ref(),
                false,
            ),
            self.body
                .remove_event_listener_with_callback_and_bool("keydown", self.key_down.as_ref().unchecked_ref(), false),
            self.body
                .remove_event_listener_with_callback_and_bool("keyup", self.key_up.as_ref().unchecked_ref(), false),
        ];
        for result in removals {
            if let Err(err) = result {
                log::warn!("failed to remove listener: {}", CanvasError::host(&err));
            }
        }
    }
}
