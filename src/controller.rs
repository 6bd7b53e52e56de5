use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, KeyboardEvent, MouseEvent};

use crate::config::ControllerConfig;
use crate::draw::{self, Surface, TextStyle};
use crate::error::CanvasError;
use crate::hit::hit_test;
use crate::host::{self, BrowserSurface, HostLoader, JsRoom, Listeners};
use crate::input::{KeyEvent, KeysPressed, Point};
use crate::logging;
use crate::room::{Intent, Room, RoomHandle, dispatch};
use crate::scene::{ButtonCallback, LoadRequest, Scene};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Host-side image fetcher. Loading is fire-and-forget.
pub trait ImageLoader {
    /// Start loading `request.source` and drawing every entry of
    /// `request.images_json` whose id is `request.id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host call itself throws.
    fn load_image(&self, request: &LoadRequest) -> Result<(), CanvasError>;
}

/// Core controller state: everything that doesn't depend on the DOM.
///
/// Separated from [`CanvasController`] so it can be tested without a browser.
pub struct ControllerCore<S, L> {
    pub scene: Scene,
    pub keys: KeysPressed,
    pub config: ControllerConfig,
    surface: S,
    loader: L,
    room: Option<Weak<RefCell<dyn Room>>>,
    room_name: Option<String>,
}

impl<S: Surface, L: ImageLoader> ControllerCore<S, L> {
    #[must_use]
    pub fn new(surface: S, loader: L, config: ControllerConfig) -> Self {
        Self {
            scene: Scene::new(),
            keys: KeysPressed::new(),
            config,
            surface,
            loader,
            room: None,
            room_name: None,
        }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    // --- Room ---

    /// Point key events at `room`. Only a weak reference is kept.
    pub fn set_room(&mut self, room: &RoomHandle) {
        self.room = Some(Rc::downgrade(room));
    }

    /// The room, if one is assigned and still alive.
    #[must_use]
    pub fn room(&self) -> Option<RoomHandle> {
        self.room.as_ref().and_then(Weak::upgrade)
    }

    pub fn set_room_name(&mut self, name: Option<String>) {
        self.room_name = name;
    }

    #[must_use]
    pub fn room_name(&self) -> Option<&str> {
        self.room_name.as_deref()
    }

    // --- Drawing ---

    /// Start a frame: drop last frame's buttons and erase the surface.
    pub fn clear(&mut self) {
        self.scene.clear_buttons();
        draw::clear(&self.surface);
    }

    /// # Errors
    ///
    /// Propagates a rejected arc from the host.
    pub fn circle(&self, x: f64, y: f64, radius: f64) -> Result<(), CanvasError> {
        draw::circle(&self.surface, x, y, radius)
    }

    pub fn rect(&self, x: f64, y: f64, width: f64, height: f64) {
        draw::rect(&self.surface, x, y, width, height);
    }

    /// Build a text style, filling `centered` and `color` from config.
    #[must_use]
    pub fn text_style<'a>(
        &'a self,
        font_family: &'a str,
        font_size: f64,
        centered: Option<bool>,
        color: Option<&'a str>,
    ) -> TextStyle<'a> {
        TextStyle {
            font_family,
            font_size,
            centered: centered.unwrap_or(self.config.center_text),
            color: color.unwrap_or(&self.config.text_color),
        }
    }

    /// # Errors
    ///
    /// Stops at the first line the host fails to draw.
    pub fn text(&self, content: &str, x: f64, y: f64, style: &TextStyle<'_>) -> Result<(), CanvasError> {
        draw::text(&self.surface, content, x, y, style)
    }

    // --- Images and buttons ---

    pub fn prepare_image(&mut self, id: &str, source: &str) {
        self.scene.prepare_image(id, source);
    }

    pub fn add_image(&mut self, x: f64, y: f64, id: &str, width: Option<f64>, height: Option<f64>) {
        self.scene.add_image(x, y, id, width, height);
    }

    pub fn add_button(&mut self, x: f64, y: f64, width: f64, height: f64, id: &str, callback: ButtonCallback) {
        self.scene.add_button(x, y, width, height, id, callback);
    }

    /// Hand every queued source to the loader, then empty the image list and
    /// the source queue whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns the first loader failure. Later sources are still issued.
    pub fn load_images(&mut self) -> Result<(), CanvasError> {
        let batch = self.scene.take_load_batch()?;
        log::debug!("flushing {} image source(s)", batch.len());
        let mut first_err = None;
        for request in &batch {
            if let Err(err) = self.loader.load_image(request) {
                log::warn!("loadImage failed for {}: {err}", request.id);
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    // --- Input ---

    /// Presses for every button under the click, in registration order.
    ///
    /// `client` is in client coordinates; `canvas_origin` is the canvas's
    /// top-left in the same space.
    #[must_use]
    pub fn on_mouse_down(&self, client: Point, canvas_origin: Point) -> Vec<Intent> {
        let pt = client.relative_to(canvas_origin);
        hit_test(self.scene.buttons(), pt)
            .map(|b| Intent::Press(Rc::clone(&b.callback)))
            .collect()
    }

    /// Key-down for a newly pressed key; nothing for auto-repeat.
    pub fn on_key_down(&mut self, ev: &KeyEvent) -> Vec<Intent> {
        if !self.keys.press(&ev.key) {
            return Vec::new();
        }
        vec![Intent::KeyDown(ev.normalized())]
    }

    pub fn on_key_up(&mut self, ev: &KeyEvent) -> Vec<Intent> {
        self.keys.release(&ev.key);
        vec![Intent::KeyUp(ev.normalized())]
    }
}

/// The core as bound to a live canvas.
pub type BrowserCore = ControllerCore<BrowserSurface, HostLoader>;

/// Run intents against the core's current room, logging failures.
fn run(core: &Rc<RefCell<BrowserCore>>, intents: Vec<Intent>) {
    if intents.is_empty() {
        return;
    }
    let room = core.borrow().room();
    if let Err(err) = dispatch(intents, room.as_ref()) {
        log::warn!("input dispatch failed: {err}");
    }
}

/// The browser-facing controller. Wraps [`ControllerCore`] and owns the DOM
/// listeners that feed it.
#[wasm_bindgen]
pub struct CanvasController {
    core: Rc<RefCell<BrowserCore>>,
    /// Strong handle for a room assigned from JS; Rust callers keep their own.
    js_room: Option<RoomHandle>,
    _listeners: Listeners,
}

impl CanvasController {
    /// Bind to the canvas with id `canvas_id`.
    ///
    /// # Errors
    ///
    /// Fails if the canvas or its context cannot be resolved, or a listener
    /// cannot be registered.
    pub fn with_config(canvas_id: &str, config: ControllerConfig) -> Result<Self, CanvasError> {
        logging::init(config.level());

        let document = host::document()?;
        let body = document.body().ok_or(CanvasError::NoBody)?;
        let canvas = host::canvas_by_id(&document, canvas_id)?;
        let ctx = host::context_2d(&canvas, &config.context_kind)?;

        let surface = BrowserSurface::new(canvas.clone(), ctx.clone());
        let core = Rc::new(RefCell::new(ControllerCore::new(surface, HostLoader::new(ctx), config)));

        let on_mouse_down = {
            let core = Rc::clone(&core);
            move |ev: MouseEvent| {
                let intents = {
                    let core = core.borrow();
                    core.on_mouse_down(host::client_point(&ev), core.surface().origin())
                };
                run(&core, intents);
            }
        };
        let on_key_down = {
            let core = Rc::clone(&core);
            move |ev: KeyboardEvent| {
                let intents = core.borrow_mut().on_key_down(&host::key_event(&ev));
                run(&core, intents);
            }
        };
        let on_key_up = {
            let core = Rc::clone(&core);
            move |ev: KeyboardEvent| {
                let intents = core.borrow_mut().on_key_up(&host::key_event(&ev));
                run(&core, intents);
            }
        };
        let listeners = Listeners::attach(canvas, body, on_mouse_down, on_key_down, on_key_up)?;

        log::info!("canvas controller bound to #{canvas_id}");
        Ok(Self { core, js_room: None, _listeners: listeners })
    }

    /// Assign a Rust room. The caller keeps ownership; dropping it stops key
    /// delivery.
    pub fn set_room_handle(&mut self, room: &RoomHandle) {
        if self.js_room.take().is_some() {
            log::debug!("released JS room in favour of a Rust room");
        }
        self.core.borrow_mut().set_room(room);
    }

    /// Borrow the core, e.g. to inspect the scene.
    #[must_use]
    pub fn core(&self) -> std::cell::Ref<'_, BrowserCore> {
        self.core.borrow()
    }
}

#[wasm_bindgen]
impl CanvasController {
    /// Bind to the canvas with id `canvas_id`. `config` is an optional object
    /// of [`ControllerConfig`] fields.
    ///
    /// # Errors
    ///
    /// Fails if the config is malformed or the canvas cannot be bound.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config: JsValue) -> Result<CanvasController, JsValue> {
        let config = host::config_from_js(&config)?;
        Ok(Self::with_config(canvas_id, config)?)
    }

    /// The 2D drawing context.
    #[must_use]
    pub fn context(&self) -> CanvasRenderingContext2d {
        self.core.borrow().surface().context().clone()
    }

    /// Assign the JS room object (`keyDown(key)` / `keyUp(key)`).
    #[wasm_bindgen(js_name = setRoom)]
    pub fn set_room(&mut self, room: JsValue) {
        let handle: RoomHandle = Rc::new(RefCell::new(JsRoom::new(room)));
        self.core.borrow_mut().set_room(&handle);
        if self.js_room.replace(handle).is_some() {
            log::debug!("replaced JS room");
        }
    }

    #[wasm_bindgen(getter = roomName)]
    #[must_use]
    pub fn room_name(&self) -> Option<String> {
        self.core.borrow().room_name().map(str::to_owned)
    }

    #[wasm_bindgen(setter = roomName)]
    pub fn set_room_name(&mut self, name: Option<String>) {
        self.core.borrow_mut().set_room_name(name);
    }

    /// Raw keys currently held, in press order.
    #[wasm_bindgen(js_name = keysPressed)]
    #[must_use]
    pub fn keys_pressed(&self) -> Vec<String> {
        self.core.borrow().keys.as_slice().to_vec()
    }

    pub fn clear(&self) {
        self.core.borrow_mut().clear();
    }

    /// # Errors
    ///
    /// Fails if the host rejects the arc.
    pub fn circle(&self, x: f64, y: f64, radius: f64) -> Result<(), JsValue> {
        Ok(self.core.borrow().circle(x, y, radius)?)
    }

    /// # Errors
    ///
    /// Fails if the host cannot draw a line of text.
    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &self,
        content: &str,
        x: f64,
        y: f64,
        font_family: &str,
        font_size: f64,
        centered: Option<bool>,
        color: Option<String>,
    ) -> Result<(), JsValue> {
        let core = self.core.borrow();
        let style = core.text_style(font_family, font_size, centered, color.as_deref());
        Ok(core.text(content, x, y, &style)?)
    }

    pub fn rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.core.borrow().rect(x, y, width, height);
    }

    #[wasm_bindgen(js_name = prepareImage)]
    pub fn prepare_image(&self, id: &str, source: &str) {
        self.core.borrow_mut().prepare_image(id, source);
    }

    #[wasm_bindgen(js_name = addImage)]
    pub fn add_image(&self, x: f64, y: f64, id: &str, width: Option<f64>, height: Option<f64>) {
        self.core.borrow_mut().add_image(x, y, id, width, height);
    }

    #[wasm_bindgen(js_name = addButton)]
    pub fn add_button(&self, x: f64, y: f64, width: f64, height: f64, id: &str, callback: js_sys::Function) {
        self.core
            .borrow_mut()
            .add_button(x, y, width, height, id, host::js_callback(callback));
    }

    /// # Errors
    ///
    /// Returns the first `loadImage` failure; bookkeeping is cleared regardless.
    #[wasm_bindgen(js_name = loadImages)]
    pub fn load_images(&self) -> Result<(), JsValue> {
        Ok(self.core.borrow_mut().load_images()?)
    }
}
