//! Per-frame scene state: image draw requests, button regions, and queued
//! image sources.
//!
//! A frame starts with [`Scene::clear_buttons`] and ends with
//! [`Scene::take_load_batch`]. Between the two, drawing calls append to the
//! lists; nothing survives its flush, so every frame is rebuilt from scratch.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::error::CanvasError;
use crate::input::Point;

/// Action bound to a button region.
pub type ButtonCallback = Rc<dyn Fn()>;

/// A pending instruction to draw an identified image.
///
/// Serialized with the short keys the host loader expects; missing
/// dimensions are sent as `null` and mean natural size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRequest {
    pub x: f64,
    pub y: f64,
    pub id: String,
    #[serde(rename = "w")]
    pub width: Option<f64>,
    #[serde(rename = "h")]
    pub height: Option<f64>,
}

/// A clickable rectangle.
#[derive(Clone)]
pub struct ButtonRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub callback: ButtonCallback,
}

impl ButtonRegion {
    /// Whether `pt` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }
}

impl fmt::Debug for ButtonRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonRegion")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// One host load call: an image source plus the frame's full request list.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub id: String,
    pub source: String,
    /// JSON array of every [`ImageRequest`] in the frame, not just this id's.
    pub images_json: String,
}

/// Mutable state for the frame being drawn.
#[derive(Debug, Default)]
pub struct Scene {
    images: Vec<ImageRequest>,
    buttons: Vec<ButtonRegion>,
    /// Insertion-ordered; re-preparing an id replaces its source in place.
    sources: Vec<(String, String)>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every button region. Called at the start of each frame.
    pub fn clear_buttons(&mut self) {
        self.buttons.clear();
    }

    /// Queue `source` for loading under `id`, replacing any earlier source.
    pub fn prepare_image(&mut self, id: &str, source: &str) {
        match self.sources.iter_mut().find(|(k, _)| k == id) {
            Some((_, existing)) => source.clone_into(existing),
            None => self.sources.push((id.to_owned(), source.to_owned())),
        }
    }

    /// Request a draw of image `id` at `(x, y)`.
    ///
    /// The image is scaled only when both `width` and `height` are given.
    pub fn add_image(&mut self, x: f64, y: f64, id: &str, width: Option<f64>, height: Option<f64>) {
        let (width, height) = match (width, height) {
            (Some(w), Some(h)) => (Some(w), Some(h)),
            _ => (None, None),
        };
        self.images.push(ImageRequest { x, y, id: id.to_owned(), width, height });
    }

    /// Request a draw of image `id` scaled to the rectangle and make the same
    /// rectangle clickable.
    pub fn add_button(&mut self, x: f64, y: f64, width: f64, height: f64, id: &str, callback: ButtonCallback) {
        self.images.push(ImageRequest { x, y, id: id.to_owned(), width: Some(width), height: Some(height) });
        self.buttons.push(ButtonRegion { x, y, width, height, callback });
    }

    /// Build one [`LoadRequest`] per queued source, then empty both the
    /// source queue and the image list.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Serialize`] if the image list cannot be encoded.
    /// The scene is emptied either way.
    pub fn take_load_batch(&mut self) -> Result<Vec<LoadRequest>, CanvasError> {
        let encoded = serde_json::to_string(&self.images);
        let sources = std::mem::take(&mut self.sources);
        self.images.clear();
        let images_json = encoded.map_err(CanvasError::Serialize)?;
        Ok(sources
            .into_iter()
            .map(|(id, source)| LoadRequest { id, source, images_json: images_json.clone() })
            .collect())
    }

    #[must_use]
    pub fn images(&self) -> &[ImageRequest] {
        &self.images
    }

    #[must_use]
    pub fn buttons(&self) -> &[ButtonRegion] {
        &self.buttons
    }

    /// Queued `(id, source)` pairs in first-prepared order.
    #[must_use]
    pub fn pending_sources(&self) -> &[(String, String)] {
        &self.sources
    }
}
