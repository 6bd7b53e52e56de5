//! Drawing primitives over a host 2D context.
//!
//! [`Surface`] is the slice of `CanvasRenderingContext2d` the controller
//! needs. The browser implementation lives in [`crate::host`]; tests record
//! calls instead. The free functions here are the primitives the scripting
//! side issues once per frame.

#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

use std::f64::consts::PI;

use crate::error::CanvasError;

/// Host drawing context.
///
/// Methods take `&self` because the browser context is a shared JS handle.
pub trait Surface {
    /// Drawable area as `(width, height)` in canvas pixels.
    fn size(&self) -> (f64, f64);
    fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&self);
    /// # Errors
    ///
    /// Fails if the host rejects the arc (e.g. negative radius).
    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), CanvasError>;
    fn rect(&self, x: f64, y: f64, width: f64, height: f64);
    fn stroke(&self);
    fn set_font(&self, font: &str);
    fn set_fill_style(&self, style: &str);
    fn set_text_align(&self, align: &str);
    /// # Errors
    ///
    /// Fails if the host throws while filling text.
    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), CanvasError>;
}

/// Text styling for [`text`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle<'a> {
    pub font_family: &'a str,
    pub font_size: f64,
    pub centered: bool,
    pub color: &'a str,
}

/// Erase the whole visible area.
pub fn clear(surface: &impl Surface) {
    let (width, height) = surface.size();
    surface.clear_rect(0.0, 0.0, width, height);
}

/// Stroke a full circle outline centred on `(x, y)`.
///
/// # Errors
///
/// Propagates a rejected arc from the host.
pub fn circle(surface: &impl Surface, x: f64, y: f64, radius: f64) -> Result<(), CanvasError> {
    surface.begin_path();
    surface.arc(x, y, radius, 0.0, 2.0 * PI)?;
    surface.stroke();
    Ok(())
}

/// Stroke a rectangle outline. The interior is left unfilled.
pub fn rect(surface: &impl Surface, x: f64, y: f64, width: f64, height: f64) {
    // clearRect does not reset the current path; start fresh so earlier
    // frames' rectangles are not stroked again.
    surface.begin_path();
    surface.rect(x, y, width, height);
    surface.stroke();
}

/// Fill `content` line by line, one `font_size` apart, starting at `(x, y)`.
///
/// Center alignment is left set on the context afterwards; a later
/// left-aligned call must not rely on the host default.
///
/// # Errors
///
/// Stops at the first line the host fails to draw.
pub fn text(surface: &impl Surface, content: &str, x: f64, y: f64, style: &TextStyle<'_>) -> Result<(), CanvasError> {
    surface.set_font(&font_spec(style.font_size, style.font_family));
    surface.set_fill_style(style.color);
    if style.centered {
        surface.set_text_align("center");
    }
    let mut line_y = y;
    for line in content.split('\n') {
        surface.fill_text(line, x, line_y)?;
        line_y += style.font_size;
    }
    Ok(())
}

/// CSS font shorthand, e.g. `"12px Arial"`.
#[must_use]
pub fn font_spec(font_size: f64, font_family: &str) -> String {
    format!("{font_size}px {font_family}")
}
