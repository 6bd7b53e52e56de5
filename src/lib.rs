//! Canvas controller for browser-hosted scripts.
//!
//! This crate is compiled to WebAssembly and sits between a scripting layer
//! and an HTML `<canvas>`. Each frame the script clears the canvas, issues
//! drawing primitives, registers images and clickable buttons, and flushes
//! the images to the page's `loadImage` function. Mouse clicks are
//! hit-tested against that frame's buttons; key presses are case-normalized
//! and forwarded to a "room" delegate.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Browser-bound [`controller::CanvasController`] and testable [`controller::ControllerCore`] |
//! | [`scene`] | Per-frame image requests, button regions, and queued image sources |
//! | [`draw`] | The [`draw::Surface`] contract and drawing primitives |
//! | [`input`] | Points, keyboard events, key normalization, held keys |
//! | [`hit`] | Button hit-testing |
//! | [`room`] | Room delegate trait and intent dispatch |
//! | [`host`] | Browser bindings: surface, loader, JS room, DOM listeners |
//! | [`config`] | Host-supplied configuration |
//! | [`error`] | Error type |
//! | [`logging`] | Console logger setup |

pub mod config;
pub mod controller;
pub mod draw;
pub mod error;
pub mod hit;
pub mod host;
pub mod input;
pub mod logging;
pub mod room;
pub mod scene;


pub use controller::{CanvasController, ControllerCore};
pub use error::CanvasError;
