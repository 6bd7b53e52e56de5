//! The room delegate and intent dispatch.
//!
//! Input handlers never call button callbacks or the room directly. They
//! return [`Intent`]s, and [`dispatch`] runs those once the controller's own
//! state is no longer borrowed, so a callback is free to redraw or re-enter
//! the controller.

#[cfg(test)]
#[path = "room_test.rs"]
mod room_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::CanvasError;
use crate::scene::ButtonCallback;

/// Receiver of normalized key events; owned by the caller.
pub trait Room {
    /// # Errors
    ///
    /// Returns an error if the delegate's handler fails.
    fn key_down(&mut self, key: &str) -> Result<(), CanvasError>;

    /// # Errors
    ///
    /// Returns an error if the delegate's handler fails.
    fn key_up(&mut self, key: &str) -> Result<(), CanvasError>;
}

/// Shared handle to a room.
pub type RoomHandle = Rc<RefCell<dyn Room>>;

/// A normalized input outcome awaiting dispatch.
#[derive(Clone)]
pub enum Intent {
    /// A button under the click point; run its callback.
    Press(ButtonCallback),
    /// Forward a normalized key to `Room::key_down`.
    KeyDown(String),
    /// Forward a normalized key to `Room::key_up`.
    KeyUp(String),
}

impl fmt::Debug for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Press(_) => f.write_str("Press"),
            Self::KeyDown(key) => f.debug_tuple("KeyDown").field(key).finish(),
            Self::KeyUp(key) => f.debug_tuple("KeyUp").field(key).finish(),
        }
    }
}

/// Run `intents` in order.
///
/// Presses never need a room. Key intents need one; without it the remaining
/// intents are skipped.
///
/// # Errors
///
/// Returns [`CanvasError::NoRoom`] when a key intent arrives with no room, or
/// the room's own error.
pub fn dispatch(intents: Vec<Intent>, room: Option<&RoomHandle>) -> Result<(), CanvasError> {
    for intent in intents {
        match intent {
            Intent::Press(callback) => callback(),
            Intent::KeyDown(key) => room.ok_or(CanvasError::NoRoom)?.borrow_mut().key_down(&key)?,
            Intent::KeyUp(key) => room.ok_or(CanvasError::NoRoom)?.borrow_mut().key_up(&key)?,
        }
    }
    Ok(())
}
