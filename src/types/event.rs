//! UI event bus consumed by the interface

use serde::{Deserialize, Serialize};

use crate::types::ElementId;

/// Keys the controllers react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Tab,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM-style key name
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// One event from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiEvent {
    /// Pointer activation (click / tap) on an element
    Activate { target: ElementId },
    /// Key press; `shift` is the Shift modifier
    Key { key: Key, shift: bool },
    /// Viewport resized; width is read back from the host
    Resize,
    /// Proximity notification: `distance` px between target and viewport edge
    /// (negative once the target is inside the viewport)
    Proximity { target: ElementId, distance: i32 },
    /// Carousel track finished its transition
    TransitionEnd,
    ValueChange { field: String, value: String },
    Blur { field: String },
    SubmitIntent,
    MediaLoaded { media: String },
    MediaFailed { media: String },
}
