//! Carousel data: slides, state, track styling

use serde::{Deserialize, Serialize};

use crate::types::ElementId;

/// One unit of carousel content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Position in the real (unbuffered) sequence
    pub index: usize,
    /// Element the slide renders into
    pub element: ElementId,
    /// Is this slide one of the `visible_count` current slides?
    pub visible: bool,
}

/// Carousel state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselState {
    /// Position in the working buffer (clones included)
    pub logical_index: usize,
    /// Slides on screen at once
    pub visible_count: usize,
    /// A move (or its silent jump) is in progress
    pub animating: bool,
}

/// Transform to apply to the carousel track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackStyle {
    /// translateX in px
    pub offset_px: f64,
    /// Whether the transform change is animated
    pub transition_enabled: bool,
}

impl TrackStyle {
    pub fn to_css(&self) -> String {
        let transition = if self.transition_enabled {
            "transform 0.6s cubic-bezier(0.23, 1, 0.32, 1)"
        } else {
            "none"
        };
        format!(
            "transition: {}; transform: translateX({}px);",
            transition, self.offset_px
        )
    }
}

/// Direction of a carousel move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Previous,
}
