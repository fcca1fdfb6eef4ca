//! Reason codes for every controller decision
//!
//! One letter per controller, then a three-digit group, then the outcome.

use serde::{Deserialize, Serialize};

/// Why a controller did (or did not do) something
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // C1xx: Carousel
    // =========================================================================
    /// Move accepted, transition running
    C101_MOVE_STARTED,
    /// Move refused, previous move still animating
    C102_MOVE_REJECTED_ANIMATING,
    /// Fewer slides than visible positions, nothing to move
    C103_STATIC_NO_WRAP,
    /// Transition ended inside the real range
    C104_TRANSITION_SETTLED,
    /// Transition ended on a clone, repositioned without animation
    C105_SILENT_JUMP,
    /// Transitions re-enabled after a silent jump or rebuild
    C106_TRANSITIONS_RESTORED,
    /// Resize noted, rebuild deferred
    C107_RESIZE_DEBOUNCED,
    /// Clone buffer rebuilt for a new visible count
    C108_BUFFER_REBUILT,

    // =========================================================================
    // L2xx: Lightbox
    // =========================================================================
    L201_OPENED,
    /// Open while open: payload swapped in place
    L202_PAYLOAD_REPLACED,
    L203_CLOSED,
    /// Tab / Shift+Tab wrapped around the focus trap
    L204_FOCUS_WRAPPED,
    /// Tab inside the trap, left to the host
    L205_FOCUS_PASSTHROUGH,
    L206_MEDIA_READY,
    /// Media failed to load, placeholder kept
    L207_MEDIA_FALLBACK,
    /// Load result for media no longer displayed
    L208_STALE_MEDIA_IGNORED,

    // =========================================================================
    // G3xx: Gallery / reveal
    // =========================================================================
    G301_SHUFFLED,
    G302_REVEALED,
    /// Proximity reported but outside the margin
    G303_NOT_NEAR,

    // =========================================================================
    // F4xx: Form
    // =========================================================================
    F401_FIELD_VALID,
    F402_FIELD_INVALID,
    /// Value change cleared a previous error
    F403_ERROR_CLEARED,
    F404_SUBMIT_BLOCKED_INVALID,
    F405_SUBMIT_STARTED,
    F406_SUBMIT_IN_FLIGHT,
    F407_SUBMIT_SUCCEEDED,
    F408_SUBMIT_FAILED,
    F409_UNKNOWN_FIELD,

    // =========================================================================
    // N5xx: Notifications
    // =========================================================================
    N501_DISPATCHED,
    /// Visible notification retired by a newer dispatch
    N502_SUPERSEDED,
    /// Enter animation finished
    N503_SHOWN,
    /// Time-to-live elapsed
    N504_EXPIRED,
    N505_DISMISSED,
    /// Leave animation finished, removed from the view tree
    N506_REMOVED,

    // =========================================================================
    // M6xx: Navigation
    // =========================================================================
    M601_MENU_OPENED,
    M602_MENU_CLOSED,
    M603_SCROLLED_TO_ANCHOR,

    // =========================================================================
    // I0xx: Interface
    // =========================================================================
    /// No controller claimed the event
    I001_IGNORED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::C101_MOVE_STARTED => "C101_MOVE_STARTED",
            Self::C102_MOVE_REJECTED_ANIMATING => "C102_MOVE_REJECTED_ANIMATING",
            Self::C103_STATIC_NO_WRAP => "C103_STATIC_NO_WRAP",
            Self::C104_TRANSITION_SETTLED => "C104_TRANSITION_SETTLED",
            Self::C105_SILENT_JUMP => "C105_SILENT_JUMP",
            Self::C106_TRANSITIONS_RESTORED => "C106_TRANSITIONS_RESTORED",
            Self::C107_RESIZE_DEBOUNCED => "C107_RESIZE_DEBOUNCED",
            Self::C108_BUFFER_REBUILT => "C108_BUFFER_REBUILT",
            Self::L201_OPENED => "L201_OPENED",
            Self::L202_PAYLOAD_REPLACED => "L202_PAYLOAD_REPLACED",
            Self::L203_CLOSED => "L203_CLOSED",
            Self::L204_FOCUS_WRAPPED => "L204_FOCUS_WRAPPED",
            Self::L205_FOCUS_PASSTHROUGH => "L205_FOCUS_PASSTHROUGH",
            Self::L206_MEDIA_READY => "L206_MEDIA_READY",
            Self::L207_MEDIA_FALLBACK => "L207_MEDIA_FALLBACK",
            Self::L208_STALE_MEDIA_IGNORED => "L208_STALE_MEDIA_IGNORED",
            Self::G301_SHUFFLED => "G301_SHUFFLED",
            Self::G302_REVEALED => "G302_REVEALED",
            Self::G303_NOT_NEAR => "G303_NOT_NEAR",
            Self::F401_FIELD_VALID => "F401_FIELD_VALID",
            Self::F402_FIELD_INVALID => "F402_FIELD_INVALID",
            Self::F403_ERROR_CLEARED => "F403_ERROR_CLEARED",
            Self::F404_SUBMIT_BLOCKED_INVALID => "F404_SUBMIT_BLOCKED_INVALID",
            Self::F405_SUBMIT_STARTED => "F405_SUBMIT_STARTED",
            Self::F406_SUBMIT_IN_FLIGHT => "F406_SUBMIT_IN_FLIGHT",
            Self::F407_SUBMIT_SUCCEEDED => "F407_SUBMIT_SUCCEEDED",
            Self::F408_SUBMIT_FAILED => "F408_SUBMIT_FAILED",
            Self::F409_UNKNOWN_FIELD => "F409_UNKNOWN_FIELD",
            Self::N501_DISPATCHED => "N501_DISPATCHED",
            Self::N502_SUPERSEDED => "N502_SUPERSEDED",
            Self::N503_SHOWN => "N503_SHOWN",
            Self::N504_EXPIRED => "N504_EXPIRED",
            Self::N505_DISMISSED => "N505_DISMISSED",
            Self::N506_REMOVED => "N506_REMOVED",
            Self::M601_MENU_OPENED => "M601_MENU_OPENED",
            Self::M602_MENU_CLOSED => "M602_MENU_CLOSED",
            Self::M603_SCROLLED_TO_ANCHOR => "M603_SCROLLED_TO_ANCHOR",
            Self::I001_IGNORED => "I001_IGNORED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::C101_MOVE_STARTED => "Carousel moving",
            Self::C102_MOVE_REJECTED_ANIMATING => "Carousel busy, move ignored",
            Self::C103_STATIC_NO_WRAP => "All slides shown, no wraparound",
            Self::C104_TRANSITION_SETTLED => "Carousel settled",
            Self::C105_SILENT_JUMP => "Loop seam masked by silent jump",
            Self::C106_TRANSITIONS_RESTORED => "Carousel transitions restored",
            Self::C107_RESIZE_DEBOUNCED => "Resize pending",
            Self::C108_BUFFER_REBUILT => "Carousel rebuilt for new width",
            Self::L201_OPENED => "Lightbox opened",
            Self::L202_PAYLOAD_REPLACED => "Lightbox content replaced",
            Self::L203_CLOSED => "Lightbox closed",
            Self::L204_FOCUS_WRAPPED => "Focus wrapped inside lightbox",
            Self::L205_FOCUS_PASSTHROUGH => "Focus moved inside lightbox",
            Self::L206_MEDIA_READY => "Lightbox media loaded",
            Self::L207_MEDIA_FALLBACK => "Lightbox media failed, placeholder shown",
            Self::L208_STALE_MEDIA_IGNORED => "Stale media result ignored",
            Self::G301_SHUFFLED => "Gallery shuffled",
            Self::G302_REVEALED => "Element revealed",
            Self::G303_NOT_NEAR => "Element not near viewport yet",
            Self::F401_FIELD_VALID => "Field valid",
            Self::F402_FIELD_INVALID => "Field invalid",
            Self::F403_ERROR_CLEARED => "Field error cleared",
            Self::F404_SUBMIT_BLOCKED_INVALID => "Submission blocked by invalid fields",
            Self::F405_SUBMIT_STARTED => "Submission started",
            Self::F406_SUBMIT_IN_FLIGHT => "Submission already in flight",
            Self::F407_SUBMIT_SUCCEEDED => "Submission succeeded",
            Self::F408_SUBMIT_FAILED => "Submission failed",
            Self::F409_UNKNOWN_FIELD => "No such field",
            Self::N501_DISPATCHED => "Notification shown",
            Self::N502_SUPERSEDED => "Notification replaced",
            Self::N503_SHOWN => "Notification fully visible",
            Self::N504_EXPIRED => "Notification expired",
            Self::N505_DISMISSED => "Notification dismissed",
            Self::N506_REMOVED => "Notification removed",
            Self::M601_MENU_OPENED => "Menu opened",
            Self::M602_MENU_CLOSED => "Menu closed",
            Self::M603_SCROLLED_TO_ANCHOR => "Scrolled to anchor target",
            Self::I001_IGNORED => "Event ignored",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
