//! Lightbox modal definitions

use serde::{Deserialize, Serialize};

/// Modal lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

impl std::fmt::Display for ModalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModalState::Closed => "CLOSED",
            ModalState::Open => "OPEN",
        };
        write!(f, "{}", name)
    }
}

/// What a lightbox trigger carries
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LightboxPayload {
    pub title: String,
    /// Course / work type label
    pub kind: String,
    /// Image resource reference
    pub media: String,
    pub description: String,
}

impl LightboxPayload {
    pub fn new(
        title: impl Into<String>,
        kind: impl Into<String>,
        media: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            kind: kind.into(),
            media: media.into(),
            description: description.into(),
        }
    }
}

/// Lightbox media slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaView {
    /// Load in flight; placeholder shown meanwhile
    Loading { requested: String },
    /// Real media swapped in
    Ready(String),
    /// Load failed; placeholder kept
    Placeholder,
}

impl MediaView {
    /// Reference the view should display right now
    pub fn displayed<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self {
            MediaView::Ready(media) => media,
            MediaView::Loading { .. } | MediaView::Placeholder => placeholder,
        }
    }
}
