//! Gallery items and lazy reveal

use serde::{Deserialize, Serialize};

use crate::types::ElementId;

/// Opaque gallery entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub element: ElementId,
    /// Image resource reference
    pub media: String,
}

impl GalleryItem {
    pub fn new(element: ElementId, media: impl Into<String>) -> Self {
        Self {
            element,
            media: media.into(),
        }
    }
}

/// Lazy reveal state of an observed element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealState {
    /// Waiting for the element to near the viewport
    Pending,
    /// Revealed once; no longer observed
    Revealed,
}
