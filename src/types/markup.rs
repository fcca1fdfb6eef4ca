//! What the page offers each controller at mount time
//!
//! Every element is optional: a missing element means the feature stays
//! inert, never that mounting fails.

use serde::{Deserialize, Serialize};

use crate::types::{ElementId, FieldKind, GalleryItem};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarouselMarkup {
    pub track: Option<ElementId>,
    pub next: Option<ElementId>,
    pub prev: Option<ElementId>,
    /// Real slides in document order
    pub slides: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LightboxMarkup {
    /// Overlay root
    pub overlay: Option<ElementId>,
    pub dismiss: Option<ElementId>,
    /// Focusable elements inside the panel, in tab order
    pub focusables: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryMarkup {
    pub container: Option<ElementId>,
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMarkup {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldMarkup {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormMarkup {
    pub form: Option<ElementId>,
    pub submit: Option<ElementId>,
    pub fields: Vec<FieldMarkup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationMarkup {
    pub toggle: Option<ElementId>,
    pub menu: Option<ElementId>,
}

/// Everything mountable on one page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMarkup {
    pub navigation: NavigationMarkup,
    pub carousel: CarouselMarkup,
    pub lightbox: LightboxMarkup,
    pub gallery: GalleryMarkup,
    pub form: FormMarkup,
    /// Sections that animate in as they scroll into view
    pub reveal_sections: Vec<ElementId>,
}
