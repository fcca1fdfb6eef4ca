//! Host seam: element handles, background overflow, capability metadata
//!
//! Controllers never touch a real element tree. The embedding host answers
//! the few questions they need through `ViewHost`.

use serde::{Deserialize, Serialize};

use crate::types::{LightboxPayload, NotificationId};

/// Host timestamp in milliseconds (monotonic, host-defined origin)
pub type Millis = u64;

/// Opaque handle to an element in the host's tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Background overflow policy (the scroll lock toggles this)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// No inline policy set
    #[default]
    Unset,
    Auto,
    Scroll,
    Hidden,
}

/// What an activation target (or its nearest ancestor) is for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Capability {
    /// Carries lightbox-trigger metadata
    LightboxTrigger(LightboxPayload),
    /// The lightbox dismiss button
    LightboxDismiss,
    /// The lightbox overlay root itself (backdrop)
    LightboxOverlay,
    /// Anything inside the lightbox panel
    LightboxContent,
    CarouselNext,
    CarouselPrev,
    /// A rendered notification
    Notification(NotificationId),
    MenuToggle,
    /// Link inside the menu, with its in-page anchor if it has one
    NavLink(Option<ElementId>),
    /// In-page anchor anywhere else
    Anchor(ElementId),
}

/// The element tree as seen by the controllers
pub trait ViewHost {
    /// Current viewport width in px
    fn viewport_width(&self) -> u32;

    /// Rendered width of one carousel slide in px
    fn slide_width(&self) -> f64;

    /// Background overflow policy
    fn overflow(&self) -> OverflowPolicy;

    fn set_overflow(&mut self, policy: OverflowPolicy);

    /// Element holding keyboard focus, if any
    fn focused(&self) -> Option<ElementId>;

    fn focus(&mut self, element: ElementId);

    /// Is the element still attached to the tree?
    fn contains(&self, element: ElementId) -> bool;

    /// Capability of `target` or its closest ancestor carrying one
    fn capability(&self, target: ElementId) -> Option<Capability>;

    /// Smooth-scroll so `target` sits at the top of the viewport
    fn scroll_into_view(&mut self, target: ElementId);
}
