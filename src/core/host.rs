//! Headless host: an in-memory element tree and clocks
//!
//! Used by the console and by tests in place of a browser document.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::types::{Capability, ElementId, Millis, OverflowPolicy, ViewHost};

/// In-memory `ViewHost`
#[derive(Debug, Clone)]
pub struct MemoryHost {
    width: u32,
    slide_width: f64,
    overflow: OverflowPolicy,
    focused: Option<ElementId>,
    attached: HashSet<ElementId>,
    parents: HashMap<ElementId, ElementId>,
    capabilities: HashMap<ElementId, Capability>,
    scrolled_to: Option<ElementId>,
}

impl MemoryHost {
    /// Empty tree with the given viewport width
    pub fn new(width: u32) -> Self {
        Self {
            width,
            slide_width: 300.0,
            overflow: OverflowPolicy::Unset,
            focused: None,
            attached: HashSet::new(),
            parents: HashMap::new(),
            capabilities: HashMap::new(),
            scrolled_to: None,
        }
    }

    pub fn with_slide_width(mut self, slide_width: f64) -> Self {
        self.slide_width = slide_width;
        self
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn set_slide_width(&mut self, slide_width: f64) {
        self.slide_width = slide_width;
    }

    /// Attach an element to the tree
    pub fn attach(&mut self, element: ElementId) {
        self.attached.insert(element);
    }

    /// Attach `child` under `parent` (for closest-ancestor lookups)
    pub fn attach_under(&mut self, child: ElementId, parent: ElementId) {
        self.attached.insert(child);
        self.parents.insert(child, parent);
    }

    /// Detach an element; its capability is forgotten
    pub fn detach(&mut self, element: ElementId) {
        self.attached.remove(&element);
        self.capabilities.remove(&element);
        if self.focused == Some(element) {
            self.focused = None;
        }
    }

    /// Attach `element` and tag it with a capability
    pub fn tag(&mut self, element: ElementId, capability: Capability) {
        self.attached.insert(element);
        self.capabilities.insert(element, capability);
    }

    /// Last element scrolled into view
    pub fn scrolled_to(&self) -> Option<ElementId> {
        self.scrolled_to
    }
}

impl ViewHost for MemoryHost {
    fn viewport_width(&self) -> u32 {
        self.width
    }

    fn slide_width(&self) -> f64 {
        self.slide_width
    }

    fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    fn set_overflow(&mut self, policy: OverflowPolicy) {
        self.overflow = policy;
    }

    fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    fn focus(&mut self, element: ElementId) {
        if self.attached.contains(&element) {
            self.focused = Some(element);
        }
    }

    fn contains(&self, element: ElementId) -> bool {
        self.attached.contains(&element)
    }

    fn capability(&self, target: ElementId) -> Option<Capability> {
        let mut current = Some(target);
        while let Some(element) = current {
            if let Some(capability) = self.capabilities.get(&element) {
                return Some(capability.clone());
            }
            current = self.parents.get(&element).copied();
        }
        None
    }

    fn scroll_into_view(&mut self, target: ElementId) {
        if self.attached.contains(&target) {
            self.scrolled_to = Some(target);
        }
    }
}

/// Source of host timestamps for async helpers
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Milliseconds since construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Clock advanced by hand
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Millis) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_found_on_ancestor() {
        let mut host = MemoryHost::new(1024);
        host.tag(ElementId(1), Capability::CarouselNext);
        host.attach_under(ElementId(2), ElementId(1));
        host.attach_under(ElementId(3), ElementId(2));
        assert_eq!(host.capability(ElementId(3)), Some(Capability::CarouselNext));
        assert_eq!(host.capability(ElementId(9)), None);
    }

    #[test]
    fn test_focus_requires_attached_element() {
        let mut host = MemoryHost::new(1024);
        host.focus(ElementId(4));
        assert_eq!(host.focused(), None);
        host.attach(ElementId(4));
        host.focus(ElementId(4));
        assert_eq!(host.focused(), Some(ElementId(4)));
        host.detach(ElementId(4));
        assert_eq!(host.focused(), None);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(100);
        clock.advance(250);
        assert_eq!(clock.now(), 350);
        clock.set(40);
        assert_eq!(clock.now(), 40);
    }

    #[test]
    fn test_scroll_ignores_detached_target() {
        let mut host = MemoryHost::new(1024);
        host.scroll_into_view(ElementId(7));
        assert_eq!(host.scrolled_to(), None);
        host.attach(ElementId(7));
        host.scroll_into_view(ElementId(7));
        assert_eq!(host.scrolled_to(), Some(ElementId(7)));
    }
}
