//! Proximity-driven one-shot reveal
//!
//! An element is revealed the first time its reported distance to the
//! viewport drops to `margin` or below, then it stops being observed.

use std::collections::HashMap;

use crate::types::{ElementId, ReasonCode, RevealState};

#[derive(Debug, Clone)]
pub struct RevealObserver {
    margin: i32,
    entries: HashMap<ElementId, RevealState>,
}

impl RevealObserver {
    pub fn new(margin: i32) -> Self {
        Self {
            margin,
            entries: HashMap::new(),
        }
    }

    pub fn observe(&mut self, element: ElementId) {
        self.entries.entry(element).or_insert(RevealState::Pending);
    }

    /// `None` for elements not (or no longer) observed
    pub fn on_proximity(&mut self, element: ElementId, distance: i32) -> Option<ReasonCode> {
        let state = self.entries.get_mut(&element)?;
        match *state {
            RevealState::Revealed => None,
            RevealState::Pending if distance <= self.margin => {
                *state = RevealState::Revealed;
                Some(ReasonCode::G302_REVEALED)
            }
            RevealState::Pending => Some(ReasonCode::G303_NOT_NEAR),
        }
    }

    pub fn state(&self, element: ElementId) -> Option<RevealState> {
        self.entries.get(&element).copied()
    }

    pub fn is_observing(&self, element: ElementId) -> bool {
        self.state(element) == Some(RevealState::Pending)
    }

    pub fn revealed_count(&self) -> usize {
        self.entries
            .values()
            .filter(|s| **s == RevealState::Revealed)
            .count()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_once_within_margin() {
        let mut observer = RevealObserver::new(50);
        observer.observe(ElementId(1));
        assert_eq!(observer.on_proximity(ElementId(1), 400), Some(ReasonCode::G303_NOT_NEAR));
        assert_eq!(observer.on_proximity(ElementId(1), 50), Some(ReasonCode::G302_REVEALED));
        assert_eq!(observer.on_proximity(ElementId(1), 0), None);
        assert!(!observer.is_observing(ElementId(1)));
        assert_eq!(observer.revealed_count(), 1);
    }

    #[test]
    fn test_negative_margin_needs_element_inside_viewport() {
        let mut observer = RevealObserver::new(-50);
        observer.observe(ElementId(2));
        assert_eq!(observer.on_proximity(ElementId(2), 0), Some(ReasonCode::G303_NOT_NEAR));
        assert_eq!(observer.on_proximity(ElementId(2), -60), Some(ReasonCode::G302_REVEALED));
    }

    #[test]
    fn test_unobserved_element_ignored() {
        let mut observer = RevealObserver::new(50);
        assert_eq!(observer.on_proximity(ElementId(3), 0), None);
    }
}
