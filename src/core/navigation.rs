//! Mobile navigation menu and in-page anchors

use tracing::debug;

use crate::types::{Capability, ElementId, NavigationMarkup, ReasonCode, ViewHost};

#[derive(Debug)]
pub struct NavigationController {
    toggle: ElementId,
    menu: ElementId,
    open: bool,
}

impl NavigationController {
    /// `None` unless both the toggle and the menu exist
    pub fn initialize(markup: &NavigationMarkup) -> Option<Self> {
        match (markup.toggle, markup.menu) {
            (Some(toggle), Some(menu)) => Some(Self {
                toggle,
                menu,
                open: false,
            }),
            _ => {
                debug!("navigation markup incomplete, skipping");
                None
            }
        }
    }

    /// Toggle flips the menu; a nav link closes it
    pub fn on_activate(&mut self, capability: &Capability) -> Option<ReasonCode> {
        match capability {
            Capability::MenuToggle => {
                self.open = !self.open;
                Some(if self.open {
                    ReasonCode::M601_MENU_OPENED
                } else {
                    ReasonCode::M602_MENU_CLOSED
                })
            }
            Capability::NavLink(_) if self.open => {
                self.open = false;
                Some(ReasonCode::M602_MENU_CLOSED)
            }
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&self) -> ElementId {
        self.toggle
    }

    pub fn menu(&self) -> ElementId {
        self.menu
    }
}

/// Smooth-scroll to an anchor target; skipped when it is not in the page
pub fn scroll_to_anchor(target: ElementId, host: &mut impl ViewHost) -> Option<ReasonCode> {
    if !host.contains(target) {
        debug!(?target, "anchor target missing, not scrolling");
        return None;
    }
    host.scroll_into_view(target);
    Some(ReasonCode::M603_SCROLLED_TO_ANCHOR)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryHost;

    #[test]
    fn test_toggle_and_link_close() {
        let markup = NavigationMarkup {
            toggle: Some(ElementId(1)),
            menu: Some(ElementId(2)),
        };
        let mut nav = NavigationController::initialize(&markup).unwrap();
        let link = Capability::NavLink(Some(ElementId(60)));
        assert_eq!(nav.on_activate(&link), None);
        assert_eq!(nav.on_activate(&Capability::MenuToggle), Some(ReasonCode::M601_MENU_OPENED));
        assert_eq!(nav.on_activate(&link), Some(ReasonCode::M602_MENU_CLOSED));
        assert!(!nav.is_open());
    }

    #[test]
    fn test_anchor_scroll_skips_missing_target() {
        let mut host = MemoryHost::new(800);
        assert_eq!(scroll_to_anchor(ElementId(60), &mut host), None);
        assert_eq!(host.scrolled_to(), None);

        host.attach(ElementId(60));
        assert_eq!(
            scroll_to_anchor(ElementId(60), &mut host),
            Some(ReasonCode::M603_SCROLLED_TO_ANCHOR)
        );
        assert_eq!(host.scrolled_to(), Some(ElementId(60)));
    }

    #[test]
    fn test_missing_menu_is_noop() {
        let markup = NavigationMarkup {
            toggle: Some(ElementId(1)),
            menu: None,
        };
        assert!(NavigationController::initialize(&markup).is_none());
    }
}
