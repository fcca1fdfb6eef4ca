//! Lightbox: modal lifecycle with scroll lock and focus trap
//!
//! CLOSED → OPEN on `open`; OPEN → CLOSED on `close`, dismiss, backdrop or
//! Escape. While open the background overflow is `Hidden`; the prior policy
//! is restored on close, as is focus on the trigger that opened it.

use tracing::{debug, warn};

use crate::types::{
    Capability, ElementId, InitError, Key, LightboxMarkup, LightboxPayload, MediaView,
    ModalState, OverflowPolicy, ReasonCode, ViewHost,
};

#[derive(Debug)]
pub struct LightboxController {
    overlay: ElementId,
    dismiss: Option<ElementId>,
    /// Tab order inside the panel
    focusables: Vec<ElementId>,
    state: ModalState,
    payload: Option<LightboxPayload>,
    media: Option<MediaView>,
    /// Element to refocus on close (may have left the tree by then)
    last_trigger: Option<ElementId>,
    /// Background policy before the lock
    saved_overflow: Option<OverflowPolicy>,
    placeholder: String,
}

impl LightboxController {
    /// Mount on the given markup; `Ok(None)` without an overlay root
    pub fn initialize(
        markup: &LightboxMarkup,
        placeholder: impl Into<String>,
    ) -> Result<Option<Self>, InitError> {
        let Some(overlay) = markup.overlay else {
            debug!("lightbox overlay absent, skipping");
            return Ok(None);
        };

        let mut focusables = markup.focusables.clone();
        if let Some(dismiss) = markup.dismiss {
            if focusables.is_empty() {
                focusables.push(dismiss);
            } else if !focusables.contains(&dismiss) {
                return Err(InitError::DismissNotFocusable);
            }
        }

        Ok(Some(Self {
            overlay,
            dismiss: markup.dismiss,
            focusables,
            state: ModalState::Closed,
            payload: None,
            media: None,
            last_trigger: None,
            saved_overflow: None,
            placeholder: placeholder.into(),
        }))
    }

    /// Show `payload`; while already open the payload is replaced in place
    pub fn open(
        &mut self,
        payload: LightboxPayload,
        trigger: Option<ElementId>,
        host: &mut impl ViewHost,
    ) -> ReasonCode {
        self.media = Some(if payload.media.is_empty() {
            MediaView::Placeholder
        } else {
            MediaView::Loading {
                requested: payload.media.clone(),
            }
        });
        self.payload = Some(payload);

        if self.state == ModalState::Open {
            return ReasonCode::L202_PAYLOAD_REPLACED;
        }

        self.saved_overflow = Some(host.overflow());
        host.set_overflow(OverflowPolicy::Hidden);
        self.last_trigger = trigger;
        self.state = ModalState::Open;

        if let Some(first) = self.dismiss.or_else(|| self.focusables.first().copied()) {
            host.focus(first);
        }
        ReasonCode::L201_OPENED
    }

    /// Close and release the scroll lock; `None` if already closed
    pub fn close(&mut self, host: &mut impl ViewHost) -> Option<ReasonCode> {
        if self.state == ModalState::Closed {
            return None;
        }
        self.state = ModalState::Closed;
        self.payload = None;
        self.media = None;

        host.set_overflow(self.saved_overflow.take().unwrap_or_default());
        if let Some(trigger) = self.last_trigger.take() {
            if host.contains(trigger) {
                host.focus(trigger);
            }
        }
        Some(ReasonCode::L203_CLOSED)
    }

    /// Activation routed here by capability
    pub fn on_activate(
        &mut self,
        capability: &Capability,
        host: &mut impl ViewHost,
    ) -> Option<ReasonCode> {
        match capability {
            Capability::LightboxDismiss | Capability::LightboxOverlay => self.close(host),
            _ => None,
        }
    }

    /// Escape closes; Tab / Shift+Tab wrap inside the panel
    pub fn on_key(&mut self, key: Key, shift: bool, host: &mut impl ViewHost) -> Option<ReasonCode> {
        if self.state != ModalState::Open {
            return None;
        }
        match key {
            Key::Escape => self.close(host),
            Key::Tab => self.cycle_focus(shift, host),
            _ => None,
        }
    }

    fn cycle_focus(&mut self, backwards: bool, host: &mut impl ViewHost) -> Option<ReasonCode> {
        let first = *self.focusables.first()?;
        let last = *self.focusables.last()?;
        let position = host
            .focused()
            .and_then(|f| self.focusables.iter().position(|&e| e == f));

        match (backwards, position) {
            (true, Some(0)) | (true, None) => {
                host.focus(last);
                Some(ReasonCode::L204_FOCUS_WRAPPED)
            }
            (false, Some(p)) if p + 1 == self.focusables.len() => {
                host.focus(first);
                Some(ReasonCode::L204_FOCUS_WRAPPED)
            }
            (false, None) => {
                host.focus(first);
                Some(ReasonCode::L204_FOCUS_WRAPPED)
            }
            _ => Some(ReasonCode::L205_FOCUS_PASSTHROUGH),
        }
    }

    pub fn on_media_loaded(&mut self, media: &str) -> Option<ReasonCode> {
        match &self.media {
            Some(MediaView::Loading { requested }) if requested == media => {
                self.media = Some(MediaView::Ready(media.to_string()));
                Some(ReasonCode::L206_MEDIA_READY)
            }
            Some(_) => Some(ReasonCode::L208_STALE_MEDIA_IGNORED),
            None => None,
        }
    }

    pub fn on_media_failed(&mut self, media: &str) -> Option<ReasonCode> {
        match &self.media {
            Some(MediaView::Loading { requested }) if requested == media => {
                warn!(media, "lightbox media failed to load, using placeholder");
                self.media = Some(MediaView::Placeholder);
                Some(ReasonCode::L207_MEDIA_FALLBACK)
            }
            Some(_) => Some(ReasonCode::L208_STALE_MEDIA_IGNORED),
            None => None,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn payload(&self) -> Option<&LightboxPayload> {
        self.payload.as_ref()
    }

    pub fn media(&self) -> Option<&MediaView> {
        self.media.as_ref()
    }

    /// Media reference to render now (placeholder until loaded)
    pub fn displayed_media(&self) -> Option<&str> {
        self.media.as_ref().map(|m| m.displayed(&self.placeholder))
    }

    pub fn overlay(&self) -> ElementId {
        self.overlay
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryHost;
    use crate::PLACEHOLDER_MEDIA;

    const OVERLAY: ElementId = ElementId(10);
    const DISMISS: ElementId = ElementId(11);
    const LINK: ElementId = ElementId(12);
    const TRIGGER: ElementId = ElementId(50);

    fn setup() -> (LightboxController, MemoryHost) {
        let markup = LightboxMarkup {
            overlay: Some(OVERLAY),
            dismiss: Some(DISMISS),
            focusables: vec![DISMISS, LINK],
        };
        let mut host = MemoryHost::new(1200);
        for e in [OVERLAY, DISMISS, LINK, TRIGGER] {
            host.attach(e);
        }
        host.set_overflow(OverflowPolicy::Auto);
        host.focus(TRIGGER);
        let lightbox = LightboxController::initialize(&markup, PLACEHOLDER_MEDIA)
            .unwrap()
            .unwrap();
        (lightbox, host)
    }

    fn payload(media: &str) -> LightboxPayload {
        LightboxPayload::new("Curso de cerámica", "Taller", media, "Ocho sesiones")
    }

    #[test]
    fn test_missing_overlay_is_noop() {
        let result = LightboxController::initialize(&LightboxMarkup::default(), "x").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_dismiss_outside_focus_set_is_init_error() {
        let markup = LightboxMarkup {
            overlay: Some(OVERLAY),
            dismiss: Some(DISMISS),
            focusables: vec![LINK],
        };
        let err = LightboxController::initialize(&markup, "x").unwrap_err();
        assert_eq!(err, InitError::DismissNotFocusable);
    }

    #[test]
    fn test_open_locks_scroll_and_focuses_dismiss() {
        let (mut lb, mut host) = setup();
        assert_eq!(lb.open(payload("a.webp"), Some(TRIGGER), &mut host), ReasonCode::L201_OPENED);
        assert_eq!(lb.state(), ModalState::Open);
        assert_eq!(host.overflow(), OverflowPolicy::Hidden);
        assert_eq!(host.focused(), Some(DISMISS));
    }

    #[test]
    fn test_open_close_restores_scroll_and_focus() {
        let (mut lb, mut host) = setup();
        lb.open(payload("a.webp"), Some(TRIGGER), &mut host);
        assert_eq!(lb.close(&mut host), Some(ReasonCode::L203_CLOSED));
        assert_eq!(host.overflow(), OverflowPolicy::Auto);
        assert_eq!(host.focused(), Some(TRIGGER));
        assert!(lb.payload().is_none());
    }

    #[test]
    fn test_detached_trigger_not_refocused() {
        let (mut lb, mut host) = setup();
        lb.open(payload("a.webp"), Some(TRIGGER), &mut host);
        host.detach(TRIGGER);
        lb.close(&mut host);
        assert_eq!(host.focused(), Some(DISMISS));
    }

    #[test]
    fn test_second_open_replaces_payload_keeps_lock() {
        let (mut lb, mut host) = setup();
        lb.open(payload("a.webp"), Some(TRIGGER), &mut host);
        let other = LightboxPayload::new("Otro", "Obra", "b.webp", "");
        assert_eq!(lb.open(other.clone(), Some(LINK), &mut host), ReasonCode::L202_PAYLOAD_REPLACED);
        assert_eq!(lb.payload(), Some(&other));

        lb.close(&mut host);
        // Prior policy survives the second open, focus goes to the first trigger
        assert_eq!(host.overflow(), OverflowPolicy::Auto);
        assert_eq!(host.focused(), Some(TRIGGER));
    }

    #[test]
    fn test_escape_only_when_open() {
        let (mut lb, mut host) = setup();
        assert_eq!(lb.on_key(Key::Escape, false, &mut host), None);
        lb.open(payload("a.webp"), Some(TRIGGER), &mut host);
        assert_eq!(lb.on_key(Key::Escape, false, &mut host), Some(ReasonCode::L203_CLOSED));
        assert_eq!(lb.state(), ModalState::Closed);
    }

    #[test]
    fn test_backdrop_closes_content_does_not() {
        let (mut lb, mut host) = setup();
        lb.open(payload("a.webp"), Some(TRIGGER), &mut host);
        assert_eq!(lb.on_activate(&Capability::LightboxContent, &mut host), None);
        assert!(lb.is_open());
        assert_eq!(
            lb.on_activate(&Capability::LightboxOverlay, &mut host),
            Some(ReasonCode::L203_CLOSED)
        );
    }

    #[test]
    fn test_tab_wraps_both_directions() {
        let (mut lb, mut host) = setup();
        lb.open(payload("a.webp"), Some(TRIGGER), &mut host);
        assert_eq!(host.focused(), Some(DISMISS));

        // Shift+Tab on the first wraps to the last
        assert_eq!(lb.on_key(Key::Tab, true, &mut host), Some(ReasonCode::L204_FOCUS_WRAPPED));
        assert_eq!(host.focused(), Some(LINK));

        // Tab on the last wraps to the first
        assert_eq!(lb.on_key(Key::Tab, false, &mut host), Some(ReasonCode::L204_FOCUS_WRAPPED));
        assert_eq!(host.focused(), Some(DISMISS));

        // Tab in the middle is left to the host
        assert_eq!(lb.on_key(Key::Tab, false, &mut host), Some(ReasonCode::L205_FOCUS_PASSTHROUGH));
    }

    #[test]
    fn test_media_placeholder_then_ready() {
        let (mut lb, mut host) = setup();
        lb.open(payload("a.webp"), Some(TRIGGER), &mut host);
        assert_eq!(lb.displayed_media(), Some(PLACEHOLDER_MEDIA));
        assert_eq!(lb.on_media_loaded("a.webp"), Some(ReasonCode::L206_MEDIA_READY));
        assert_eq!(lb.displayed_media(), Some("a.webp"));
    }

    #[test]
    fn test_media_failure_falls_back() {
        let (mut lb, mut host) = setup();
        lb.open(payload("missing.webp"), Some(TRIGGER), &mut host);
        assert_eq!(lb.on_media_failed("missing.webp"), Some(ReasonCode::L207_MEDIA_FALLBACK));
        assert_eq!(lb.media(), Some(&MediaView::Placeholder));
        assert_eq!(lb.displayed_media(), Some(PLACEHOLDER_MEDIA));
    }

    #[test]
    fn test_stale_media_result_ignored() {
        let (mut lb, mut host) = setup();
        lb.open(payload("a.webp"), Some(TRIGGER), &mut host);
        lb.open(payload("b.webp"), Some(TRIGGER), &mut host);
        assert_eq!(lb.on_media_loaded("a.webp"), Some(ReasonCode::L208_STALE_MEDIA_IGNORED));
        assert_eq!(lb.displayed_media(), Some(PLACEHOLDER_MEDIA));
    }
}
