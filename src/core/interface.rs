//! Interface: the single event subscription for a page
//!
//! Every host event enters through `handle`; activations are routed by the
//! capability found on the target, keys by which modal state is active.
//! Features mount independently: a missing element leaves that feature
//! inert, an unexpected mount failure drops to navigation-only mode.

use rand::Rng;
use tracing::{error, info};

use crate::config::SiteConfig;
use crate::core::{
    scroll_to_anchor, Analytics, CarouselController, Clock, FormController, Gallery,
    LightboxController, NavigationController, NotificationQueue, RevealObserver,
    SubmissionEndpoint, VisibleCountFn,
};
use crate::types::{
    Capability, DispatchOutput, ElementId, InitError, Key, Millis, PageMarkup, ReasonCode,
    RevealState, SubmitError, Submission, UiEvent, ViewHost,
};

/// What got mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Full,
    /// A feature failed to mount; only the menu works
    NavigationOnly,
}

#[derive(Default)]
struct Features {
    carousel: Option<CarouselController>,
    lightbox: Option<LightboxController>,
    gallery: Option<Gallery>,
    form: Option<FormController>,
}

pub struct Interface<H: ViewHost> {
    host: H,
    mode: Mode,
    navigation: Option<NavigationController>,
    carousel: Option<CarouselController>,
    lightbox: Option<LightboxController>,
    gallery: Option<Gallery>,
    sections: RevealObserver,
    form: Option<FormController>,
    notifications: NotificationQueue,
    analytics: Option<Box<dyn Analytics>>,
    pending_submission: Option<Submission>,
}

impl<H: ViewHost> Interface<H> {
    /// Mount every feature found in `markup`
    pub fn mount<R: Rng + ?Sized>(
        markup: &PageMarkup,
        config: &SiteConfig,
        host: H,
        rng: &mut R,
    ) -> Self {
        let navigation = NavigationController::initialize(&markup.navigation);
        let mut sections = RevealObserver::new(config.reveal.section_margin);

        let (mode, features) = match Self::mount_features(markup, config, &host, rng) {
            Ok(features) => {
                for &section in &markup.reveal_sections {
                    sections.observe(section);
                }
                (Mode::Full, features)
            }
            Err(e) => {
                error!(error = %e, "interface initialisation failed, navigation only");
                (Mode::NavigationOnly, Features::default())
            }
        };

        info!(
            ?mode,
            navigation = navigation.is_some(),
            carousel = features.carousel.is_some(),
            lightbox = features.lightbox.is_some(),
            gallery = features.gallery.is_some(),
            form = features.form.is_some(),
            "interface mounted"
        );

        Self {
            host,
            mode,
            navigation,
            carousel: features.carousel,
            lightbox: features.lightbox,
            gallery: features.gallery,
            sections,
            form: features.form,
            notifications: NotificationQueue::new(
                config.notifications.ttl_ms,
                config.notifications.stage_ms,
            ),
            analytics: None,
            pending_submission: None,
        }
    }

    fn mount_features<R: Rng + ?Sized>(
        markup: &PageMarkup,
        config: &SiteConfig,
        host: &H,
        rng: &mut R,
    ) -> Result<Features, InitError> {
        let breakpoints = config.carousel.clone();
        let visible_fn: VisibleCountFn = Box::new(move |width| breakpoints.visible_count(width));
        Ok(Features {
            carousel: CarouselController::initialize(
                &markup.carousel,
                visible_fn,
                config.carousel.debounce_ms,
                host,
            )?,
            lightbox: LightboxController::initialize(
                &markup.lightbox,
                config.reveal.placeholder_media.clone(),
            )?,
            gallery: Gallery::initialize(&markup.gallery, rng, config.reveal.gallery_margin),
            form: FormController::initialize(&markup.form, config.messages.clone())?,
        })
    }

    /// Attach an analytics sink; absent by default
    pub fn with_analytics(mut self, analytics: Box<dyn Analytics>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    /// Dispatch one host event
    pub fn handle(&mut self, event: UiEvent, now: Millis) -> DispatchOutput {
        let reasons: Vec<ReasonCode> = match event {
            UiEvent::Activate { target } => self.activate(target, now),
            UiEvent::Key { key, shift } => self.key(key, shift).into_iter().collect(),
            UiEvent::Resize => self
                .carousel
                .as_mut()
                .map(|c| c.on_resize(now))
                .into_iter()
                .collect(),
            UiEvent::Proximity { target, distance } => {
                let gallery = self
                    .gallery
                    .as_mut()
                    .and_then(|g| g.on_proximity(target, distance));
                gallery
                    .or_else(|| self.sections.on_proximity(target, distance))
                    .into_iter()
                    .collect()
            }
            UiEvent::TransitionEnd => self
                .carousel
                .as_mut()
                .and_then(|c| c.on_transition_end())
                .into_iter()
                .collect(),
            UiEvent::ValueChange { field, value } => self
                .form
                .as_mut()
                .map(|f| f.on_value_change(&field, value))
                .into_iter()
                .collect(),
            UiEvent::Blur { field } => self
                .form
                .as_mut()
                .map(|f| f.on_blur(&field))
                .into_iter()
                .collect(),
            UiEvent::SubmitIntent => self.submit_intent(now).into_iter().collect(),
            UiEvent::MediaLoaded { media } => self
                .lightbox
                .as_mut()
                .and_then(|l| l.on_media_loaded(&media))
                .into_iter()
                .collect(),
            UiEvent::MediaFailed { media } => self
                .lightbox
                .as_mut()
                .and_then(|l| l.on_media_failed(&media))
                .into_iter()
                .collect(),
        };

        if reasons.is_empty() {
            DispatchOutput::ignored()
        } else {
            DispatchOutput::new(reasons)
        }
    }

    fn activate(&mut self, target: ElementId, now: Millis) -> Vec<ReasonCode> {
        let Some(capability) = self.host.capability(target) else {
            return Vec::new();
        };
        match &capability {
            Capability::LightboxTrigger(payload) => self
                .lightbox
                .as_mut()
                .map(|l| l.open(payload.clone(), Some(target), &mut self.host))
                .into_iter()
                .collect(),
            Capability::LightboxDismiss
            | Capability::LightboxOverlay
            | Capability::LightboxContent => self
                .lightbox
                .as_mut()
                .and_then(|l| l.on_activate(&capability, &mut self.host))
                .into_iter()
                .collect(),
            Capability::CarouselNext => self
                .carousel
                .as_mut()
                .map(|c| c.move_next())
                .into_iter()
                .collect(),
            Capability::CarouselPrev => self
                .carousel
                .as_mut()
                .map(|c| c.move_previous())
                .into_iter()
                .collect(),
            Capability::Notification(id) => {
                self.notifications.dismiss(*id, now).into_iter().collect()
            }
            Capability::MenuToggle => self
                .navigation
                .as_mut()
                .and_then(|n| n.on_activate(&capability))
                .into_iter()
                .collect(),
            Capability::NavLink(anchor) => {
                let mut reasons: Vec<ReasonCode> = self
                    .navigation
                    .as_mut()
                    .and_then(|n| n.on_activate(&capability))
                    .into_iter()
                    .collect();
                if let Some(anchor) = *anchor {
                    reasons.extend(scroll_to_anchor(anchor, &mut self.host));
                }
                reasons
            }
            Capability::Anchor(anchor) => {
                scroll_to_anchor(*anchor, &mut self.host).into_iter().collect()
            }
        }
    }

    fn key(&mut self, key: Key, shift: bool) -> Option<ReasonCode> {
        if let Some(lightbox) = self.lightbox.as_mut().filter(|l| l.is_open()) {
            return lightbox.on_key(key, shift, &mut self.host);
        }
        let carousel = self.carousel.as_mut()?;
        match key {
            Key::ArrowLeft => Some(carousel.move_previous()),
            Key::ArrowRight => Some(carousel.move_next()),
            _ => None,
        }
    }

    fn submit_intent(&mut self, now: Millis) -> Option<ReasonCode> {
        let form = self.form.as_mut()?;
        match form.begin_submit(now, &mut self.notifications) {
            Ok(submission) => {
                self.pending_submission = Some(submission);
                Some(ReasonCode::F405_SUBMIT_STARTED)
            }
            Err(reason) => Some(reason),
        }
    }

    /// Fire due timers across controllers
    pub fn tick(&mut self, now: Millis) -> DispatchOutput {
        let mut reasons = Vec::new();
        if let Some(carousel) = self.carousel.as_mut() {
            reasons.extend(carousel.tick(now, &self.host));
        }
        reasons.extend(self.notifications.tick(now));
        DispatchOutput::new(reasons)
    }

    /// Submission accepted by `SubmitIntent`, waiting for the endpoint
    pub fn take_pending_submission(&mut self) -> Option<Submission> {
        self.pending_submission.take()
    }

    /// Feed the endpoint result back
    pub fn complete_submission(
        &mut self,
        result: Result<(), SubmitError>,
        now: Millis,
    ) -> DispatchOutput {
        let Some(form) = self.form.as_mut() else {
            return DispatchOutput::ignored();
        };
        let reason = form.finish_submit(
            result,
            now,
            &mut self.notifications,
            self.analytics.as_deref(),
        );
        DispatchOutput::new(vec![reason])
    }

    /// Submit intent, endpoint call and completion in one go
    pub async fn submit<E: SubmissionEndpoint + ?Sized>(
        &mut self,
        endpoint: &E,
        clock: &dyn Clock,
    ) -> DispatchOutput {
        let mut output = self.handle(UiEvent::SubmitIntent, clock.now());
        if let Some(submission) = self.take_pending_submission() {
            let result = endpoint.submit(&submission).await;
            let done = self.complete_submission(result, clock.now());
            output.reasons.extend(done.reasons);
        }
        output
    }

    /// Media loads the gallery wants started
    pub fn take_media_requests(&mut self) -> Vec<String> {
        self.gallery
            .as_mut()
            .map(|g| g.take_load_requests())
            .unwrap_or_default()
    }

    pub fn section_revealed(&self, section: ElementId) -> bool {
        self.sections.state(section) == Some(RevealState::Revealed)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn navigation(&self) -> Option<&NavigationController> {
        self.navigation.as_ref()
    }

    pub fn carousel(&self) -> Option<&CarouselController> {
        self.carousel.as_ref()
    }

    pub fn lightbox(&self) -> Option<&LightboxController> {
        self.lightbox.as_ref()
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        self.gallery.as_ref()
    }

    pub fn form(&self) -> Option<&FormController> {
        self.form.as_ref()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }
}

// =============================================================================
// TESTS
// =============================================================================
