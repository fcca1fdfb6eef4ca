//! Integration tests for the contact form and notifications
//!
//! Validator truth table, the submission pipeline against succeeding and
//! failing endpoints, and the one-visible notification queue.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use emunah::config::SiteConfig;
use emunah::core::demo::sample_page;
use emunah::core::{
    validate, Analytics, AnalyticsEvent, Interface, ManualClock, MemoryHost, NotificationQueue,
    SubmissionEndpoint,
};
use emunah::types::{
    FieldKind, FormField, NotificationKind, ReasonCode, SubmitControl, SubmitError, Submission,
    UiEvent,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

struct Accepting {
    received: Mutex<Vec<Submission>>,
}

#[async_trait]
impl SubmissionEndpoint for Accepting {
    async fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
        self.received.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

struct Failing;

#[async_trait]
impl SubmissionEndpoint for Failing {
    async fn submit(&self, _submission: &Submission) -> Result<(), SubmitError> {
        Err(SubmitError::Status(502))
    }
}

#[derive(Clone, Default)]
struct RecordingAnalytics {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn mounted() -> Interface<MemoryHost> {
    let mut host = MemoryHost::new(1200);
    let markup = sample_page(&mut host);
    let mut rng = StdRng::seed_from_u64(5);
    Interface::mount(&markup, &SiteConfig::default(), host, &mut rng)
}

fn fill(ui: &mut Interface<MemoryHost>) {
    for (field, value) in [
        ("nombre", "Marta Gil"),
        ("email", "marta@estudio.es"),
        ("telefono", "(+34) 91 555 12 12"),
        ("espacio", "Dormitorio"),
        ("proyecto", "Armario empotrado y luz indirecta"),
    ] {
        ui.handle(
            UiEvent::ValueChange {
                field: field.to_string(),
                value: value.to_string(),
            },
            0,
        );
    }
}

fn count(ui: &Interface<MemoryHost>, kind: NotificationKind) -> usize {
    ui.notifications()
        .rendered()
        .iter()
        .filter(|n| n.kind == kind)
        .count()
}

#[test]
fn test_validator_cases() {
    assert!(validate(&FormField::new("email", FieldKind::Email).with_value("a@b.co")).valid);

    let result = validate(&FormField::new("email", FieldKind::Email).with_value("a@b"));
    assert!(!result.valid);
    assert!(!result.message.is_empty());

    assert!(!validate(&FormField::new("nombre", FieldKind::Required).with_value("  ")).valid);
    assert!(!validate(&FormField::new("telefono", FieldKind::Tel).with_value("12-34")).valid);
    assert!(validate(&FormField::new("telefono", FieldKind::Tel).with_value("+34 600 000 000")).valid);
}

#[tokio::test]
async fn test_successful_submission_clears_fields() {
    let analytics = RecordingAnalytics::default();
    let mut ui = mounted().with_analytics(Box::new(analytics.clone()));
    fill(&mut ui);
    let endpoint = Accepting {
        received: Mutex::new(Vec::new()),
    };
    let clock = ManualClock::new(2000);

    let out = ui.submit(&endpoint, &clock).await;

    assert_eq!(
        out.reasons,
        vec![ReasonCode::F405_SUBMIT_STARTED, ReasonCode::F407_SUBMIT_SUCCEEDED]
    );
    let received = endpoint.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].fields["email"], "marta@estudio.es");

    let form = ui.form().unwrap();
    assert_eq!(form.control(), SubmitControl::Idle);
    assert!(form.fields().iter().all(|f| f.raw_value.is_empty()));
    assert_eq!(count(&ui, NotificationKind::Success), 1);
    assert_eq!(count(&ui, NotificationKind::Error), 0);
    assert_eq!(
        *analytics.events.lock().unwrap(),
        vec![AnalyticsEvent::ContactSubmitted { fields: 5 }]
    );
}

#[tokio::test]
async fn test_failed_submission_keeps_fields() {
    let mut ui = mounted();
    fill(&mut ui);
    let before = ui.form().unwrap().submission();
    let clock = ManualClock::new(0);

    let out = ui.submit(&Failing, &clock).await;

    assert!(out.contains(ReasonCode::F408_SUBMIT_FAILED));
    let form = ui.form().unwrap();
    assert_eq!(form.control(), SubmitControl::Idle);
    assert_eq!(form.submission(), before);
    assert_eq!(count(&ui, NotificationKind::Error), 1);
    assert_eq!(count(&ui, NotificationKind::Success), 0);
}

#[test]
fn test_control_disabled_while_in_flight() {
    let mut ui = mounted();
    fill(&mut ui);

    let out = ui.handle(UiEvent::SubmitIntent, 0);
    assert!(out.contains(ReasonCode::F405_SUBMIT_STARTED));
    assert_eq!(ui.form().unwrap().control(), SubmitControl::Loading);

    let out = ui.handle(UiEvent::SubmitIntent, 10);
    assert!(out.contains(ReasonCode::F406_SUBMIT_IN_FLIGHT));

    assert!(ui.take_pending_submission().is_some());
    assert!(ui.take_pending_submission().is_none());
    let out = ui.complete_submission(Err(SubmitError::Transport("timeout".into())), 20);
    assert!(out.contains(ReasonCode::F408_SUBMIT_FAILED));
    assert_eq!(ui.form().unwrap().control(), SubmitControl::Idle);
}

#[tokio::test]
async fn test_invalid_form_never_reaches_endpoint() {
    let mut ui = mounted();
    ui.handle(
        UiEvent::ValueChange {
            field: "email".to_string(),
            value: "marta@".to_string(),
        },
        0,
    );
    let endpoint = Accepting {
        received: Mutex::new(Vec::new()),
    };

    let out = ui.submit(&endpoint, &ManualClock::new(0)).await;

    assert_eq!(out.reasons, vec![ReasonCode::F404_SUBMIT_BLOCKED_INVALID]);
    assert!(endpoint.received.lock().unwrap().is_empty());
    let form = ui.form().unwrap();
    assert!(form.fields().iter().all(|f| f.error_message.is_some()));
    assert_eq!(count(&ui, NotificationKind::Error), 1);
}

#[test]
fn test_three_quick_notifications_last_one_shown() {
    let mut queue = NotificationQueue::default();
    queue.dispatch("uno", NotificationKind::Info, 0);
    queue.dispatch("dos", NotificationKind::Info, 5);
    queue.dispatch("tres", NotificationKind::Info, 10);

    let mut last_seen = None;
    for now in (0..=8000).step_by(25) {
        queue.tick(now);
        let active: Vec<_> = queue.rendered().iter().filter(|n| n.is_active()).collect();
        assert!(active.len() <= 1, "at {} ms", now);
        if let Some(n) = active.first() {
            last_seen = Some(n.message.clone());
        }
    }
    assert_eq!(last_seen.as_deref(), Some("tres"));
    assert!(queue.rendered().is_empty());
}

#[tokio::test]
async fn test_notification_ttl_counts_from_submit_time() {
    let mut ui = mounted();
    fill(&mut ui);
    let clock = ManualClock::new(0);
    clock.set(60_000);

    ui.submit(&Failing, &clock).await;
    let error = ui.notifications().visible().unwrap().clone();
    assert_eq!(error.kind, NotificationKind::Error);
    assert_eq!(error.kind.background(), "#8B6F47");
    assert_eq!(error.shown_at, 60_000);

    let ttl = ui.notifications().ttl_ms();
    ui.tick(60_300);
    ui.tick(60_000 + ttl - 1);
    assert!(ui.notifications().visible().is_some());
    let out = ui.tick(60_000 + ttl);
    assert!(out.contains(ReasonCode::N504_EXPIRED));
}

#[test]
fn test_notification_expires_after_configured_ttl() {
    let mut ui = mounted();
    ui.handle(UiEvent::SubmitIntent, 0);
    let ttl = ui.notifications().ttl_ms();

    ui.tick(300);
    ui.tick(ttl - 1);
    assert!(ui.notifications().visible().is_some());
    let out = ui.tick(ttl);
    assert!(out.contains(ReasonCode::N504_EXPIRED));
    assert!(ui.notifications().visible().is_none());
}
