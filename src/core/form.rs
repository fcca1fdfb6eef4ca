//! Contact form: inline validation and the submission pipeline
//!
//! Submission is two-phase so the host can drive the await itself:
//! `begin_submit` validates and puts the control in LOADING,
//! `finish_submit` always puts it back to IDLE and notifies the outcome.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::config::MessageConfig;
use crate::core::validator::validate;
use crate::core::{Clock, NotificationQueue, SubmissionEndpoint};
use crate::types::{
    ElementId, FormField, FormMarkup, InitError, Millis, NotificationKind, ReasonCode,
    SubmitControl, SubmitError, Submission,
};

/// Events sent to an optional analytics collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    ContactSubmitted { fields: usize },
}

/// Fire-and-forget analytics sink
pub trait Analytics {
    fn track(&self, event: &AnalyticsEvent);
}

/// Analytics sink that only logs
#[derive(Debug, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        info!(?event, "analytics event");
    }
}

#[derive(Debug)]
pub struct FormController {
    form: ElementId,
    submit: Option<ElementId>,
    fields: Vec<FormField>,
    control: SubmitControl,
    messages: MessageConfig,
}

impl FormController {
    /// Mount on the given markup; `Ok(None)` without a form element
    pub fn initialize(
        markup: &FormMarkup,
        messages: MessageConfig,
    ) -> Result<Option<Self>, InitError> {
        let Some(form) = markup.form else {
            debug!("contact form absent, skipping");
            return Ok(None);
        };
        let mut fields: Vec<FormField> = Vec::with_capacity(markup.fields.len());
        for field in &markup.fields {
            if fields.iter().any(|f| f.name == field.name) {
                return Err(InitError::DuplicateField(field.name.clone()));
            }
            fields.push(FormField::new(field.name.clone(), field.kind));
        }
        Ok(Some(Self {
            form,
            submit: markup.submit,
            fields,
            control: SubmitControl::Idle,
            messages,
        }))
    }

    /// Value changed: store it and clear a shown error as soon as it is fixed
    ///
    /// Never raises a new error; that waits for blur.
    pub fn on_value_change(&mut self, name: &str, value: impl Into<String>) -> ReasonCode {
        let Some(field) = self.fields.iter_mut().find(|f| f.name == name) else {
            return ReasonCode::F409_UNKNOWN_FIELD;
        };
        field.raw_value = value.into();
        let result = validate(field);
        field.valid = result.valid;

        match (result.valid, field.error_message.is_some()) {
            (true, true) => {
                field.error_message = None;
                ReasonCode::F403_ERROR_CLEARED
            }
            (true, false) => ReasonCode::F401_FIELD_VALID,
            (false, true) => {
                field.error_message = Some(result.message);
                ReasonCode::F402_FIELD_INVALID
            }
            (false, false) => ReasonCode::F402_FIELD_INVALID,
        }
    }

    /// Field lost focus: validate and show (or clear) its message
    pub fn on_blur(&mut self, name: &str) -> ReasonCode {
        let Some(field) = self.fields.iter_mut().find(|f| f.name == name) else {
            return ReasonCode::F409_UNKNOWN_FIELD;
        };
        Self::apply(field)
    }

    fn apply(field: &mut FormField) -> ReasonCode {
        let result = validate(field);
        field.valid = result.valid;
        if result.valid {
            field.error_message = None;
            ReasonCode::F401_FIELD_VALID
        } else {
            field.error_message = Some(result.message);
            ReasonCode::F402_FIELD_INVALID
        }
    }

    /// Revalidate every field, showing each message; true if all pass
    pub fn validate_all(&mut self) -> bool {
        let mut all_valid = true;
        for field in &mut self.fields {
            if Self::apply(field) != ReasonCode::F401_FIELD_VALID {
                all_valid = false;
            }
        }
        all_valid
    }

    /// Validate and enter LOADING; on refusal the reason is returned and no
    /// request must be made
    pub fn begin_submit(
        &mut self,
        now: Millis,
        queue: &mut NotificationQueue,
    ) -> Result<Submission, ReasonCode> {
        if self.control == SubmitControl::Loading {
            return Err(ReasonCode::F406_SUBMIT_IN_FLIGHT);
        }
        if !self.validate_all() {
            queue.dispatch(self.messages.invalid.clone(), NotificationKind::Error, now);
            return Err(ReasonCode::F404_SUBMIT_BLOCKED_INVALID);
        }
        self.control = SubmitControl::Loading;
        info!(fields = self.fields.len(), "contact submission started");
        Ok(self.submission())
    }

    /// Apply the endpoint result; the control is back to IDLE either way
    pub fn finish_submit(
        &mut self,
        result: Result<(), SubmitError>,
        now: Millis,
        queue: &mut NotificationQueue,
        analytics: Option<&dyn Analytics>,
    ) -> ReasonCode {
        self.control = SubmitControl::Idle;
        match result {
            Ok(()) => {
                queue.dispatch(self.messages.success.clone(), NotificationKind::Success, now);
                if let Some(analytics) = analytics {
                    analytics.track(&AnalyticsEvent::ContactSubmitted {
                        fields: self.fields.len(),
                    });
                }
                for field in &mut self.fields {
                    field.reset();
                }
                info!("contact submission delivered");
                ReasonCode::F407_SUBMIT_SUCCEEDED
            }
            Err(error) => {
                warn!(%error, "contact submission failed");
                queue.dispatch(self.messages.failure.clone(), NotificationKind::Error, now);
                ReasonCode::F408_SUBMIT_FAILED
            }
        }
    }

    /// Full pipeline against an endpoint
    pub async fn submit<E: SubmissionEndpoint + ?Sized>(
        &mut self,
        endpoint: &E,
        queue: &mut NotificationQueue,
        clock: &dyn Clock,
        analytics: Option<&dyn Analytics>,
    ) -> ReasonCode {
        let submission = match self.begin_submit(clock.now(), queue) {
            Ok(submission) => submission,
            Err(reason) => return reason,
        };
        let result = endpoint.submit(&submission).await;
        self.finish_submit(result, clock.now(), queue, analytics)
    }

    /// Current field-name → value mapping
    pub fn submission(&self) -> Submission {
        let fields: BTreeMap<String, String> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.raw_value.clone()))
            .collect();
        Submission { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn control(&self) -> SubmitControl {
        self.control
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    pub fn submit_element(&self) -> Option<ElementId> {
        self.submit
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldKind, FieldMarkup};

    fn form() -> FormController {
        let markup = FormMarkup {
            form: Some(ElementId(1)),
            submit: Some(ElementId(2)),
            fields: vec![
                FieldMarkup::new("nombre", FieldKind::Required),
                FieldMarkup::new("email", FieldKind::Email),
                FieldMarkup::new("telefono", FieldKind::Tel),
            ],
        };
        FormController::initialize(&markup, MessageConfig::default())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_duplicate_field_is_init_error() {
        let markup = FormMarkup {
            form: Some(ElementId(1)),
            submit: None,
            fields: vec![
                FieldMarkup::new("email", FieldKind::Email),
                FieldMarkup::new("email", FieldKind::Email),
            ],
        };
        let err = FormController::initialize(&markup, MessageConfig::default()).unwrap_err();
        assert_eq!(err, InitError::DuplicateField("email".to_string()));
    }

    #[test]
    fn test_blur_sets_error_change_clears_it() {
        let mut f = form();
        f.on_value_change("email", "a@b");
        assert!(f.field("email").unwrap().error_message.is_none(), "change never raises");

        assert_eq!(f.on_blur("email"), ReasonCode::F402_FIELD_INVALID);
        assert!(f.field("email").unwrap().error_message.is_some());

        assert_eq!(f.on_value_change("email", "a@b.co"), ReasonCode::F403_ERROR_CLEARED);
        let field = f.field("email").unwrap();
        assert!(field.valid);
        assert!(field.error_message.is_none());
    }

    #[test]
    fn test_new_error_replaces_previous() {
        let mut f = form();
        f.on_blur("email");
        assert_eq!(
            f.field("email").unwrap().error_message.as_deref(),
            Some(crate::core::validator::MSG_REQUIRED)
        );
        f.on_value_change("email", "nope");
        assert_eq!(
            f.field("email").unwrap().error_message.as_deref(),
            Some(crate::core::validator::MSG_EMAIL)
        );
    }

    #[test]
    fn test_unknown_field() {
        let mut f = form();
        assert_eq!(f.on_blur("missing"), ReasonCode::F409_UNKNOWN_FIELD);
    }

    #[test]
    fn test_invalid_submit_blocked_with_error_notification() {
        let mut f = form();
        let mut queue = NotificationQueue::default();
        f.on_value_change("nombre", "Ana");
        assert_eq!(
            f.begin_submit(0, &mut queue).unwrap_err(),
            ReasonCode::F404_SUBMIT_BLOCKED_INVALID
        );
        assert_eq!(f.control(), SubmitControl::Idle);
        assert_eq!(queue.visible().unwrap().kind, NotificationKind::Error);
        assert!(f.field("email").unwrap().error_message.is_some());
    }

    #[test]
    fn test_second_begin_while_loading_refused() {
        let mut f = form();
        let mut queue = NotificationQueue::default();
        f.on_value_change("nombre", "Ana");
        f.on_value_change("email", "ana@correo.es");
        f.on_value_change("telefono", "600 123 456");
        let submission = f.begin_submit(0, &mut queue).unwrap();
        assert_eq!(submission.fields["email"], "ana@correo.es");
        assert_eq!(f.control(), SubmitControl::Loading);
        assert_eq!(f.begin_submit(1, &mut queue).unwrap_err(), ReasonCode::F406_SUBMIT_IN_FLIGHT);

        f.finish_submit(Err(SubmitError::Status(500)), 2, &mut queue, None);
        assert_eq!(f.control(), SubmitControl::Idle);
        assert_eq!(f.field("nombre").unwrap().raw_value, "Ana");
    }
}
