//! Transient notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Millis;

/// Identifies one dispatched notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    /// Background colour used by the site stylesheet
    pub fn background(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#4A6741",
            NotificationKind::Error => "#8B6F47",
            NotificationKind::Info => "#5B6B7A",
        }
    }

    /// CSS modifier class
    pub fn class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "notification-success",
            NotificationKind::Error => "notification-error",
            NotificationKind::Info => "notification-info",
        }
    }
}

/// Visual phase; drives styling instead of inline mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPhase {
    Entering,
    Visible,
    /// Fading out; already logically dismissed
    Leaving,
    /// Removed from the view tree
    Gone,
}

/// A dispatched message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    pub phase: NotificationPhase,
    /// Host time of dispatch; auto-retirement counts from here
    #[serde(skip)]
    pub shown_at: Millis,
    /// Host time the current phase ends (entering → visible, visible →
    /// leaving, leaving → gone)
    #[serde(skip)]
    pub phase_deadline: Millis,
}

impl Notification {
    /// Still logically on screen (entering or visible)
    pub fn is_active(&self) -> bool {
        matches!(
            self.phase,
            NotificationPhase::Entering | NotificationPhase::Visible
        )
    }
}
