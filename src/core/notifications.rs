//! Notification queue: one visible message at a time
//!
//! Phases: ENTERING → VISIBLE → LEAVING → GONE. A notification stops being
//! "visible" the moment it starts leaving (superseded, expired or dismissed),
//! so a new dispatch never waits for the outgoing animation.

use chrono::Utc;
use tracing::debug;

use crate::types::{
    Millis, Notification, NotificationId, NotificationKind, NotificationPhase, ReasonCode,
};

#[derive(Debug)]
pub struct NotificationQueue {
    ttl_ms: u64,
    stage_ms: u64,
    next_id: u64,
    /// Everything still in the view tree, oldest first
    entries: Vec<Notification>,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(crate::NOTIFICATION_TTL_MS, crate::NOTIFICATION_STAGE_MS)
    }
}

impl NotificationQueue {
    pub fn new(ttl_ms: u64, stage_ms: u64) -> Self {
        Self {
            ttl_ms,
            stage_ms,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Show a message, retiring whatever is visible
    pub fn dispatch(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Millis,
    ) -> Vec<ReasonCode> {
        let mut reasons = Vec::new();
        let stage_ms = self.stage_ms;
        if let Some(active) = self.entries.iter_mut().find(|n| n.is_active()) {
            active.phase = NotificationPhase::Leaving;
            active.phase_deadline = now + stage_ms;
            reasons.push(ReasonCode::N502_SUPERSEDED);
        }

        let id = NotificationId(self.next_id);
        self.next_id += 1;
        let message = message.into();
        debug!(id = id.0, ?kind, %message, "notification dispatched");
        self.entries.push(Notification {
            id,
            message,
            kind,
            created_at: Utc::now(),
            phase: NotificationPhase::Entering,
            shown_at: now,
            phase_deadline: now + stage_ms,
        });
        reasons.push(ReasonCode::N501_DISPATCHED);
        reasons
    }

    /// Manual dismissal; cancels the pending auto-retirement
    pub fn dismiss(&mut self, id: NotificationId, now: Millis) -> Option<ReasonCode> {
        let entry = self
            .entries
            .iter_mut()
            .find(|n| n.id == id && n.is_active())?;
        entry.phase = NotificationPhase::Leaving;
        entry.phase_deadline = now + self.stage_ms;
        Some(ReasonCode::N505_DISMISSED)
    }

    /// Advance phases whose deadline has passed
    pub fn tick(&mut self, now: Millis) -> Vec<ReasonCode> {
        let mut reasons = Vec::new();
        for entry in &mut self.entries {
            if entry.phase == NotificationPhase::Entering && now >= entry.phase_deadline {
                entry.phase = NotificationPhase::Visible;
                entry.phase_deadline = entry.shown_at + self.ttl_ms;
                reasons.push(ReasonCode::N503_SHOWN);
            }
            if entry.phase == NotificationPhase::Visible && now >= entry.phase_deadline {
                entry.phase = NotificationPhase::Leaving;
                entry.phase_deadline = now + self.stage_ms;
                reasons.push(ReasonCode::N504_EXPIRED);
            }
            if entry.phase == NotificationPhase::Leaving && now >= entry.phase_deadline {
                entry.phase = NotificationPhase::Gone;
                reasons.push(ReasonCode::N506_REMOVED);
            }
        }
        self.entries.retain(|n| n.phase != NotificationPhase::Gone);
        reasons
    }

    /// The logically visible notification, if any
    pub fn visible(&self) -> Option<&Notification> {
        self.entries.iter().find(|n| n.is_active())
    }

    /// Everything still rendered, leaving ones included
    pub fn rendered(&self) -> &[Notification] {
        &self.entries
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }
}

// =============================================================================
// TESTS
// =============================================================================
