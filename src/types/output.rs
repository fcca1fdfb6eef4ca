//! Output of one dispatched event

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ReasonCode;

/// What the interface did with an event or tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Reasons from every controller that reacted, in order
    pub reasons: Vec<ReasonCode>,
}

impl DispatchOutput {
    pub fn new(reasons: Vec<ReasonCode>) -> Self {
        Self {
            timestamp: Utc::now(),
            reasons,
        }
    }

    pub fn ignored() -> Self {
        Self::new(vec![ReasonCode::I001_IGNORED])
    }

    pub fn contains(&self, reason: ReasonCode) -> bool {
        self.reasons.contains(&reason)
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let codes: Vec<&str> = self.reasons.iter().map(|r| r.code()).collect();
        format!("reasons={}", codes.join(","))
    }
}
