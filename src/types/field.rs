//! Contact form fields

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Validation rule a field follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Required,
}

/// One form field and its last validation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Submitted name (e.g. "nombre")
    pub name: String,
    pub kind: FieldKind,
    pub raw_value: String,
    pub valid: bool,
    /// Advisory message rendered next to the field
    pub error_message: Option<String>,
}

impl FormField {
    /// Empty field; valid until first validated
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            raw_value: String::new(),
            valid: true,
            error_message: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.raw_value = value.into();
        self
    }

    /// Back to an empty, error-free field
    pub fn reset(&mut self) {
        self.raw_value.clear();
        self.valid = true;
        self.error_message = None;
    }
}

/// Result of validating one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    /// Empty when valid
    pub message: String,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Visual state of the submit control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitControl {
    #[default]
    Idle,
    /// Disabled while the submission is in flight
    Loading,
}

/// Field-name → value mapping handed to the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub fields: BTreeMap<String, String>,
}
