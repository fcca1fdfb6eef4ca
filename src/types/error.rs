//! Error types
//!
//! Recoverable controller outcomes are `ReasonCode`s, not errors. These cover
//! the paths that genuinely fail: mounting, submission, relay, config.

use thiserror::Error;

/// Unexpected initialisation failure (missing elements are not errors)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InitError {
    #[error("visible-count function returned 0 for width {width}")]
    ZeroVisibleCount { width: u32 },
    #[error("lightbox dismiss control is not in the focusable set")]
    DismissNotFocusable,
    #[error("form field `{0}` declared twice")]
    DuplicateField(String),
}

/// Submission endpoint failure
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("endpoint rejected submission: {0}")]
    Rejected(String),
    #[error("endpoint returned HTTP {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Mail relay failure
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay authentication failed for {0}")]
    Auth(String),
    #[error("relay refused message: {0}")]
    Refused(String),
    #[error("invalid mail address: {0}")]
    Address(String),
}

/// Config file failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
