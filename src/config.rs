//! Site configuration
//!
//! Every tunable has a default matching the constants in the crate root, so
//! an empty (or absent) config file is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub notifications: NotificationConfig,
    pub carousel: CarouselConfig,
    pub reveal: RevealConfig,
    pub messages: MessageConfig,
    pub submission: SubmissionConfig,
    pub relay: RelayConfig,
}

impl SiteConfig {
    /// Load from a JSON file; missing keys fall back to defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub ttl_ms: u64,
    pub stage_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            ttl_ms: crate::NOTIFICATION_TTL_MS,
            stage_ms: crate::NOTIFICATION_STAGE_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub debounce_ms: u64,
    pub breakpoint_wide: u32,
    pub breakpoint_medium: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            debounce_ms: crate::RESIZE_DEBOUNCE_MS,
            breakpoint_wide: crate::BREAKPOINT_WIDE,
            breakpoint_medium: crate::BREAKPOINT_MEDIUM,
        }
    }
}

impl CarouselConfig {
    /// Visible slide count for a width under these breakpoints
    pub fn visible_count(&self, width: u32) -> usize {
        if width > self.breakpoint_wide {
            3
        } else if width > self.breakpoint_medium {
            2
        } else {
            1
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub gallery_margin: i32,
    pub section_margin: i32,
    pub placeholder_media: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            gallery_margin: crate::GALLERY_REVEAL_MARGIN,
            section_margin: crate::SECTION_REVEAL_MARGIN,
            placeholder_media: crate::PLACEHOLDER_MEDIA.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub success: String,
    pub failure: String,
    pub invalid: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            success: crate::MSG_SUBMIT_SUCCESS.to_string(),
            failure: crate::MSG_SUBMIT_FAILURE.to_string(),
            invalid: crate::MSG_FORM_INVALID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3000/enviar-mail".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Mail relay identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS; off only for local test relays
    pub tls: bool,
    pub timeout_ms: u64,
    pub username: String,
    /// Never serialised back out
    #[serde(skip_serializing)]
    pub password: String,
    /// Sender and recipient of contact mails
    pub mailbox: String,
    pub sender_name: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 465,
            tls: true,
            timeout_ms: 10_000,
            username: String::new(),
            password: String::new(),
            mailbox: String::new(),
            sender_name: "Emunah Web".to_string(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: SiteConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.notifications.ttl_ms, crate::NOTIFICATION_TTL_MS);
        assert_eq!(config.carousel.debounce_ms, crate::RESIZE_DEBOUNCE_MS);
        assert_eq!(config.reveal.gallery_margin, 50);
    }

    #[test]
    fn test_partial_override() {
        let config: SiteConfig =
            serde_json::from_str(r#"{"notifications": {"ttl_ms": 3500}}"#).unwrap();
        assert_eq!(config.notifications.ttl_ms, 3500);
        assert_eq!(config.notifications.stage_ms, crate::NOTIFICATION_STAGE_MS);
    }

    #[test]
    fn test_visible_count_breakpoints() {
        let carousel = CarouselConfig::default();
        assert_eq!(carousel.visible_count(1200), 3);
        assert_eq!(carousel.visible_count(993), 3);
        assert_eq!(carousel.visible_count(992), 2);
        assert_eq!(carousel.visible_count(577), 2);
        assert_eq!(carousel.visible_count(576), 1);
        assert_eq!(carousel.visible_count(320), 1);
    }

    #[test]
    fn test_password_not_serialised() {
        let mut config = SiteConfig::default();
        config.relay.password = "secret".to_string();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = SiteConfig::load("/nonexistent/emunah.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
