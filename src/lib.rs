//! Emunah: interface engine for the Emunah site
//!
//! Headless view-state controllers (carousel, lightbox, gallery, contact form,
//! notifications, navigation) driven by a host through `ViewHost` and
//! `UiEvent`, plus the HTTP mail endpoint the contact form submits to.

pub mod config;
pub mod core;
pub mod types;

// =============================================================================
// CAROUSEL [C]
// =============================================================================

/// Viewport width above which three slides are visible
pub const BREAKPOINT_WIDE: u32 = 992;

/// Viewport width above which two slides are visible
pub const BREAKPOINT_MEDIUM: u32 = 576;

/// Resize events closer together than this collapse into one rebuild (ms)
pub const RESIZE_DEBOUNCE_MS: u64 = 250;

// =============================================================================
// NOTIFICATIONS [C]
// =============================================================================

/// Notification time-to-live (ms)
/// Earlier site revisions used 3000 and 3500; 5000 is the one we keep.
pub const NOTIFICATION_TTL_MS: u64 = 5000;

/// Enter / leave animation staging (ms)
pub const NOTIFICATION_STAGE_MS: u64 = 300;

// =============================================================================
// REVEAL [C]
// =============================================================================

/// Gallery media loads once an item is within this distance of the viewport
pub const GALLERY_REVEAL_MARGIN: i32 = 50;

/// Sections animate in once they are this far inside the viewport
pub const SECTION_REVEAL_MARGIN: i32 = -50;

/// Reserved media reference shown while loading and after a load failure
pub const PLACEHOLDER_MEDIA: &str = "img/placeholder.webp";

// =============================================================================
// MESSAGES
// =============================================================================

pub const MSG_SUBMIT_SUCCESS: &str = "¡Gracias! Nos pondremos en contacto pronto.";
pub const MSG_SUBMIT_FAILURE: &str = "No pudimos enviar tu consulta. Inténtalo de nuevo.";
pub const MSG_FORM_INVALID: &str = "Revisa los campos marcados antes de enviar.";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "2.0.0";
