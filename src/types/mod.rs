//! Core types for the interface engine

mod error;
mod event;
mod field;
mod gallery;
mod host;
mod markup;
mod modal;
mod notification;
mod output;
mod reason;
mod slide;

pub use error::{ConfigError, InitError, RelayError, SubmitError};
pub use event::{Key, UiEvent};
pub use field::{FieldKind, FormField, SubmitControl, Submission, Validation};
pub use gallery::{GalleryItem, RevealState};
pub use host::{Capability, ElementId, Millis, OverflowPolicy, ViewHost};
pub use markup::{
    CarouselMarkup, FieldMarkup, FormMarkup, GalleryMarkup, LightboxMarkup, NavigationMarkup,
    PageMarkup,
};
pub use modal::{LightboxPayload, MediaView, ModalState};
pub use notification::{Notification, NotificationId, NotificationKind, NotificationPhase};
pub use output::DispatchOutput;
pub use reason::ReasonCode;
pub use slide::{CarouselState, Direction, Slide, TrackStyle};
