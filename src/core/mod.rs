//! Core modules for Emunah

pub mod host;
pub mod reveal;
pub mod notifications;
pub mod validator;
pub mod endpoint;
pub mod carousel;
pub mod lightbox;
pub mod gallery;
pub mod form;
pub mod navigation;
pub mod interface;
pub mod demo;
pub mod api;

pub use host::{Clock, ManualClock, MemoryHost, SystemClock};
pub use reveal::RevealObserver;
pub use notifications::NotificationQueue;
pub use validator::validate;
pub use endpoint::{HttpEndpoint, SubmissionEndpoint};
pub use carousel::{CarouselController, VisibleCountFn};
pub use lightbox::LightboxController;
pub use gallery::{shuffle, Gallery};
pub use form::{Analytics, AnalyticsEvent, FormController, TracingAnalytics};
pub use navigation::{scroll_to_anchor, NavigationController};
pub use interface::{Interface, Mode};
pub use demo::sample_page;
pub use api::{
    create_router, run_server, ContactSubmission, LogRelay, MailMessage, MailRelay, MailReply,
    SmtpRelay,
};
