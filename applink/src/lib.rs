//! This crate contains the app link router: it sends a visiting browser to a
//! native app, its store page, or a web fallback.

pub mod app;
pub use app::{AppLink, Continuation};

pub mod handoff;
pub use handoff::Destination;
pub mod routing;
pub mod services;
pub mod utils;

pub use services::config::{AppLinkConfig, HandoffTimings, PlatformDefinition};
pub use services::errors::{AppLinkError, AppLinkResult};
pub use services::host::{PageHost, RedirectContext};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use services::host::WebHost;

#[doc(hidden)]
pub mod __private {
    pub use gloo_console;
    pub use js_sys;
    pub use tracing;
}
