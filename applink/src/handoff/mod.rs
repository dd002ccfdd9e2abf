//! Handing the visitor over to the native app, and falling back when the
//! app does not open.

pub mod attempt;
pub mod monitor;
pub mod selector;
pub mod strategies;
pub mod strategy_trait;

pub use attempt::{Attempt, HandoffState, Resolution};
pub use monitor::FallbackMonitor;
pub use selector::{dispatch, StrategyRegistry};
pub use strategy_trait::HandoffStrategy;

use crate::console_warn;
use crate::services::host::PageHost;

/// Where a call to the router sent the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Waiting on the before hook; nothing has happened yet
    Deferred,
    /// A handoff to this URL is in flight
    Handoff(String),
    /// Sent straight to this fallback URL
    Fallback(String),
}

impl Destination {
    /// The URL the page was pointed at, empty while deferred
    pub fn url(&self) -> &str {
        match self {
            Destination::Deferred => "",
            Destination::Handoff(url) | Destination::Fallback(url) => url,
        }
    }
}

/// Send the page to the fallback. An empty URL would only reload the page,
/// so it is logged and skipped.
pub(crate) fn navigate_to_fallback(host: &dyn PageHost, url: &str) {
    if url.is_empty() {
        console_warn!("[Fallback] No store or fallback URL configured, staying on the page");
        return;
    }
    host.navigate(url);
}
