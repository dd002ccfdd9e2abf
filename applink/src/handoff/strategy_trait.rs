//! Handoff strategy trait definition

use crate::handoff::attempt::Attempt;
use crate::routing::builder::ResolvedUrls;
use crate::services::config::HandoffTimings;

/// One way of handing the visitor over to a native app
pub trait HandoffStrategy {
    /// Get the strategy name
    fn name(&self) -> &'static str;

    /// The URL this strategy opens the app with. An empty URL means there is
    /// nothing to attempt and the visitor goes straight to the fallback.
    fn handoff_url<'a>(&self, urls: &'a ResolvedUrls) -> &'a str {
        &urls.app_url
    }

    /// Start the handoff on an attempt that has already begun. Everything
    /// the strategy arms goes through `attempt`, which resolves exactly once.
    fn handoff(&self, attempt: &Attempt, url: &str, timings: &HandoffTimings);
}
