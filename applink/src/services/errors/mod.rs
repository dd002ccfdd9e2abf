use thiserror::Error;

/// Errors raised by the router.
///
/// Only configuration problems are errors. An unmatched user-agent or a
/// platform without an app URL is resolved through the fallback path, and an
/// ambiguous handoff is settled by the timeout/visibility heuristic.
#[derive(Debug, Error)]
pub enum AppLinkError {
    #[error("Platform '{platform}': Cannot read property 'router'")]
    MissingRouter { platform: String },

    #[error("Platform '{platform}': Router {router:?} does not exist")]
    UnknownRouter { platform: String, router: String },

    #[error("No handoff strategy registered for {family} on {engine}")]
    MissingStrategy { family: String, engine: String },

    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {source}")]
    InvalidConfig {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid timings: {field} = {value}")]
    InvalidTimings { field: String, value: String },

    #[error("Browser host unavailable: {reason}")]
    Host { reason: String },
}

pub type AppLinkResult<T> = Result<T, AppLinkError>;

impl AppLinkError {
    /// Configuration mismatches that must surface to the page author
    pub fn is_configuration(&self) -> bool {
        !matches!(self, AppLinkError::Host { .. })
    }
}
