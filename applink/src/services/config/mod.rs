mod timings;

pub use timings::HandoffTimings;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::console_warn;
use crate::services::errors::AppLinkResult;
use crate::utils::{deserialize_flag, deserialize_nullable_string, deserialize_pattern_list};

/// Prefix the server-side module puts in front of every platform identifier
pub const PLATFORM_KEY_PREFIX: &str = "app_link_platform_";

/// Identifier of the entry that describes the generic web fallback
pub const FALLBACK_PLATFORM: &str = "fallback";

/// Per-platform data: how to recognise the platform and where to send it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformDefinition {
    /// Proper name of the app on this platform
    pub name: Option<String>,

    /// Case-insensitive regex the user-agent must match (table mode)
    #[serde(rename = "match")]
    pub match_rule: Option<String>,

    /// Case-insensitive regex the user-agent must not match (table mode)
    pub not_match: Option<String>,

    /// Name of the handoff router to use (table mode)
    pub router: Option<String>,

    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub app_url: String,

    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub intent_url: String,

    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub store_url: String,

    /// Web fallback, only meaningful on the `fallback` entry
    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub fallback_url: String,

    #[serde(deserialize_with = "deserialize_flag")]
    pub supports_qs: bool,

    #[serde(deserialize_with = "deserialize_flag")]
    pub supports_path: bool,

    #[serde(deserialize_with = "deserialize_flag")]
    pub supports_store_qs: bool,

    #[serde(deserialize_with = "deserialize_pattern_list")]
    pub path_whitelist: Vec<String>,

    /// Label of the store badge shown when the redirect does not happen
    pub store_text: Option<String>,

    /// Image of the store badge
    pub badge_url: Option<String>,
}

impl PlatformDefinition {
    pub fn match_rule(&self) -> Option<&str> {
        self.match_rule.as_deref().filter(|rule| !rule.is_empty())
    }

    pub fn not_match_rule(&self) -> Option<&str> {
        self.not_match.as_deref().filter(|rule| !rule.is_empty())
    }

    pub fn router(&self) -> Option<&str> {
        self.router.as_deref().filter(|router| !router.is_empty())
    }
}

/// Everything the server hands to the page for one app link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppLinkConfig {
    /// Platform data keyed by identifier, in precedence order
    #[serde(alias = "platform_data")]
    pub platforms: IndexMap<String, PlatformDefinition>,

    /// Where to go when nothing better applies
    #[serde(alias = "web_url", deserialize_with = "deserialize_nullable_string")]
    pub fallback_url: String,

    pub canonical_url: Option<String>,

    /// Inline scripts the page runs before dispatch, in order
    pub scripts: Vec<String>,

    /// Meta tags for the hosting page; carried, not interpreted
    pub metatags: serde_json::Value,

    pub timings: HandoffTimings,
}

impl AppLinkConfig {
    pub fn new(fallback_url: impl Into<String>) -> Self {
        Self {
            fallback_url: fallback_url.into(),
            ..Self::default()
        }
    }

    /// Add a platform, keeping insertion order as precedence order
    pub fn with_platform(mut self, id: impl Into<String>, platform: PlatformDefinition) -> Self {
        self.platforms.insert(id.into(), platform);
        self
    }

    /// Parse and validate a configuration document
    pub fn from_json(json: &str) -> AppLinkResult<Self> {
        let config: AppLinkConfig = serde_json::from_str(json)?;
        config.validate()?;
        if config.effective_fallback_url().is_empty() {
            console_warn!("App link configuration has no fallback URL");
        }
        Ok(config)
    }

    pub fn validate(&self) -> AppLinkResult<()> {
        self.timings.validate()
    }

    /// Look a platform up by bare identifier or by its prefixed form
    pub fn platform(&self, id: &str) -> Option<&PlatformDefinition> {
        self.platforms
            .get(id)
            .or_else(|| self.platforms.get(&format!("{PLATFORM_KEY_PREFIX}{id}")))
    }

    pub fn fallback_platform(&self) -> Option<&PlatformDefinition> {
        self.platform(FALLBACK_PLATFORM)
    }

    /// Top-level fallback URL, else the one carried by the fallback entry
    pub fn effective_fallback_url(&self) -> &str {
        if !self.fallback_url.is_empty() {
            return &self.fallback_url;
        }
        self.fallback_platform()
            .map(|platform| platform.fallback_url.as_str())
            .unwrap_or_default()
    }

    /// Table mode applies when any platform carries its own match rule
    pub fn uses_match_rules(&self) -> bool {
        self.platforms
            .values()
            .any(|platform| platform.match_rule().is_some())
    }
}
