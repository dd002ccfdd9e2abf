//! Destination URL builder
//!
//! Turns the raw templates of a [`PlatformDefinition`] into the URLs a
//! handoff attempt uses, passing the page's `path`, query string and
//! referrer through according to the platform's capability flags.

use crate::routing::query::{apply_referrer, compose_url, parse_query_params, SplitUrl, UrlParts};
use crate::routing::whitelist::is_path_whitelisted;
use crate::services::config::PlatformDefinition;
use crate::services::errors::AppLinkResult;
use crate::services::host::RedirectContext;

/// URLs resolved for one redirect attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedUrls {
    /// Deep link into the app, empty when the platform has none
    pub app_url: String,
    /// Android intent, empty when the platform has none
    pub intent_url: String,
    /// Store URL when the platform has one, else the caller fallback
    pub fallback_url: String,
}

impl ResolvedUrls {
    pub fn resolve(
        platform: &PlatformDefinition,
        ctx: &RedirectContext,
        default_fallback: &str,
    ) -> AppLinkResult<Self> {
        let store_url = build_store_url(platform, ctx);
        let fallback_url = if store_url.is_empty() {
            default_fallback.to_string()
        } else {
            store_url
        };

        Ok(Self {
            app_url: build_app_url(platform, ctx)?,
            intent_url: build_intent_url(platform, ctx)?,
            fallback_url,
        })
    }

    /// Nothing to attempt: every destination is the fallback
    pub fn fallback_only(fallback_url: impl Into<String>) -> Self {
        Self {
            fallback_url: fallback_url.into(),
            ..Self::default()
        }
    }
}

/// The `path` query parameter, when the platform forwards paths and the
/// whitelist accepts it
fn forwarded_path(platform: &PlatformDefinition, ctx: &RedirectContext) -> AppLinkResult<Option<String>> {
    if !platform.supports_path {
        return Ok(None);
    }
    let path = parse_query_params(&ctx.search)
        .remove("path")
        .unwrap_or_default();
    if is_path_whitelisted(&path, &platform.path_whitelist)? {
        Ok(Some(path))
    } else {
        Ok(None)
    }
}

/// Merge the page query string and pass the referrer through
fn pass_through_query(url: String, platform: &PlatformDefinition, ctx: &RedirectContext) -> String {
    if url.is_empty() || !platform.supports_qs {
        return url;
    }
    let url = compose_url(&url, UrlParts::search(&ctx.search));
    apply_referrer(&url, &ctx.referrer)
}

pub fn build_app_url(platform: &PlatformDefinition, ctx: &RedirectContext) -> AppLinkResult<String> {
    let mut url = platform.app_url.clone();
    if url.is_empty() {
        return Ok(url);
    }
    if let Some(path) = forwarded_path(platform, ctx)? {
        url = compose_url(&url, UrlParts::pathname(&path));
    }
    Ok(pass_through_query(url, platform, ctx))
}

/// Put `path` where the intent's host/path segment was, keeping the scheme,
/// any query string and the `#Intent;...;end` payload verbatim
fn substitute_intent_path(intent_url: &str, path: &str) -> String {
    let split = SplitUrl::parse(intent_url);
    match split.scheme_prefix() {
        Some(prefix) => SplitUrl {
            origin: prefix.to_string(),
            path: path.trim_start_matches('/').to_string(),
            search: split.search.clone(),
            hash: split.hash.clone(),
        }
        .to_string(),
        None => compose_url(intent_url, UrlParts::pathname(path)),
    }
}

pub fn build_intent_url(platform: &PlatformDefinition, ctx: &RedirectContext) -> AppLinkResult<String> {
    let mut url = platform.intent_url.clone();
    if url.is_empty() {
        return Ok(url);
    }
    if let Some(path) = forwarded_path(platform, ctx)? {
        url = substitute_intent_path(&url, &path);
    }
    Ok(pass_through_query(url, platform, ctx))
}

/// Store URL; the query string passes through with `supports_store_qs`,
/// the referrer never does
pub fn build_store_url(platform: &PlatformDefinition, ctx: &RedirectContext) -> String {
    let url = &platform.store_url;
    if url.is_empty() || !platform.supports_store_qs {
        return url.clone();
    }
    compose_url(url, UrlParts::search(&ctx.search))
}
