//! Query-string and URL composition helpers
//!
//! Templates are app schemes (`myapp://`), intents
//! (`intent://host/#Intent;...;end`) and store links, so URLs are handled as
//! strings split into origin, path, search and hash rather than normalised
//! through a WHATWG parser: whatever the template says is kept verbatim.

use std::collections::HashMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Optional overrides applied by [`compose_url`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// Path appended to the existing path
    pub pathname: Option<&'a str>,
    /// Query string merged into the existing one
    pub search: Option<&'a str>,
    /// Fragment replacing the existing one
    pub hash: Option<&'a str>,
}

impl<'a> UrlParts<'a> {
    pub fn pathname(pathname: &'a str) -> Self {
        Self {
            pathname: Some(pathname),
            ..Self::default()
        }
    }

    pub fn search(search: &'a str) -> Self {
        Self {
            search: Some(search),
            ..Self::default()
        }
    }

    pub fn hash(hash: &'a str) -> Self {
        Self {
            hash: Some(hash),
            ..Self::default()
        }
    }
}

/// A URL cut at its structural separators. `origin` keeps `scheme://authority`
/// (or `scheme:` for opaque URLs), `search` and `hash` exclude `?` and `#`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SplitUrl {
    pub origin: String,
    pub path: String,
    pub search: String,
    pub hash: String,
}

impl SplitUrl {
    pub(crate) fn parse(url: &str) -> Self {
        let (rest, hash) = match url.split_once('#') {
            Some((rest, hash)) => (rest, hash),
            None => (url, ""),
        };
        let (rest, search) = match rest.split_once('?') {
            Some((rest, search)) => (rest, search),
            None => (rest, ""),
        };

        let (origin, path) = if let Some(scheme_end) = rest.find("://") {
            let authority_start = scheme_end + 3;
            let authority_end = rest[authority_start..]
                .find('/')
                .map_or(rest.len(), |offset| authority_start + offset);
            rest.split_at(authority_end)
        } else {
            match rest.find(':') {
                Some(colon) if !rest[..colon].contains('/') => rest.split_at(colon + 1),
                _ => ("", rest),
            }
        };

        Self {
            origin: origin.to_string(),
            path: path.to_string(),
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    /// The `scheme://` prefix when the URL has an authority
    pub(crate) fn scheme_prefix(&self) -> Option<&str> {
        self.origin
            .find("://")
            .map(|scheme_end| &self.origin[..scheme_end + 3])
    }
}

impl std::fmt::Display for SplitUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.origin, self.path)?;
        if !self.search.is_empty() {
            write!(f, "?{}", self.search)?;
        }
        if !self.hash.is_empty() {
            write!(f, "#{}", self.hash)?;
        }
        Ok(())
    }
}

/// Parse a query string into key/value pairs.
///
/// Pairs split on `&` and `;`, `+` reads as a space, keys and values are
/// percent-decoded independently. Later duplicates win. Leading `=` signs
/// are skipped, so `=orphan` is the key `orphan` with an empty value.
pub fn parse_query_params(search: &str) -> HashMap<String, String> {
    let query = search.strip_prefix('?').unwrap_or(search).replace('+', " ");
    query
        .split(['&', ';'])
        .filter_map(|pair| {
            let pair = pair.trim_start_matches('=');
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key.is_empty() {
                return None;
            }
            Some((decode(key), decode(value)))
        })
        .collect()
}

fn decode(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().into_owned()
}

/// `encodeURIComponent`
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Apply path, query-string and fragment overrides to `url`.
///
/// Components that are not overridden are preserved. An empty `url` is
/// returned as-is. Query strings are joined literally: merging the same
/// search twice repeats its parameters.
pub fn compose_url(url: &str, parts: UrlParts<'_>) -> String {
    if url.is_empty() {
        return String::new();
    }

    let mut split = SplitUrl::parse(url);

    if let Some(pathname) = parts.pathname {
        if !split.origin.is_empty() && !split.origin.ends_with('/') {
            split.origin.push('/');
        }
        split.path = format!(
            "{}{}",
            split.path.trim_start_matches('/'),
            pathname.trim_start_matches('/')
        );
    }

    if let Some(search) = parts.search {
        let search = search.strip_prefix('?').unwrap_or(search);
        if !search.is_empty() {
            split.search = if split.search.is_empty() {
                search.to_string()
            } else {
                format!("{}&{}", split.search, search)
            };
        }
    }

    if let Some(hash) = parts.hash {
        split.hash = hash.strip_prefix('#').unwrap_or(hash).to_string();
    }

    split.to_string()
}

/// Pass the document referrer through as a `referrer` query parameter,
/// unless there is none or the URL already carries one.
pub fn apply_referrer(url: &str, referrer: &str) -> String {
    if url.is_empty() || referrer.is_empty() || url.contains("referrer") {
        return url.to_string();
    }
    let search = format!("referrer={}", encode_uri_component(referrer));
    compose_url(url, UrlParts::search(&search))
}
