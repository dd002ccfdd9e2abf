//! Path whitelist
//!
//! A `path` forwarded from the query string into an app URL is caller
//! controlled; the whitelist keeps it to the paths the app expects.

use regex::Regex;

use crate::services::errors::{AppLinkError, AppLinkResult};

/// Compile one whitelist pattern, dropping carriage returns left over from
/// Windows line endings in the configuration textarea
pub(crate) fn compile_pattern(pattern: &str) -> AppLinkResult<Regex> {
    let cleaned = pattern.replace('\r', "");
    Regex::new(&cleaned).map_err(|source| AppLinkError::InvalidPattern {
        pattern: cleaned,
        source,
    })
}

/// Check `path` against a list of regular expressions.
///
/// An empty path is never accepted; an empty whitelist accepts everything.
/// Otherwise the first matching pattern accepts the path. A pattern that
/// fails to compile is a configuration bug and is returned as an error.
pub fn is_path_whitelisted<S: AsRef<str>>(path: &str, whitelist: &[S]) -> AppLinkResult<bool> {
    if path.is_empty() {
        return Ok(false);
    }

    if whitelist.is_empty() {
        return Ok(true);
    }

    for pattern in whitelist {
        if compile_pattern(pattern.as_ref())?.is_match(path) {
            return Ok(true);
        }
    }

    Ok(false)
}
