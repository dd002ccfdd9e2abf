//! Platform classification
//!
//! Two modes feed the dispatcher:
//! - the built-in classifier, a fixed precedence list of user-agent markers;
//! - table mode, where each configured platform carries its own
//!   `match`/`not_match` expressions and configuration order is precedence.

use std::fmt;

use regex::RegexBuilder;

use crate::services::config::AppLinkConfig;
use crate::services::config::PlatformDefinition;
use crate::services::errors::{AppLinkError, AppLinkResult};

/// Platforms the built-in classifier knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    WindowsPhone,
    KindleFire,
    Android,
    Iphone,
    Ipad,
    WindowsDesktop,
    MacDesktop,
}

/// Handoff families; platforms of a family share a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFamily {
    Ios,
    Android,
    WindowsPhone,
    Desktop,
}

impl Platform {
    /// Configuration identifier of this platform
    pub fn key(&self) -> &'static str {
        match self {
            Platform::WindowsPhone => "windows_phone",
            Platform::KindleFire => "kindle_fire",
            Platform::Android => "android",
            Platform::Iphone => "iphone",
            Platform::Ipad => "ipad",
            Platform::WindowsDesktop => "windows_desktop",
            Platform::MacDesktop => "mac_desktop",
        }
    }

    pub fn family(&self) -> PlatformFamily {
        match self {
            Platform::Iphone | Platform::Ipad => PlatformFamily::Ios,
            Platform::Android | Platform::KindleFire => PlatformFamily::Android,
            Platform::WindowsPhone => PlatformFamily::WindowsPhone,
            Platform::WindowsDesktop | Platform::MacDesktop => PlatformFamily::Desktop,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlatformFamily::Ios => "ios",
            PlatformFamily::Android => "android",
            PlatformFamily::WindowsPhone => "windows_phone",
            PlatformFamily::Desktop => "desktop",
        })
    }
}

/// Operating system version as `major.minor`.
///
/// Compared component-wise, so Mac OS X 10.10 sorts after 10.6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
}

impl OsVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

const MIN_WINDOWS_DESKTOP: OsVersion = OsVersion::new(6, 2);
const MIN_MAC_DESKTOP: OsVersion = OsVersion::new(10, 6);

/// Read `x.y` / `x_y` right after `marker`
fn version_after(user_agent: &str, marker: &str) -> Option<OsVersion> {
    let start = user_agent.find(marker)? + marker.len();
    let token: String = user_agent[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '_')
        .map(|c| if c == '_' { '.' } else { c })
        .collect();
    let mut parts = token.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts
        .next()
        .and_then(|minor| minor.parse().ok())
        .unwrap_or(0);
    Some(OsVersion::new(major, minor))
}

/// Extract the OS version from a `Windows NT x.y`, `OS X x_y` or `OS x_y`
/// token; zero when there is none.
pub fn derive_os_version(user_agent: &str) -> OsVersion {
    ["Windows NT ", "OS X ", " OS "]
        .iter()
        .find_map(|marker| version_after(user_agent, marker))
        .unwrap_or_default()
}

/// Classify a user-agent; first matching rule wins
pub fn classify(user_agent: &str) -> Option<Platform> {
    let ua = user_agent;
    if ua.contains("Windows Phone") {
        Some(Platform::WindowsPhone)
    } else if ua.contains("Kindle") || ua.contains("Silk") {
        Some(Platform::KindleFire)
    } else if ua.contains("Android") {
        Some(Platform::Android)
    } else if ua.contains("iPhone") || ua.contains("iPod") {
        Some(Platform::Iphone)
    } else if ua.contains("iPad") {
        Some(Platform::Ipad)
    } else if ua.contains("Windows NT") && derive_os_version(ua) >= MIN_WINDOWS_DESKTOP {
        Some(Platform::WindowsDesktop)
    } else if ua.contains("OS X") && derive_os_version(ua) >= MIN_MAC_DESKTOP {
        Some(Platform::MacDesktop)
    } else {
        None
    }
}

fn ua_matches(pattern: &str, user_agent: &str) -> AppLinkResult<bool> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| AppLinkError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
    Ok(regex.is_match(user_agent))
}

/// Whether one configured platform accepts this user-agent.
///
/// A platform without a `match` rule never participates in table mode.
pub fn definition_accepts(platform: &PlatformDefinition, user_agent: &str) -> AppLinkResult<bool> {
    let Some(rule) = platform.match_rule() else {
        return Ok(false);
    };
    if !ua_matches(rule, user_agent)? {
        return Ok(false);
    }
    match platform.not_match_rule() {
        Some(rule) => Ok(!ua_matches(rule, user_agent)?),
        None => Ok(true),
    }
}

/// Table mode: first configured platform accepting the user-agent
pub fn match_definition<'a>(
    config: &'a AppLinkConfig,
    user_agent: &str,
) -> AppLinkResult<Option<(&'a str, &'a PlatformDefinition)>> {
    for (id, platform) in &config.platforms {
        if definition_accepts(platform, user_agent)? {
            return Ok(Some((id.as_str(), platform)));
        }
    }
    Ok(None)
}
