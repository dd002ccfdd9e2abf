//! Browser Engine Detection
//!
//! Android handoffs behave differently per browser engine: Chrome resolves
//! `intent://` URLs itself, Firefox tolerates a direct scheme navigation
//! followed by timers, and everything else only copes with the hidden iframe
//! trick. The engine is sniffed once per redirect attempt and then used as a
//! lookup key, never re-tested inline.

use std::fmt;

/// Browser engine family relevant to the handoff strategy choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineHint {
    /// Chrome and Chromium derivatives (anything announcing `Chrome`)
    Chrome,
    /// Firefox / Gecko
    Firefox,
    /// Stock Android browser, Safari, and everything else
    Other,
}

impl EngineHint {
    /// Every engine, in lookup-table order
    pub const ALL: [EngineHint; 3] = [EngineHint::Chrome, EngineHint::Firefox, EngineHint::Other];

    /// Sniff the engine from a user-agent string.
    ///
    /// Chrome is checked first: Chromium-based browsers carry both `Chrome`
    /// and `Safari` tokens.
    pub fn detect(user_agent: &str) -> Self {
        if user_agent.contains("Chrome") {
            EngineHint::Chrome
        } else if user_agent.contains("Firefox") {
            EngineHint::Firefox
        } else {
            EngineHint::Other
        }
    }

    /// Get the display name of the engine
    pub fn name(&self) -> &'static str {
        match self {
            EngineHint::Chrome => "Chrome",
            EngineHint::Firefox => "Firefox",
            EngineHint::Other => "Other",
        }
    }
}

impl fmt::Display for EngineHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANDROID_STOCK: &str = "Mozilla/5.0 (Linux; U; Android 4.0.3; ko-kr; LG-L160L Build/IML74K) AppleWebkit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 4.0.4; Galaxy Nexus Build/IMM76B) AppleWebKit/535.19 (KHTML, like Gecko) Chrome/18.0.1025.133 Mobile Safari/535.19";
    const ANDROID_FIREFOX: &str = "Mozilla/5.0 (Android 4.4; Mobile; rv:41.0) Gecko/41.0 Firefox/41.0";

    #[test]
    fn test_engine_detection() {
        assert_eq!(EngineHint::detect(ANDROID_CHROME), EngineHint::Chrome);
        assert_eq!(EngineHint::detect(ANDROID_FIREFOX), EngineHint::Firefox);
        assert_eq!(EngineHint::detect(ANDROID_STOCK), EngineHint::Other);
        assert_eq!(EngineHint::detect(""), EngineHint::Other);
    }

    #[test]
    fn test_engine_name() {
        assert_eq!(EngineHint::Chrome.name(), "Chrome");
        assert_eq!(EngineHint::Firefox.to_string(), "Firefox");
        assert_eq!(EngineHint::Other.name(), "Other");
    }
}
