//! Handoff timing configuration
//!
//! Every delay the handoff strategies arm, in one place. The defaults are the
//! values browsers were tuned against; a page may override them through the
//! `timings` key of the configuration.

use serde::{Deserialize, Serialize};

use crate::services::errors::{AppLinkError, AppLinkResult};

/// Delays used by the handoff strategies and the fallback monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandoffTimings {
    /// iOS: fallback check after the iframe was injected
    pub ios_fallback_delay_ms: u32,

    /// Android: visibility heartbeat period
    pub android_heartbeat_ms: u32,

    /// Android Firefox: delay before retrying with an iframe
    pub firefox_iframe_retry_ms: u32,

    /// Android Firefox: delay before the hard fallback
    pub firefox_fallback_ms: u32,

    /// Windows Phone: delay before the fallback check
    pub windows_phone_check_ms: u32,

    /// Windows Phone: a check firing later than this after the attempt
    /// started is treated as spurious
    pub windows_phone_window_ms: u32,

    /// Fallback monitor: time to wait for the page to be hidden
    pub monitor_timeout_ms: u32,

    /// Fallback monitor: visibility poll period
    pub monitor_poll_ms: u32,
}

impl Default for HandoffTimings {
    fn default() -> Self {
        Self {
            ios_fallback_delay_ms: 25,
            android_heartbeat_ms: 200,
            firefox_iframe_retry_ms: 1500,
            firefox_fallback_ms: 2500,
            windows_phone_check_ms: 2500,
            windows_phone_window_ms: 3000,
            monitor_timeout_ms: 2000,
            monitor_poll_ms: 100,
        }
    }
}

impl HandoffTimings {
    pub fn validate(&self) -> AppLinkResult<()> {
        let periods = [
            ("android_heartbeat_ms", self.android_heartbeat_ms),
            ("monitor_poll_ms", self.monitor_poll_ms),
        ];
        for (field, value) in periods {
            if value == 0 {
                return Err(invalid(field, value));
            }
        }

        if self.windows_phone_check_ms >= self.windows_phone_window_ms {
            return Err(invalid("windows_phone_check_ms", self.windows_phone_check_ms));
        }

        if self.firefox_iframe_retry_ms >= self.firefox_fallback_ms {
            return Err(invalid("firefox_iframe_retry_ms", self.firefox_iframe_retry_ms));
        }

        Ok(())
    }
}

fn invalid(field: &str, value: u32) -> AppLinkError {
    AppLinkError::InvalidTimings {
        field: field.to_string(),
        value: value.to_string(),
    }
}
