//! Android handoff, one strategy per browser engine.
//!
//! All three arm a visibility heartbeat: once the page is hidden the app has
//! taken over and every pending timer is cleared.

use crate::handoff::attempt::{Attempt, Resolution};
use crate::handoff::strategy_trait::HandoffStrategy;
use crate::routing::builder::ResolvedUrls;
use crate::services::config::HandoffTimings;
use crate::services::host::IframeStyle;

fn arm_heartbeat(attempt: &Attempt, timings: &HandoffTimings) {
    attempt.set_interval(timings.android_heartbeat_ms, |attempt| {
        if attempt.host().is_hidden() {
            attempt.resolve(Resolution::Handoff);
        }
    });
}

/// 1px borderless iframe; load or error means the app did not take the URL
fn inject_pixel_iframe(attempt: &Attempt, url: &str) {
    attempt.inject_iframe(url, IframeStyle::Pixel, |attempt| {
        attempt.check_fallback();
    });
}

/// Chrome resolves `intent://` URLs itself, including the store fallback
/// carried in the intent payload
#[derive(Debug, Default, Clone, Copy)]
pub struct AndroidIntentStrategy;

impl HandoffStrategy for AndroidIntentStrategy {
    fn name(&self) -> &'static str {
        "android_intent"
    }

    fn handoff_url<'a>(&self, urls: &'a ResolvedUrls) -> &'a str {
        &urls.intent_url
    }

    fn handoff(&self, attempt: &Attempt, url: &str, timings: &HandoffTimings) {
        arm_heartbeat(attempt, timings);
        attempt.launch(url);
    }
}

/// Firefox: navigate straight to the app URL, retry through an iframe, then
/// fall back
#[derive(Debug, Default, Clone, Copy)]
pub struct AndroidDirectStrategy;

impl HandoffStrategy for AndroidDirectStrategy {
    fn name(&self) -> &'static str {
        "android_direct"
    }

    fn handoff(&self, attempt: &Attempt, url: &str, timings: &HandoffTimings) {
        arm_heartbeat(attempt, timings);

        let retry_url = url.to_string();
        attempt.set_timeout(timings.firefox_iframe_retry_ms, move |attempt| {
            inject_pixel_iframe(attempt, &retry_url);
        });
        attempt.set_timeout(timings.firefox_fallback_ms, |attempt| {
            attempt.check_fallback();
        });

        attempt.launch(url);
    }
}

/// Other engines: the hidden iframe trick
#[derive(Debug, Default, Clone, Copy)]
pub struct AndroidIframeStrategy;

impl HandoffStrategy for AndroidIframeStrategy {
    fn name(&self) -> &'static str {
        "android_iframe"
    }

    fn handoff(&self, attempt: &Attempt, url: &str, timings: &HandoffTimings) {
        arm_heartbeat(attempt, timings);
        inject_pixel_iframe(attempt, url);
    }
}
