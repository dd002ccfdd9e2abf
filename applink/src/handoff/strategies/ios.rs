//! iOS handoff: hidden iframe plus a short fallback check

use crate::handoff::attempt::{Attempt, Resolution};
use crate::handoff::strategy_trait::HandoffStrategy;
use crate::services::config::HandoffTimings;
use crate::services::host::IframeStyle;

/// Newer iOS versions complain about direct navigation to an unknown scheme,
/// so the app URL is loaded in an off-screen iframe instead
#[derive(Debug, Default, Clone, Copy)]
pub struct IosIframeStrategy;

impl HandoffStrategy for IosIframeStrategy {
    fn name(&self) -> &'static str {
        "ios_iframe"
    }

    fn handoff(&self, attempt: &Attempt, url: &str, timings: &HandoffTimings) {
        attempt.set_timeout(timings.ios_fallback_delay_ms, |attempt| {
            attempt.check_fallback();
        });
        attempt.inject_iframe(url, IframeStyle::Offscreen, |attempt| {
            attempt.resolve(Resolution::Handoff);
        });
    }
}
