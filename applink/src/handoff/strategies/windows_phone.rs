//! Windows Phone handoff

use crate::handoff::attempt::{Attempt, Resolution};
use crate::handoff::strategy_trait::HandoffStrategy;
use crate::services::config::HandoffTimings;

/// Navigate directly to the app URL and check back later. A check that
/// fires after the window has passed means the page was suspended while the
/// app ran, so it is not treated as a failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsPhoneStrategy;

impl HandoffStrategy for WindowsPhoneStrategy {
    fn name(&self) -> &'static str {
        "windows_phone"
    }

    fn handoff(&self, attempt: &Attempt, url: &str, timings: &HandoffTimings) {
        let window_ms = f64::from(timings.windows_phone_window_ms);
        attempt.set_timeout(timings.windows_phone_check_ms, move |attempt| {
            if attempt.elapsed_ms() < window_ms {
                attempt.resolve(Resolution::Fallback);
            } else {
                attempt.resolve(Resolution::Handoff);
            }
        });
        attempt.launch(url);
    }
}
