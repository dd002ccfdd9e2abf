//! Desktop handoff: direct navigation watched by the fallback monitor

use crate::handoff::attempt::{Attempt, Resolution};
use crate::handoff::monitor::FallbackMonitor;
use crate::handoff::strategy_trait::HandoffStrategy;
use crate::services::config::HandoffTimings;

#[derive(Debug, Default, Clone, Copy)]
pub struct MonitoredDirectStrategy;

impl HandoffStrategy for MonitoredDirectStrategy {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn handoff(&self, attempt: &Attempt, url: &str, timings: &HandoffTimings) {
        let (failed, opened) = (attempt.clone(), attempt.clone());
        FallbackMonitor::arm(
            attempt.shared_host(),
            timings.monitor_timeout_ms,
            timings.monitor_poll_ms,
            move || {
                failed.resolve(Resolution::Fallback);
            },
            move || {
                opened.resolve(Resolution::HandoffAndClose);
            },
        );
        attempt.launch(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handoff::attempt::HandoffState;
    use crate::handoff::strategies::testing::{begin, FALLBACK};
    use crate::services::host::simulated::{SimulatedPage, MAC_DESKTOP};
    use std::rc::Rc;

    #[test]
    fn test_timeout_falls_back_without_closing() {
        let page = Rc::new(SimulatedPage::new(MAC_DESKTOP));
        let attempt = begin(&page);
        MonitoredDirectStrategy.handoff(&attempt, "myapp://", &HandoffTimings::default());

        assert_eq!(page.navigations(), vec!["myapp://"]);
        page.advance(5000);
        assert_eq!(page.navigations(), vec!["myapp://", FALLBACK]);
        assert!(!page.closed());
        assert_eq!(attempt.state(), HandoffState::Failed);
    }

    #[test]
    fn test_hidden_page_closes_the_window() {
        let page = Rc::new(SimulatedPage::new(MAC_DESKTOP));
        let attempt = begin(&page);
        MonitoredDirectStrategy.handoff(&attempt, "myapp://", &HandoffTimings::default());

        page.hide_at(250);
        page.advance(5000);
        assert!(page.closed());
        assert_eq!(page.navigations(), vec!["myapp://"]);
        assert_eq!(attempt.state(), HandoffState::Succeeded);
        assert_eq!(page.pending_timers(), 0);
    }
}
