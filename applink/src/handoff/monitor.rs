//! Fallback/visibility monitor
//!
//! Arms a failure timer and polls the page visibility. Whichever comes first
//! wins: the timer runs `on_fail`, a hidden page cancels the timer and runs
//! `on_hidden`. Once cancelled, neither callback runs.

use std::cell::Cell;
use std::rc::Rc;

use crate::console_debug;
use crate::services::host::{PageHost, TimerHandle};

struct MonitorInner {
    host: Rc<dyn PageHost>,
    cancelled: Cell<bool>,
    timeout: Cell<Option<TimerHandle>>,
    poll: Cell<Option<TimerHandle>>,
}

impl MonitorInner {
    fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        for handle in [self.timeout.take(), self.poll.take()].into_iter().flatten() {
            self.host.clear_timer(handle);
        }
    }
}

#[derive(Clone)]
pub struct FallbackMonitor {
    inner: Rc<MonitorInner>,
}

impl FallbackMonitor {
    pub fn arm<F, H>(host: Rc<dyn PageHost>, timeout_ms: u32, poll_ms: u32, on_fail: F, on_hidden: H) -> Self
    where
        F: FnOnce() + 'static,
        H: FnOnce() + 'static,
    {
        let inner = Rc::new(MonitorInner {
            host: Rc::clone(&host),
            cancelled: Cell::new(false),
            timeout: Cell::new(None),
            poll: Cell::new(None),
        });

        let expired = Rc::clone(&inner);
        let timeout = host.set_timeout(
            timeout_ms,
            Box::new(move || {
                if expired.cancelled.get() {
                    return;
                }
                console_debug!("[FallbackMonitor] Timed out with the page still visible");
                expired.cancel();
                on_fail();
            }),
        );
        inner.timeout.set(Some(timeout));

        let watcher = Rc::clone(&inner);
        let mut on_hidden = Some(on_hidden);
        let poll = host.set_interval(
            poll_ms,
            Box::new(move || {
                if watcher.cancelled.get() || !watcher.host.is_hidden() {
                    return;
                }
                console_debug!("[FallbackMonitor] Page hidden");
                watcher.cancel();
                if let Some(on_hidden) = on_hidden.take() {
                    on_hidden();
                }
            }),
        );
        inner.poll.set(Some(poll));

        Self { inner }
    }

    /// Stop both timers. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancel();
    }
}
