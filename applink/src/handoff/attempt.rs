//! Per-attempt handoff state machine
//!
//! `Init -> Attempting -> {Succeeded, Failed}`. Every timer, interval and
//! iframe callback a strategy arms goes through the [`Attempt`], which drops
//! the callback once the attempt has resolved and clears all of them on the
//! single authoritative [`Attempt::resolve`] transition.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::handoff::navigate_to_fallback;
use crate::services::host::{IframeStyle, PageHost, TimerHandle};
use crate::{console_debug, console_info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffState {
    Init,
    Attempting,
    Succeeded,
    Failed,
}

/// How an attempt ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The app took over; nothing else to do
    Handoff,
    /// The app took over; close the tab left behind
    HandoffAndClose,
    /// The app did not open; navigate to the fallback URL
    Fallback,
}

struct AttemptInner {
    host: Rc<dyn PageHost>,
    fallback_url: String,
    state: Cell<HandoffState>,
    timers: RefCell<Vec<TimerHandle>>,
    started_at: Cell<f64>,
}

/// One redirect attempt. Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct Attempt {
    inner: Rc<AttemptInner>,
}

impl Attempt {
    pub fn new(host: Rc<dyn PageHost>, fallback_url: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(AttemptInner {
                host,
                fallback_url: fallback_url.into(),
                state: Cell::new(HandoffState::Init),
                timers: RefCell::new(Vec::new()),
                started_at: Cell::new(0.0),
            }),
        }
    }

    /// `Init -> Attempting`; later calls are ignored
    pub fn begin(&self) {
        if self.inner.state.get() == HandoffState::Init {
            self.inner.started_at.set(self.inner.host.now_ms());
            self.inner.state.set(HandoffState::Attempting);
        }
    }

    pub fn state(&self) -> HandoffState {
        self.inner.state.get()
    }

    pub fn is_attempting(&self) -> bool {
        self.state() == HandoffState::Attempting
    }

    pub fn host(&self) -> &dyn PageHost {
        self.inner.host.as_ref()
    }

    pub(crate) fn shared_host(&self) -> Rc<dyn PageHost> {
        Rc::clone(&self.inner.host)
    }

    pub fn fallback_url(&self) -> &str {
        &self.inner.fallback_url
    }

    /// Milliseconds since `begin`
    pub fn elapsed_ms(&self) -> f64 {
        self.inner.host.now_ms() - self.inner.started_at.get()
    }

    /// Navigate towards the app. Not a terminal action.
    pub fn launch(&self, url: &str) {
        if self.is_attempting() {
            console_debug!("[Handoff] Launching {}", url);
            self.inner.host.navigate(url);
        }
    }

    pub fn set_timeout<F>(&self, delay_ms: u32, callback: F)
    where
        F: FnOnce(&Attempt) + 'static,
    {
        if !self.is_attempting() {
            return;
        }
        let attempt = self.clone();
        let handle = self.inner.host.set_timeout(
            delay_ms,
            Box::new(move || {
                if attempt.is_attempting() {
                    callback(&attempt);
                }
            }),
        );
        self.track(handle);
    }

    pub fn set_interval<F>(&self, period_ms: u32, mut callback: F)
    where
        F: FnMut(&Attempt) + 'static,
    {
        if !self.is_attempting() {
            return;
        }
        let attempt = self.clone();
        let handle = self.inner.host.set_interval(
            period_ms,
            Box::new(move || {
                if attempt.is_attempting() {
                    callback(&attempt);
                }
            }),
        );
        self.track(handle);
    }

    /// Point an injected iframe at `url`; `on_settle` runs on load or error
    /// unless the attempt resolved first
    pub fn inject_iframe<F>(&self, url: &str, style: IframeStyle, on_settle: F)
    where
        F: FnOnce(&Attempt) + 'static,
    {
        if !self.is_attempting() {
            return;
        }
        let attempt = self.clone();
        self.inner.host.inject_iframe(
            url,
            style,
            Box::new(move || {
                if attempt.is_attempting() {
                    on_settle(&attempt);
                }
            }),
        );
    }

    fn track(&self, handle: TimerHandle) {
        self.inner.timers.borrow_mut().push(handle);
    }

    /// The single terminal transition. Clears every timer armed through
    /// this attempt, then performs at most one terminal action. Returns
    /// false when the attempt was not in flight.
    pub fn resolve(&self, resolution: Resolution) -> bool {
        if !self.is_attempting() {
            return false;
        }
        let state = match resolution {
            Resolution::Handoff | Resolution::HandoffAndClose => HandoffState::Succeeded,
            Resolution::Fallback => HandoffState::Failed,
        };
        self.inner.state.set(state);

        let timers: Vec<TimerHandle> = self.inner.timers.borrow_mut().drain(..).collect();
        for handle in timers {
            self.inner.host.clear_timer(handle);
        }

        match resolution {
            Resolution::Handoff => {
                console_info!("[Handoff] App opened after {}ms", self.elapsed_ms());
            }
            Resolution::HandoffAndClose => {
                console_info!("[Handoff] App opened, closing the page");
                self.inner.host.close_window();
            }
            Resolution::Fallback => {
                console_info!("[Handoff] App did not open, falling back to {}", self.inner.fallback_url);
                navigate_to_fallback(self.inner.host.as_ref(), &self.inner.fallback_url);
            }
        }
        true
    }

    /// Fallback unless the page already went to the background
    pub fn check_fallback(&self) -> bool {
        if self.inner.host.is_hidden() {
            self.resolve(Resolution::Handoff)
        } else {
            self.resolve(Resolution::Fallback)
        }
    }

    #[cfg(test)]
    pub(crate) fn armed_timers(&self) -> usize {
        self.inner.timers.borrow().len()
    }
}

impl std::fmt::Debug for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attempt")
            .field("state", &self.state())
            .field("fallback_url", &self.inner.fallback_url)
            .finish()
    }
}
