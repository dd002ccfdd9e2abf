//! Simulated page with a virtual clock, used by the unit tests.
//!
//! Timers only run when the test advances the clock, so every race between
//! timers, iframe events and visibility changes can be replayed exactly.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{Callback, IframeStyle, PageHost, RepeatCallback, TimerHandle, TimerKind};

pub(crate) const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 6_0 like Mac OS X) AppleWebKit/536.26 (KHTML, like Gecko) Version/6.0 Mobile/10A5376e Safari/8536.25";
pub(crate) const IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 6_0 like Mac OS X) AppleWebKit/536.26 (KHTML, like Gecko) Version/6.0 Mobile/10A5355d Safari/8536.25";
pub(crate) const ANDROID: &str = "Mozilla/5.0 (Linux; U; Android 4.0.3; ko-kr; LG-L160L Build/IML74K) AppleWebkit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30";
pub(crate) const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 4.0.4; Galaxy Nexus Build/IMM76B) AppleWebKit/535.19 (KHTML, like Gecko) Chrome/18.0.1025.133 Mobile Safari/535.19";
pub(crate) const ANDROID_FIREFOX: &str = "Mozilla/5.0 (Android 4.4; Mobile; rv:41.0) Gecko/41.0 Firefox/41.0";
pub(crate) const WINDOWS_PHONE: &str = "Mozilla/5.0 (compatible; MSIE 10.0; Windows Phone 8.0; Trident/6.0; IEMobile/10.0; ARM; Touch; NOKIA; Lumia 920)";
pub(crate) const KINDLE: &str = "Mozilla/5.0 (Linux; U; Android 2.3.4; en-us; Kindle Fire Build/GINGERBREAD) AppleWebKit/533.1 (KHTML, like Gecko) Version/4.0 Mobile Safari/533.1";
pub(crate) const MAC_DESKTOP: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/43.0.2357.132 Safari/537.36";
pub(crate) const WINDOWS_8: &str = "Mozilla/5.0 (Windows NT 6.2; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/43.0.2357.134 Safari/537.36";
pub(crate) const WINDOWS_7: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:40.0) Gecko/20100101 Firefox/40.1";
pub(crate) const LINUX_DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/43.0.2357.130 Safari/537.36";

/// What an injected iframe does once pointed at an app URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IframeBehavior {
    /// Neither load nor error ever fires
    Silent,
    /// Load (or error) fires this many milliseconds after injection
    SettleAfter(u64),
}

enum Scheduled {
    Once(Callback),
    Repeat {
        period: u64,
        callback: Option<RepeatCallback>,
    },
}

enum Fired {
    Once(Callback),
    Repeat(RepeatCallback),
}

struct Timer {
    due: u64,
    kind: TimerKind,
    scheduled: Scheduled,
}

struct PageState {
    user_agent: String,
    search: String,
    referrer: String,
    hash: String,
    now: u64,
    hidden: bool,
    hide_at: Option<u64>,
    iframe_behavior: IframeBehavior,
    next_id: i32,
    timers: HashMap<i32, Timer>,
    navigations: Vec<String>,
    iframes: Vec<(String, IframeStyle)>,
    revealed: Vec<String>,
    closed: bool,
}

pub(crate) struct SimulatedPage {
    state: RefCell<PageState>,
}

impl SimulatedPage {
    pub(crate) fn new(user_agent: &str) -> Self {
        Self {
            state: RefCell::new(PageState {
                user_agent: user_agent.to_string(),
                search: String::new(),
                referrer: String::new(),
                hash: String::new(),
                now: 0,
                hidden: false,
                hide_at: None,
                iframe_behavior: IframeBehavior::Silent,
                next_id: 1,
                timers: HashMap::new(),
                navigations: Vec::new(),
                iframes: Vec::new(),
                revealed: Vec::new(),
                closed: false,
            }),
        }
    }

    pub(crate) fn with_search(self, search: &str) -> Self {
        self.state.borrow_mut().search = search.to_string();
        self
    }

    pub(crate) fn with_referrer(self, referrer: &str) -> Self {
        self.state.borrow_mut().referrer = referrer.to_string();
        self
    }

    pub(crate) fn with_iframe_behavior(self, behavior: IframeBehavior) -> Self {
        self.state.borrow_mut().iframe_behavior = behavior;
        self
    }

    /// The page goes to the background at virtual time `at` (app opened)
    pub(crate) fn hide_at(&self, at: u64) {
        self.state.borrow_mut().hide_at = Some(at);
    }

    pub(crate) fn hide_now(&self) {
        let mut state = self.state.borrow_mut();
        state.hidden = true;
        state.hide_at = None;
    }

    pub(crate) fn navigations(&self) -> Vec<String> {
        self.state.borrow().navigations.clone()
    }

    pub(crate) fn iframes(&self) -> Vec<(String, IframeStyle)> {
        self.state.borrow().iframes.clone()
    }

    pub(crate) fn revealed(&self) -> Vec<String> {
        self.state.borrow().revealed.clone()
    }

    pub(crate) fn closed(&self) -> bool {
        self.state.borrow().closed
    }

    pub(crate) fn now(&self) -> u64 {
        self.state.borrow().now
    }

    pub(crate) fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Run every timer due within the next `ms` milliseconds, in due order
    pub(crate) fn advance(&self, ms: u64) {
        let target = self.state.borrow().now + ms;
        while let Some(id) = self.next_due(target) {
            self.fire(id);
        }
        let mut state = self.state.borrow_mut();
        state.now = target;
        Self::apply_visibility(&mut state);
    }

    /// Move the clock without running timers, as when the page is frozen
    /// while the OS shows an app chooser; overdue timers run late on the
    /// next `advance`
    pub(crate) fn stall(&self, ms: u64) {
        let mut state = self.state.borrow_mut();
        state.now += ms;
        Self::apply_visibility(&mut state);
    }

    fn apply_visibility(state: &mut PageState) {
        if let Some(at) = state.hide_at {
            if at <= state.now {
                state.hidden = true;
                state.hide_at = None;
            }
        }
    }

    fn next_due(&self, target: u64) -> Option<i32> {
        let state = self.state.borrow();
        state
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= target)
            .min_by_key(|(id, timer)| (timer.due, **id))
            .map(|(id, _)| *id)
    }

    fn fire(&self, id: i32) {
        // Take the callback out so it can re-enter the page freely
        let fired = {
            let mut state = self.state.borrow_mut();
            let Some(due) = state.timers.get(&id).map(|timer| timer.due) else {
                return;
            };
            state.now = state.now.max(due);
            Self::apply_visibility(&mut state);
            let now = state.now;

            let is_once = state
                .timers
                .get(&id)
                .is_some_and(|timer| matches!(timer.scheduled, Scheduled::Once(_)));
            if is_once {
                match state.timers.remove(&id) {
                    Some(Timer {
                        scheduled: Scheduled::Once(callback),
                        ..
                    }) => Fired::Once(callback),
                    _ => return,
                }
            } else {
                let Some(timer) = state.timers.get_mut(&id) else {
                    return;
                };
                let Scheduled::Repeat { period, callback } = &mut timer.scheduled else {
                    return;
                };
                timer.due = now + *period;
                match callback.take() {
                    Some(callback) => Fired::Repeat(callback),
                    None => return,
                }
            }
        };

        match fired {
            Fired::Once(callback) => callback(),
            Fired::Repeat(mut callback) => {
                callback();
                // Cleared from inside its own callback: stays cleared
                let mut state = self.state.borrow_mut();
                if let Some(Timer {
                    scheduled: Scheduled::Repeat { callback: slot, .. },
                    ..
                }) = state.timers.get_mut(&id)
                {
                    *slot = Some(callback);
                }
            }
        }
    }

    fn schedule(&self, delay: u64, kind: TimerKind, scheduled: Scheduled) -> TimerHandle {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + delay;
        state.timers.insert(id, Timer { due, kind, scheduled });
        TimerHandle { id, kind }
    }
}

impl PageHost for SimulatedPage {
    fn user_agent(&self) -> String {
        self.state.borrow().user_agent.clone()
    }

    fn search(&self) -> String {
        self.state.borrow().search.clone()
    }

    fn hash(&self) -> String {
        self.state.borrow().hash.clone()
    }

    fn referrer(&self) -> String {
        self.state.borrow().referrer.clone()
    }

    fn navigate(&self, url: &str) {
        self.state.borrow_mut().navigations.push(url.to_string());
    }

    fn close_window(&self) {
        self.state.borrow_mut().closed = true;
    }

    fn is_hidden(&self) -> bool {
        self.state.borrow().hidden
    }

    fn now_ms(&self) -> f64 {
        self.state.borrow().now as f64
    }

    fn inject_iframe(&self, url: &str, style: IframeStyle, on_settle: Callback) {
        let behavior = {
            let mut state = self.state.borrow_mut();
            state.iframes.push((url.to_string(), style));
            state.iframe_behavior
        };
        if let IframeBehavior::SettleAfter(delay) = behavior {
            self.schedule(delay, TimerKind::Timeout, Scheduled::Once(on_settle));
        }
    }

    fn set_timeout(&self, delay_ms: u32, callback: Callback) -> TimerHandle {
        self.schedule(
            u64::from(delay_ms),
            TimerKind::Timeout,
            Scheduled::Once(callback),
        )
    }

    fn set_interval(&self, period_ms: u32, callback: RepeatCallback) -> TimerHandle {
        let period = u64::from(period_ms);
        self.schedule(
            period,
            TimerKind::Interval,
            Scheduled::Repeat {
                period,
                callback: Some(callback),
            },
        )
    }

    fn clear_timer(&self, handle: TimerHandle) {
        let mut state = self.state.borrow_mut();
        let matches = state
            .timers
            .get(&handle.id)
            .is_some_and(|timer| timer.kind == handle.kind);
        if matches {
            state.timers.remove(&handle.id);
        }
    }

    fn reveal_element(&self, id: &str) {
        self.state.borrow_mut().revealed.push(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_timers_fire_in_due_order() {
        let page = SimulatedPage::new(IPHONE);
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = Rc::clone(&log);
        page.set_timeout(50, Box::new(move || l.borrow_mut().push("late")));
        let l = Rc::clone(&log);
        page.set_timeout(10, Box::new(move || l.borrow_mut().push("early")));

        page.advance(20);
        assert_eq!(*log.borrow(), vec!["early"]);
        page.advance(100);
        assert_eq!(*log.borrow(), vec!["early", "late"]);
        assert_eq!(page.now(), 120);
        assert_eq!(page.pending_timers(), 0);
    }

    #[test]
    fn test_interval_repeats_until_cleared() {
        let page = Rc::new(SimulatedPage::new(IPHONE));
        let ticks = Rc::new(Cell::new(0));
        let t = Rc::clone(&ticks);
        let handle = page.set_interval(100, Box::new(move || t.set(t.get() + 1)));

        page.advance(350);
        assert_eq!(ticks.get(), 3);
        page.clear_timer(handle);
        page.advance(1000);
        assert_eq!(ticks.get(), 3);
    }

    #[test]
    fn test_interval_cleared_from_inside_callback() {
        let page = Rc::new(SimulatedPage::new(IPHONE));
        let ticks = Rc::new(Cell::new(0));
        let handle = Rc::new(Cell::new(None));

        let (p, t, h) = (Rc::clone(&page), Rc::clone(&ticks), Rc::clone(&handle));
        let id = page.set_interval(
            100,
            Box::new(move || {
                t.set(t.get() + 1);
                if let Some(handle) = h.get() {
                    p.clear_timer(handle);
                }
            }),
        );
        handle.set(Some(id));

        page.advance(1000);
        assert_eq!(ticks.get(), 1);
        assert_eq!(page.pending_timers(), 0);
    }

    #[test]
    fn test_hidden_at_virtual_time() {
        let page = SimulatedPage::new(IPHONE);
        page.hide_at(30);
        page.advance(29);
        assert!(!page.is_hidden());
        page.advance(1);
        assert!(page.is_hidden());
    }

    #[test]
    fn test_iframe_settles_after_delay() {
        let page = SimulatedPage::new(ANDROID).with_iframe_behavior(IframeBehavior::SettleAfter(5));
        let settled = Rc::new(Cell::new(false));
        let s = Rc::clone(&settled);
        page.inject_iframe("myapp://", IframeStyle::Pixel, Box::new(move || s.set(true)));

        assert_eq!(page.iframes(), vec![("myapp://".to_string(), IframeStyle::Pixel)]);
        page.advance(4);
        assert!(!settled.get());
        page.advance(1);
        assert!(settled.get());
    }

    #[test]
    fn test_stalled_timer_fires_late() {
        let page = SimulatedPage::new(WINDOWS_PHONE);
        let fired_at = Rc::new(Cell::new(0.0));
        let (p, f) = (Rc::new(page), Rc::clone(&fired_at));
        let host = Rc::clone(&p);
        p.set_timeout(100, Box::new(move || f.set(host.now_ms())));

        p.stall(500);
        assert_eq!(fired_at.get(), 0.0);
        p.advance(0);
        assert_eq!(fired_at.get(), 500.0);
    }
}
