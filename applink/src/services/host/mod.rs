//! Browser Page Abstraction
//!
//! The router never touches `window` directly. Everything it reads from or
//! does to the page goes through [`PageHost`], so the same engine runs
//! against the real DOM on wasm ([`WebHost`]) and against a simulated page
//! with a virtual clock in tests.

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::WebHost;

#[cfg(test)]
pub(crate) mod simulated;

/// One-shot page callback (timeouts, iframe load/error)
pub type Callback = Box<dyn FnOnce()>;

/// Repeating page callback (intervals)
pub type RepeatCallback = Box<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Timeout,
    Interval,
}

/// Handle of a timer armed on the page, used to clear it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    pub id: i32,
    pub kind: TimerKind,
}

/// How an injected iframe is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IframeStyle {
    /// Appended to the body first, then pointed at the URL, kept off screen
    Offscreen,
    /// Pointed at the URL first, then appended; borderless and 1px square
    Pixel,
}

/// The visiting page, as seen by the router
pub trait PageHost {
    fn user_agent(&self) -> String;

    /// Current query string, including the leading `?` when present
    fn search(&self) -> String;

    /// Current fragment, including the leading `#` when present
    fn hash(&self) -> String;

    fn referrer(&self) -> String;

    /// Point the page at `url`
    fn navigate(&self, url: &str);

    /// Close the tab left behind after a successful handoff
    fn close_window(&self);

    /// True when the Page Visibility API reports the page as hidden
    fn is_hidden(&self) -> bool;

    /// Monotonic page clock in milliseconds
    fn now_ms(&self) -> f64;

    /// Load `url` in an injected iframe; `on_settle` runs once on load or error
    fn inject_iframe(&self, url: &str, style: IframeStyle, on_settle: Callback);

    fn set_timeout(&self, delay_ms: u32, callback: Callback) -> TimerHandle;

    fn set_interval(&self, period_ms: u32, callback: RepeatCallback) -> TimerHandle;

    /// Clear a timer; clearing one that already fired or was cleared is a no-op
    fn clear_timer(&self, handle: TimerHandle);

    /// Show the element with this id (the store badge of the matched platform)
    fn reveal_element(&self, _id: &str) {}
}

/// Request-time signals, captured once per redirect attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectContext {
    pub user_agent: String,
    pub search: String,
    pub referrer: String,
    pub hash: String,
}

impl RedirectContext {
    pub fn capture(host: &dyn PageHost) -> Self {
        Self {
            user_agent: host.user_agent(),
            search: host.search(),
            referrer: host.referrer(),
            hash: host.hash(),
        }
    }

    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = referrer.into();
        self
    }
}
