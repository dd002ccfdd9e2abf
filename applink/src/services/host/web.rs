//! `PageHost` backed by the real browser page

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlIFrameElement, Window};

use super::{Callback, IframeStyle, PageHost, RepeatCallback, TimerHandle, TimerKind};
use crate::services::errors::{AppLinkError, AppLinkResult};
use crate::{console_debug, console_error, console_warn};

/// Browser page driven through web-sys
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> AppLinkResult<Self> {
        let window = web_sys::window().ok_or_else(|| AppLinkError::Host {
            reason: "no global window".to_string(),
        })?;
        let document = window.document().ok_or_else(|| AppLinkError::Host {
            reason: "window has no document".to_string(),
        })?;
        Ok(Self { window, document })
    }

    /// Older WebKit only exposes the prefixed visibility flag
    fn webkit_hidden(&self) -> bool {
        js_sys::Reflect::get(&self.document, &JsValue::from_str("webkitHidden"))
            .ok()
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    fn build_iframe(&self) -> Option<HtmlIFrameElement> {
        let element = match self.document.create_element("iframe") {
            Ok(element) => element,
            Err(e) => {
                console_error!("Failed to create iframe: {:?}", e);
                return None;
            }
        };
        element.dyn_into::<HtmlIFrameElement>().ok()
    }
}

/// Timer ids come back from gloo as JS numbers
fn timer_id(value: JsValue) -> i32 {
    value.as_f64().unwrap_or_default() as i32
}

impl PageHost for WebHost {
    fn user_agent(&self) -> String {
        self.window.navigator().user_agent().unwrap_or_default()
    }

    fn search(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }

    fn hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn referrer(&self) -> String {
        self.document.referrer()
    }

    fn navigate(&self, url: &str) {
        console_debug!("Navigating to {}", url);
        if let Err(e) = self.window.location().set_href(url) {
            console_error!("Navigation to {} failed: {:?}", url, e);
        }
    }

    fn close_window(&self) {
        if let Err(e) = self.window.close() {
            console_warn!("Failed to close window: {:?}", e);
        }
    }

    fn is_hidden(&self) -> bool {
        self.document.hidden() || self.webkit_hidden()
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn inject_iframe(&self, url: &str, style: IframeStyle, on_settle: Callback) {
        let Some(iframe) = self.build_iframe() else {
            return;
        };
        let Some(body) = self.document.body() else {
            console_warn!("Document has no body, cannot inject iframe");
            return;
        };

        // load and error share one slot so the callback runs at most once
        let slot = Rc::new(RefCell::new(Some(on_settle)));
        let settle = |slot: Rc<RefCell<Option<Callback>>>| {
            Closure::<dyn FnMut()>::new(move || {
                let callback = slot.borrow_mut().take();
                if let Some(callback) = callback {
                    callback();
                }
            })
        };
        let onload = settle(Rc::clone(&slot));
        let onerror = settle(slot);
        iframe.set_onload(Some(onload.as_ref().unchecked_ref()));
        iframe.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        let css = iframe.style();
        let properties: &[(&str, &str)] = match style {
            IframeStyle::Offscreen => &[
                ("position", "absolute"),
                ("left", "-9999px"),
                ("border", "none"),
            ],
            IframeStyle::Pixel => &[("border", "none"), ("width", "1px"), ("height", "1px")],
        };
        for (name, value) in properties {
            if let Err(e) = css.set_property(name, value) {
                console_warn!("Failed to style iframe ({}): {:?}", name, e);
            }
        }

        let attached = match style {
            IframeStyle::Offscreen => body.append_child(&iframe).map(|_| iframe.set_src(url)),
            IframeStyle::Pixel => {
                iframe.set_src(url);
                body.append_child(&iframe).map(|_| ())
            }
        };
        if let Err(e) = attached {
            console_error!("Failed to attach iframe: {:?}", e);
        }
    }

    fn set_timeout(&self, delay_ms: u32, callback: Callback) -> TimerHandle {
        let id = Timeout::new(delay_ms, callback).forget();
        TimerHandle {
            id: timer_id(id),
            kind: TimerKind::Timeout,
        }
    }

    fn set_interval(&self, period_ms: u32, mut callback: RepeatCallback) -> TimerHandle {
        let id = Interval::new(period_ms, move || callback()).forget();
        TimerHandle {
            id: timer_id(id),
            kind: TimerKind::Interval,
        }
    }

    fn clear_timer(&self, handle: TimerHandle) {
        match handle.kind {
            TimerKind::Timeout => self.window.clear_timeout_with_handle(handle.id),
            TimerKind::Interval => self.window.clear_interval_with_handle(handle.id),
        }
    }

    fn reveal_element(&self, id: &str) {
        if let Some(element) = self.document.get_element_by_id(id) {
            element.set_class_name("");
        }
    }
}
