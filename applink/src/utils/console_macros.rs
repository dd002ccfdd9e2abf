/// Macros for properly formatted console logging.
///
/// On wasm these wrap gloo_console and prefix the page clock, so the order of
/// timer callbacks can be read straight from the browser console. On native
/// targets (tests, tooling) they forward to `tracing` with the same format
/// arguments.
#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! console_info {
    ($fmt:expr) => {
        $crate::__private::gloo_console::info!(format!("[{}] {}", $crate::__private::js_sys::Date::now(), $fmt))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::__private::gloo_console::info!(format!("[{}] {}", $crate::__private::js_sys::Date::now(), format!($fmt, $($arg)*)))
    };
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! console_warn {
    ($fmt:expr) => {
        $crate::__private::gloo_console::warn!(format!("[{}] {}", $crate::__private::js_sys::Date::now(), $fmt))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::__private::gloo_console::warn!(format!("[{}] {}", $crate::__private::js_sys::Date::now(), format!($fmt, $($arg)*)))
    };
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! console_error {
    ($fmt:expr) => {
        $crate::__private::gloo_console::error!(format!("[{}] {}", $crate::__private::js_sys::Date::now(), $fmt))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::__private::gloo_console::error!(format!("[{}] {}", $crate::__private::js_sys::Date::now(), format!($fmt, $($arg)*)))
    };
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! console_debug {
    ($fmt:expr) => {
        $crate::__private::gloo_console::debug!(format!("[{}] {}", $crate::__private::js_sys::Date::now(), $fmt))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::__private::gloo_console::debug!(format!("[{}] {}", $crate::__private::js_sys::Date::now(), format!($fmt, $($arg)*)))
    };
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! console_info {
    ($($arg:tt)*) => {
        $crate::__private::tracing::info!($($arg)*)
    };
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {
        $crate::__private::tracing::warn!($($arg)*)
    };
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! console_error {
    ($($arg:tt)*) => {
        $crate::__private::tracing::error!($($arg)*)
    };
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! console_debug {
    ($($arg:tt)*) => {
        $crate::__private::tracing::debug!($($arg)*)
    };
}
