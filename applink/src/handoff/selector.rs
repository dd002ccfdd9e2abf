//! Strategy registry and dispatcher
//!
//! Strategies are looked up by platform family and browser engine, so every
//! combination is one table entry instead of a branch buried in a strategy.

use std::collections::HashMap;
use std::rc::Rc;

use crate::handoff::attempt::Attempt;
use crate::handoff::strategies::{
    AndroidDirectStrategy, AndroidIframeStrategy, AndroidIntentStrategy, IosIframeStrategy,
    MonitoredDirectStrategy, WindowsPhoneStrategy,
};
use crate::handoff::strategy_trait::HandoffStrategy;
use crate::handoff::{navigate_to_fallback, Destination};
use crate::routing::builder::ResolvedUrls;
use crate::routing::classifier::PlatformFamily;
use crate::services::config::HandoffTimings;
use crate::services::errors::{AppLinkError, AppLinkResult};
use crate::services::host::PageHost;
use crate::utils::EngineHint;
use crate::{console_debug, console_info};

/// Platform family × engine → strategy, plus the router names accepted in
/// table mode
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<(PlatformFamily, EngineHint), Rc<dyn HandoffStrategy>>,
    routers: HashMap<String, PlatformFamily>,
}

impl StrategyRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in strategies and router names
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        let ios: Rc<dyn HandoffStrategy> = Rc::new(IosIframeStrategy);
        let windows_phone: Rc<dyn HandoffStrategy> = Rc::new(WindowsPhoneStrategy);
        let direct: Rc<dyn HandoffStrategy> = Rc::new(MonitoredDirectStrategy);
        for engine in EngineHint::ALL {
            registry.register(PlatformFamily::Ios, engine, Rc::clone(&ios));
            registry.register(PlatformFamily::WindowsPhone, engine, Rc::clone(&windows_phone));
            registry.register(PlatformFamily::Desktop, engine, Rc::clone(&direct));
        }
        registry.register(PlatformFamily::Android, EngineHint::Chrome, Rc::new(AndroidIntentStrategy));
        registry.register(PlatformFamily::Android, EngineHint::Firefox, Rc::new(AndroidDirectStrategy));
        registry.register(PlatformFamily::Android, EngineHint::Other, Rc::new(AndroidIframeStrategy));

        let routers = [
            ("ios", PlatformFamily::Ios),
            ("iphone", PlatformFamily::Ios),
            ("ipad", PlatformFamily::Ios),
            ("android", PlatformFamily::Android),
            ("kindle_fire", PlatformFamily::Android),
            ("windows_phone", PlatformFamily::WindowsPhone),
            ("desktop", PlatformFamily::Desktop),
            ("direct", PlatformFamily::Desktop),
        ];
        for (name, family) in routers {
            registry.register_router(name, family);
        }

        registry
    }

    pub fn register(&mut self, family: PlatformFamily, engine: EngineHint, strategy: Rc<dyn HandoffStrategy>) {
        self.strategies.insert((family, engine), strategy);
    }

    pub fn register_router(&mut self, name: impl Into<String>, family: PlatformFamily) {
        self.routers.insert(name.into(), family);
    }

    pub fn family_for_router(&self, name: &str) -> Option<PlatformFamily> {
        self.routers.get(name).copied()
    }

    pub fn select(&self, family: PlatformFamily, engine: EngineHint) -> AppLinkResult<Rc<dyn HandoffStrategy>> {
        let strategy = self
            .strategies
            .get(&(family, engine))
            .cloned()
            .ok_or_else(|| AppLinkError::MissingStrategy {
                family: family.to_string(),
                engine: engine.to_string(),
            })?;
        console_debug!("[StrategyRegistry] {} on {} -> {}", family, engine, strategy.name());
        Ok(strategy)
    }
}

/// Run one handoff attempt. Without a usable URL nothing is armed and the
/// page goes straight to the fallback.
pub fn dispatch(
    strategy: &dyn HandoffStrategy,
    host: Rc<dyn PageHost>,
    urls: &ResolvedUrls,
    timings: &HandoffTimings,
) -> Destination {
    let url = strategy.handoff_url(urls);
    if url.is_empty() {
        console_info!("[Dispatch] No app URL for {}, going to {}", strategy.name(), urls.fallback_url);
        navigate_to_fallback(host.as_ref(), &urls.fallback_url);
        return Destination::Fallback(urls.fallback_url.clone());
    }

    console_info!("[Dispatch] Handing off with {} to {}", strategy.name(), url);
    let attempt = Attempt::new(host, urls.fallback_url.clone());
    attempt.begin();
    strategy.handoff(&attempt, url, timings);
    Destination::Handoff(url.to_string())
}
