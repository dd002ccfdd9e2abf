use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use tracing::instrument;

use crate::handoff::selector::{dispatch, StrategyRegistry};
use crate::handoff::{navigate_to_fallback, Destination};
use crate::routing::builder::ResolvedUrls;
use crate::routing::classifier::{classify, match_definition, PlatformFamily};
use crate::routing::query::apply_referrer;
use crate::services::config::{AppLinkConfig, PlatformDefinition};
use crate::services::errors::{AppLinkError, AppLinkResult};
use crate::services::host::{PageHost, RedirectContext};
use crate::utils::EngineHint;
use crate::{console_info, console_warn};

/// Extension point run before routing; routing waits until it resumes the
/// continuation
pub type BeforeHook = Box<dyn FnOnce(Continuation)>;

struct AppLinkInner {
    host: Rc<dyn PageHost>,
    config: AppLinkConfig,
    registry: StrategyRegistry,
    before: RefCell<Option<BeforeHook>>,
}

/// Entry point: decides where the visiting page goes and starts the handoff.
///
/// Cheap to clone; clones share the host, the configuration and the before
/// hook slot.
#[derive(Clone)]
pub struct AppLink {
    inner: Rc<AppLinkInner>,
}

/// Handed to the before hook; resuming it runs the routing the hook
/// deferred. Consumed on use, so routing resumes at most once per hook.
pub struct Continuation {
    router: AppLink,
}

impl Continuation {
    pub fn resume(self) -> AppLinkResult<Destination> {
        self.router.route()
    }
}

impl AppLink {
    pub fn new(host: Rc<dyn PageHost>, config: AppLinkConfig) -> Self {
        Self::with_registry(host, config, StrategyRegistry::with_defaults())
    }

    pub fn with_registry(host: Rc<dyn PageHost>, config: AppLinkConfig, registry: StrategyRegistry) -> Self {
        Self {
            inner: Rc::new(AppLinkInner {
                host,
                config,
                registry,
                before: RefCell::new(None),
            }),
        }
    }

    pub fn config(&self) -> &AppLinkConfig {
        &self.inner.config
    }

    /// Register the before hook. It runs on the next [`AppLink::route`] and
    /// must call [`Continuation::resume`] for routing to happen at all.
    pub fn set_before<F>(&self, hook: F)
    where
        F: FnOnce(Continuation) + 'static,
    {
        *self.inner.before.borrow_mut() = Some(Box::new(hook));
    }

    /// Route the page. With a before hook registered the hook is removed and
    /// run, and the call returns [`Destination::Deferred`].
    pub fn route(&self) -> AppLinkResult<Destination> {
        let hook = self.inner.before.borrow_mut().take();
        if let Some(hook) = hook {
            console_info!("[AppLink] Deferring to the before hook");
            hook(Continuation { router: self.clone() });
            return Ok(Destination::Deferred);
        }
        self.route_now()
    }

    /// Wait for `gate`, then route
    pub async fn route_when<G>(&self, gate: G) -> AppLinkResult<Destination>
    where
        G: Future<Output = ()>,
    {
        gate.await;
        self.route()
    }

    #[instrument(skip(self), err)]
    fn route_now(&self) -> AppLinkResult<Destination> {
        let host = &self.inner.host;
        let config = &self.inner.config;
        let ctx = RedirectContext::capture(host.as_ref());

        let mut fallback_url = config.effective_fallback_url().to_string();
        if config.fallback_platform().is_some_and(|platform| platform.supports_qs) {
            fallback_url = apply_referrer(&fallback_url, &ctx.referrer);
        }

        let selected = if config.uses_match_rules() {
            self.select_from_table(&ctx.user_agent)?
        } else {
            self.select_builtin(&ctx.user_agent)
        };

        let Some((platform, family)) = selected else {
            console_info!("[AppLink] No platform for this browser, going to {}", fallback_url);
            navigate_to_fallback(host.as_ref(), &fallback_url);
            return Ok(Destination::Fallback(fallback_url));
        };

        let engine = EngineHint::detect(&ctx.user_agent);
        let strategy = self.inner.registry.select(family, engine)?;
        let urls = ResolvedUrls::resolve(platform, &ctx, &fallback_url)?;
        Ok(dispatch(strategy.as_ref(), Rc::clone(host), &urls, &config.timings))
    }

    fn select_builtin(&self, user_agent: &str) -> Option<(&PlatformDefinition, PlatformFamily)> {
        let platform = classify(user_agent)?;
        let config = &self.inner.config;
        let family = platform.family().to_string();
        match config.platform(platform.key()).or_else(|| config.platform(&family)) {
            Some(definition) => Some((definition, platform.family())),
            None => {
                console_warn!("[AppLink] Platform {} is not configured", platform);
                None
            }
        }
    }

    fn select_from_table(&self, user_agent: &str) -> AppLinkResult<Option<(&PlatformDefinition, PlatformFamily)>> {
        let Some((id, definition)) = match_definition(&self.inner.config, user_agent)? else {
            return Ok(None);
        };

        // Store badge for the matched platform, in case the redirect fails
        self.inner.host.reveal_element(id);

        let router = definition.router().ok_or_else(|| AppLinkError::MissingRouter {
            platform: id.to_string(),
        })?;
        let family = self
            .inner
            .registry
            .family_for_router(router)
            .ok_or_else(|| AppLinkError::UnknownRouter {
                platform: id.to_string(),
                router: router.to_string(),
            })?;
        Ok(Some((definition, family)))
    }
}
