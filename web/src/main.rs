use anyhow::{Context, Result};
use applink::{console_error, console_info, console_warn, AppLinkConfig};
use dioxus::prelude::*;

/// Element the server renders the configuration JSON into
const CONFIG_ELEMENT_ID: &str = "app-link-config";

fn main() {
    dioxus::launch(App);
}

/// Read the configuration embedded in the hosting page
fn load_config() -> Result<AppLinkConfig> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .context("page has no document")?;
    let element = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .with_context(|| format!("no #{CONFIG_ELEMENT_ID} element on the page"))?;
    let json = element.text_content().unwrap_or_default();
    AppLinkConfig::from_json(&json).context("invalid app link configuration")
}

/// Run the inline scripts the configuration carries, in order. Routing
/// waits for all of them.
async fn run_scripts(scripts: Vec<String>) {
    for script in scripts {
        if let Err(e) = document::eval(&script).await {
            console_warn!("[web] Inline script failed: {:?}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn start_routing(config: AppLinkConfig) -> Result<applink::Destination> {
    use std::rc::Rc;

    let host: Rc<dyn applink::PageHost> = Rc::new(applink::WebHost::new()?);
    let scripts = config.scripts.clone();
    let router = applink::AppLink::new(host, config);
    match router.route_when(run_scripts(scripts)).await {
        Ok(destination) => Ok(destination),
        Err(e) if e.is_configuration() => {
            Err(anyhow::Error::new(e).context("app link configuration does not fit this browser"))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn start_routing(config: AppLinkConfig) -> Result<applink::Destination> {
    run_scripts(config.scripts).await;
    anyhow::bail!("app links only route inside a browser")
}

#[component]
fn App() -> Element {
    let config = use_hook(|| load_config().map_err(|e| format!("{e:#}")));

    let routing_config = config.clone();
    use_effect(move || {
        let Ok(config) = routing_config.clone() else {
            return;
        };
        spawn(async move {
            match start_routing(config).await {
                Ok(destination) => console_info!("[web] Routing started: {:?}", destination),
                Err(e) => console_error!("[web] Routing failed: {:#}", e),
            }
        });
    });

    match config {
        Ok(config) => rsx! {
            StoreBadges { config: config.clone() }
            FallbackLink { url: config.effective_fallback_url().to_string() }
        },
        Err(message) => {
            console_error!("[web] {}", message);
            rsx! {
                p { class: "app-link-error", "{message}" }
            }
        }
    }
}

/// One hidden badge per platform with a store URL; the router reveals the
/// badge of the platform it matched
#[component]
fn StoreBadges(config: AppLinkConfig) -> Element {
    let badges = config
        .platforms
        .iter()
        .filter(|(_, platform)| !platform.store_url.is_empty())
        .map(|(id, platform)| {
            let label = platform
                .store_text
                .clone()
                .or_else(|| platform.name.clone())
                .unwrap_or_else(|| "Get the app".to_string());
            (id.clone(), platform.store_url.clone(), platform.badge_url.clone(), label)
        })
        .collect::<Vec<_>>();

    rsx! {
        div { class: "app-link-badges",
            for (id, store_url, badge_url, label) in badges {
                a { key: "{id}", id: "{id}", class: "hidden", href: "{store_url}",
                    if let Some(badge_url) = badge_url {
                        img { src: "{badge_url}", alt: "{label}" }
                    } else {
                        "{label}"
                    }
                }
            }
        }
    }
}

#[component]
fn FallbackLink(url: String) -> Element {
    if url.is_empty() {
        return rsx! {};
    }
    rsx! {
        p { class: "app-link-fallback",
            a { href: "{url}", "Continue to the website" }
        }
    }
}
