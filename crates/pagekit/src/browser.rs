//! Real browser control over the Chrome `DevTools` Protocol.
//!
//! [`ChromiumDriver`] implements [`BrowserDriver`] on top of chromiumoxide. The
//! CDP client is async; the driver owns a private tokio runtime and blocks on
//! it for every call, so it must not be used from inside another runtime.
//!
//! Node handles carry no remote object. Every node operation re-evaluates the
//! locator with `document.evaluate`, which keeps handles valid across
//! re-renders of the same node.

use crate::config::{BrowserSettings, Settings};
use crate::driver::{BrowserDriver, NodeHandle};
use crate::fixture::BrowserFixture;
use crate::locator::Locator;
use crate::result::{UiError, UiResult};
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

const VISIBLE_JS: &str = "!!(n.offsetWidth || n.offsetHeight || n.getClientRects().length) \
    && getComputedStyle(n).visibility !== 'hidden'";
const ENABLED_JS: &str = "!n.disabled";
const SELECTED_JS: &str = "!!(n.checked || n.selected)";
const CLICK_JS: &str = "(n.scrollIntoView({block: 'center'}), n.click(), true)";
const HOVER_JS: &str = "(['mouseover', 'mouseenter'].forEach(t => \
    n.dispatchEvent(new MouseEvent(t, {bubbles: true}))), true)";
const VALUE_JS: &str = "n.value ?? ''";
const TEXT_JS: &str = "n.textContent ?? ''";

/// Reply of a node script: whether the node was found, and the result
#[derive(Debug, Deserialize)]
struct NodeReply<T> {
    found: bool,
    value: Option<T>,
}

/// Wrap `body` (an expression over `n`) so that a missing node is reported
fn node_script(locator: &str, body: &str) -> String {
    let query = Locator::xpath(locator).to_query();
    format!(
        "(() => {{ const n = {query}; if (!n) return {{found: false}}; \
         return {{found: true, value: ({body})}}; }})()"
    )
}

/// Expression that replaces the field value and fires input events
fn set_value_js(text: &str) -> String {
    let literal = serde_json::Value::from(text).to_string();
    format!(
        "(n.focus(), n.value = {literal}, \
         n.dispatchEvent(new Event('input', {{bubbles: true}})), \
         n.dispatchEvent(new Event('change', {{bubbles: true}})), true)"
    )
}

/// Expression reading one attribute, `null` when absent
fn attribute_js(name: &str) -> String {
    let literal = serde_json::Value::from(name).to_string();
    format!("n.getAttribute({literal})")
}

fn cdp_error(e: impl std::fmt::Display) -> UiError {
    UiError::driver(e.to_string())
}

/// Chromium, Chrome or Edge driven over CDP
#[derive(Debug)]
pub struct ChromiumDriver {
    runtime: Runtime,
    browser: Mutex<Option<CdpBrowser>>,
    page: CdpPage,
    handler: JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch a browser per `settings`.
    ///
    /// Without an explicit `executable`, chromiumoxide looks for a Chrome or
    /// Chromium binary on the system.
    ///
    /// # Errors
    ///
    /// [`UiError::UnsupportedBrowser`] for Firefox, [`UiError::Config`] for a
    /// bad viewport, [`UiError::Driver`] if launch fails
    pub fn launch(settings: &BrowserSettings) -> UiResult<Self> {
        if !settings.kind.is_chromium_based() {
            return Err(UiError::UnsupportedBrowser {
                browser: settings.kind.to_string(),
            });
        }
        let (width, height) = settings.viewport()?;

        let mut builder = CdpConfig::builder().window_size(width, height);
        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &settings.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(UiError::driver)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        let (browser, handler, page) = runtime.block_on(async {
            let (browser, mut handler) = CdpBrowser::launch(config).await.map_err(cdp_error)?;
            let handler = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if let Err(e) = event {
                        tracing::debug!(error = %e, "cdp handler error");
                    }
                }
            });
            let page = browser.new_page("about:blank").await.map_err(cdp_error)?;
            Ok::<_, UiError>((browser, handler, page))
        })?;

        tracing::info!(
            browser = %settings.kind,
            width,
            height,
            headless = settings.headless,
            "browser launched"
        );

        Ok(Self {
            runtime,
            browser: Mutex::new(Some(browser)),
            page,
            handler,
        })
    }

    fn eval<T: DeserializeOwned>(&self, script: String) -> UiResult<T> {
        self.runtime.block_on(async {
            self.page
                .evaluate(script)
                .await
                .map_err(cdp_error)?
                .into_value::<T>()
                .map_err(cdp_error)
        })
    }

    fn on_node<T: DeserializeOwned>(&self, node: &NodeHandle, body: &str) -> UiResult<T> {
        let reply: NodeReply<T> = self.eval(node_script(&node.id, body))?;
        if !reply.found {
            return Err(UiError::NotFound {
                locator: node.locator.clone(),
            });
        }
        reply
            .value
            .ok_or_else(|| UiError::driver(format!("no result from {}", node.locator)))
    }
}

impl BrowserDriver for ChromiumDriver {
    fn navigate(&self, url: &str) -> UiResult<()> {
        self.runtime
            .block_on(self.page.goto(url))
            .map_err(|e| UiError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    fn refresh(&self) -> UiResult<()> {
        self.runtime
            .block_on(self.page.reload())
            .map_err(cdp_error)?;
        Ok(())
    }

    fn current_url(&self) -> UiResult<String> {
        let url = self.runtime.block_on(self.page.url()).map_err(cdp_error)?;
        Ok(url.unwrap_or_default())
    }

    fn resolve(&self, locator: &Locator) -> UiResult<NodeHandle> {
        let count: usize = self.eval(locator.to_count_query())?;
        match count {
            0 => Err(UiError::NotFound {
                locator: locator.to_string(),
            }),
            1 => Ok(NodeHandle::new(locator.as_str(), locator.as_str())),
            count => Err(UiError::Ambiguous {
                locator: locator.to_string(),
                count,
            }),
        }
    }

    fn is_visible(&self, node: &NodeHandle) -> UiResult<bool> {
        self.on_node(node, VISIBLE_JS)
    }

    fn is_enabled(&self, node: &NodeHandle) -> UiResult<bool> {
        self.on_node(node, ENABLED_JS)
    }

    fn is_selected(&self, node: &NodeHandle) -> UiResult<bool> {
        self.on_node(node, SELECTED_JS)
    }

    fn click(&self, node: &NodeHandle) -> UiResult<()> {
        self.on_node::<bool>(node, CLICK_JS).map(|_| ())
    }

    fn hover(&self, node: &NodeHandle) -> UiResult<()> {
        self.on_node::<bool>(node, HOVER_JS).map(|_| ())
    }

    fn set_value(&self, node: &NodeHandle, text: &str) -> UiResult<()> {
        self.on_node::<bool>(node, &set_value_js(text)).map(|_| ())
    }

    fn value(&self, node: &NodeHandle) -> UiResult<String> {
        self.on_node(node, VALUE_JS)
    }

    fn attribute(&self, node: &NodeHandle, name: &str) -> UiResult<Option<String>> {
        let reply: NodeReply<String> = self.eval(node_script(&node.id, &attribute_js(name)))?;
        if reply.found {
            Ok(reply.value)
        } else {
            Err(UiError::NotFound {
                locator: node.locator.clone(),
            })
        }
    }

    fn text(&self, node: &NodeHandle) -> UiResult<String> {
        self.on_node(node, TEXT_JS)
    }

    fn clear(&self, node: &NodeHandle) -> UiResult<()> {
        self.set_value(node, "")
    }

    fn close(&self) -> UiResult<()> {
        let browser = self
            .browser
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut browser) = browser {
            self.runtime.block_on(async {
                browser.close().await.map_err(cdp_error)?;
                browser.wait().await?;
                Ok::<_, UiError>(())
            })?;
            self.handler.abort();
            tracing::info!("browser closed");
        }
        Ok(())
    }
}

impl BrowserFixture {
    /// Fixture launching a [`ChromiumDriver`] from the browser settings
    #[must_use]
    pub fn chromium(settings: Settings) -> Self {
        Self::new(settings, |settings: &Settings| {
            let driver: Arc<dyn BrowserDriver> =
                Arc::new(ChromiumDriver::launch(&settings.browser)?);
            Ok(driver)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::BrowserKind;

    #[test]
    fn test_node_script_guards_missing_node() {
        let script = node_script("//button[@id='go']", ENABLED_JS);
        assert!(script.contains("document.evaluate(\"//button[@id='go']\""));
        assert!(script.contains("if (!n) return {found: false}"));
        assert!(script.contains("value: (!n.disabled)"));
    }

    #[test]
    fn test_set_value_escapes_text() {
        let js = set_value_js("he said \"hi\"\n");
        assert!(js.contains(r#"n.value = "he said \"hi\"\n""#));
        assert!(js.contains("'input'"));
    }

    #[test]
    fn test_attribute_js() {
        assert_eq!(attribute_js("href"), "n.getAttribute(\"href\")");
    }

    #[test]
    fn test_reply_parsing() {
        let found: NodeReply<bool> =
            serde_json::from_str(r#"{"found": true, "value": false}"#).unwrap();
        assert!(found.found);
        assert_eq!(found.value, Some(false));

        let missing: NodeReply<String> = serde_json::from_str(r#"{"found": false}"#).unwrap();
        assert!(!missing.found);
        assert!(missing.value.is_none());
    }

    #[test]
    fn test_firefox_is_unsupported() {
        let settings = BrowserSettings {
            kind: BrowserKind::Firefox,
            ..BrowserSettings::default()
        };
        assert!(matches!(
            ChromiumDriver::launch(&settings),
            Err(UiError::UnsupportedBrowser { .. })
        ));
    }

    #[test]
    fn test_bad_viewport_fails_before_launch() {
        let settings = BrowserSettings {
            size: "huge".to_string(),
            ..BrowserSettings::default()
        };
        assert!(matches!(
            ChromiumDriver::launch(&settings),
            Err(UiError::Config { .. })
        ));
    }
}
