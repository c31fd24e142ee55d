//! Web session implementation using Playwright
//!
//! Launches one Chromium instance per run with the fixed flag set needed for
//! constrained environments, and exposes the bounded polling waits the
//! scenario is built on.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use playwright::api::{Browser, BrowserContext, Page, Viewport};
use playwright::Playwright;

use crate::driver::error::DriverError;
use crate::driver::traits::{BrowserSession, Selector};

/// Interval between condition checks inside a bounded wait
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Web session configuration
#[derive(Debug, Clone)]
pub struct WebSessionConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for WebSessionConfig {
    fn default() -> Self {
        let headless = std::env::var("DYNLOAD_HEADLESS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            headless,
            // Playwright has no window maximize, the viewport is sized instead
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }
}

/// Browser session backed by a Playwright-managed Chromium instance
pub struct WebSession {
    #[allow(dead_code)]
    playwright: Playwright,
    browser: Browser,
    #[allow(dead_code)]
    context: BrowserContext,
    page: Page,
}

impl WebSession {
    /// Launch a browser and open a blank page.
    ///
    /// Any failure here is an environment error: there is no retry, the run
    /// is over before it started.
    pub async fn launch(config: WebSessionConfig) -> Result<Self, DriverError> {
        let playwright = Playwright::initialize().await.map_err(|e| {
            DriverError::Environment(format!("failed to initialize Playwright: {}", e))
        })?;

        let chromium = playwright.chromium();

        // Sandboxing and /dev/shm are unavailable in container environments
        let args: Vec<String> = ["--no-sandbox", "--disable-dev-shm-usage"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let browser = chromium
            .launcher()
            .headless(config.headless)
            .args(&args)
            .launch()
            .await
            .map_err(|e| DriverError::Environment(format!("failed to launch Chromium: {}", e)))?;

        let context = browser.context_builder().build().await.map_err(|e| {
            DriverError::Environment(format!("failed to create browser context: {}", e))
        })?;

        let page = context
            .new_page()
            .await
            .map_err(|e| DriverError::Environment(format!("failed to open page: {}", e)))?;

        page.set_viewport_size(Viewport {
            width: config.viewport_width as i32,
            height: config.viewport_height as i32,
        })
        .await
        .map_err(|e| DriverError::Environment(format!("failed to size viewport: {}", e)))?;

        log::debug!(
            "browser session ready (headless: {}, viewport: {}x{})",
            config.headless,
            config.viewport_width,
            config.viewport_height
        );

        Ok(Self {
            playwright,
            browser,
            context,
            page,
        })
    }

    async fn is_present(&self, sel: &str) -> Result<bool, DriverError> {
        let found = self
            .page
            .query_selector(sel)
            .await
            .map_err(|e| DriverError::Session(e.to_string()))?;
        Ok(found.is_some())
    }

    async fn is_visible(&self, sel: &str) -> Result<bool, DriverError> {
        match self
            .page
            .query_selector(sel)
            .await
            .map_err(|e| DriverError::Session(e.to_string()))?
        {
            Some(el) => el
                .is_visible()
                .await
                .map_err(|e| DriverError::Session(e.to_string())),
            None => Ok(false),
        }
    }

    async fn is_clickable(&self, sel: &str) -> Result<bool, DriverError> {
        match self
            .page
            .query_selector(sel)
            .await
            .map_err(|e| DriverError::Session(e.to_string()))?
        {
            Some(el) => {
                let visible = el
                    .is_visible()
                    .await
                    .map_err(|e| DriverError::Session(e.to_string()))?;
                if !visible {
                    return Ok(false);
                }
                el.is_enabled()
                    .await
                    .map_err(|e| DriverError::Session(e.to_string()))
            }
            None => Ok(false),
        }
    }
}

fn wait_timeout(selector: &Selector, condition: &str, timeout: Duration) -> DriverError {
    DriverError::ElementNotFound {
        selector: selector.to_playwright(),
        condition: condition.to_string(),
        timeout,
    }
}

#[async_trait]
impl BrowserSession for WebSession {
    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        self.page
            .goto_builder(url)
            .goto()
            .await
            .map_err(|e| DriverError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for_present(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let sel = selector.to_playwright();
        let start = Instant::now();

        while start.elapsed() < timeout {
            if self.is_present(&sel).await? {
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        Err(wait_timeout(selector, "present", timeout))
    }

    async fn wait_for_clickable(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let sel = selector.to_playwright();
        let start = Instant::now();

        while start.elapsed() < timeout {
            if self.is_clickable(&sel).await? {
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        Err(wait_timeout(selector, "clickable", timeout))
    }

    async fn wait_for_visible(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let sel = selector.to_playwright();
        let start = Instant::now();

        while start.elapsed() < timeout {
            if self.is_visible(&sel).await? {
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        Err(wait_timeout(selector, "visible", timeout))
    }

    async fn click(&self, selector: &Selector) -> Result<(), DriverError> {
        let sel = selector.to_playwright();
        self.page
            .click_builder(&sel)
            .click()
            .await
            .map_err(|e| DriverError::Session(format!("failed to click '{}': {}", sel, e)))
    }

    async fn element_text(&self, selector: &Selector) -> Result<String, DriverError> {
        let sel = selector.to_playwright();
        let js = "el => el.value || el.innerText || el.textContent || ''";

        match self
            .page
            .evaluate_on_selector::<String, _>(&sel, js, None::<String>)
            .await
        {
            Ok(text) => Ok(text),
            Err(_) => Ok(String::new()),
        }
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.browser
            .close()
            .await
            .map_err(|e| DriverError::Session(format!("failed to close browser: {}", e)))
    }
}
