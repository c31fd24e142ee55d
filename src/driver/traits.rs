use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::driver::error::DriverError;

/// Element selector for page elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Select by exact visible text (links, buttons)
    Text(String),
    /// Select by CSS selector
    Css(String),
}

impl Selector {
    pub fn text(text: &str) -> Self {
        Selector::Text(text.to_string())
    }

    pub fn css(css: &str) -> Self {
        Selector::Css(css.to_string())
    }

    /// Render as a Playwright selector string
    pub fn to_playwright(&self) -> String {
        match self {
            Selector::Text(text) => format!("text=\"{}\"", text),
            Selector::Css(css) => css.clone(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_playwright())
    }
}

/// One exclusively-owned browser automation session.
///
/// The runner holds the only handle, drives one scenario through it and
/// closes it on every exit path. Implementations do not need an idempotent
/// `close`; the runner guarantees exactly one call.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the page to a URL
    async fn goto(&self, url: &str) -> Result<(), DriverError>;

    /// Wait for an element to exist in the document
    async fn wait_for_present(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<(), DriverError>;

    /// Wait for an element to be visible and enabled
    async fn wait_for_clickable(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<(), DriverError>;

    /// Wait for an element to be rendered visible (non-zero size, no hidden
    /// ancestor)
    async fn wait_for_visible(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<(), DriverError>;

    /// Click an element
    async fn click(&self, selector: &Selector) -> Result<(), DriverError>;

    /// Get the text content of an element, empty string if unreadable
    async fn element_text(&self, selector: &Selector) -> Result<String, DriverError>;

    /// Release the browser
    async fn close(&self) -> Result<(), DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_selector_renders_as_playwright_text_match() {
        let sel = Selector::text("Example 1");
        assert_eq!(sel.to_playwright(), "text=\"Example 1\"");
    }

    #[test]
    fn css_selector_passes_through() {
        let sel = Selector::css("#start button");
        assert_eq!(sel.to_playwright(), "#start button");
        assert_eq!(sel.to_string(), "#start button");
    }
}
