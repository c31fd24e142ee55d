use std::time::Duration;
use thiserror::Error;

/// Failures surfaced by a browser session.
///
/// `Environment` is fatal and propagates out of setup; everything else is
/// converted into a failed scenario report by the runner.
#[derive(Debug, Error)]
pub enum DriverError {
    /// No compatible browser could be resolved or launched.
    #[error("browser environment error: {0}")]
    Environment(String),

    /// Navigation failed (network, DNS, bad URL).
    #[error("navigation to '{url}' failed: {reason}")]
    Navigation { url: String, reason: String },

    /// A bounded wait elapsed before the element reached the requested state.
    #[error("element '{selector}' did not become {condition} within {}s", .timeout.as_secs())]
    ElementNotFound {
        selector: String,
        condition: String,
        timeout: Duration,
    },

    /// The browser session broke mid-run (protocol fault, dead page).
    #[error("browser session error: {0}")]
    Session(String),
}
