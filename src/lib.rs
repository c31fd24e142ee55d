pub mod driver;
pub mod report;
pub mod runner;

// Re-export common items
pub use driver::{BrowserSession, DriverError, Selector, WebSession, WebSessionConfig};
pub use runner::{run_scenario, DynamicLoadingScenario, ScenarioReport, ScenarioStatus};
