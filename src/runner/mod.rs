pub mod events;
pub mod scenario;
pub mod state;

pub use events::*;
pub use scenario::DynamicLoadingScenario;
pub use state::*;

use crate::driver::traits::BrowserSession;

/// Run the scenario against an owned session.
///
/// The session is released exactly once, no matter how the scenario ended.
/// A close failure is logged and never escalated; the report is already
/// assembled at that point.
pub async fn run_scenario(
    session: Box<dyn BrowserSession>,
    scenario: &DynamicLoadingScenario,
    events: &EventEmitter,
) -> ScenarioReport {
    let report = scenario.run(session.as_ref(), events).await;

    if let Err(err) = session.close().await {
        log::warn!("failed to close browser session: {}", err);
    }

    report
}
