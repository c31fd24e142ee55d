//! The dynamic-content loading scenario.
//!
//! One fixed, linear pass over the demo page: open it, reveal the hidden
//! element through the Example 1 flow, wait for the loaded content to become
//! visible and compare its text. The decisive wait is timed separately from
//! the whole run.

use std::time::{Duration, Instant};

use chrono::Local;

use crate::driver::error::DriverError;
use crate::driver::traits::{BrowserSession, Selector};
use crate::runner::events::{EventEmitter, ScenarioEvent};
use crate::runner::state::{format_timestamp, ScenarioReport, ScenarioStatus};

pub const TARGET_URL: &str = "https://the-internet.herokuapp.com/dynamic_loading";
pub const EXPECTED_TEXT: &str = "Hello World!";

/// Scenario parameters. All values are fixed for this check; `Default`
/// carries the literals the demo page requires.
#[derive(Debug, Clone)]
pub struct DynamicLoadingScenario {
    pub url: String,
    pub expected_text: String,
    /// Time allowed for locating the link and the start button
    pub element_timeout: Duration,
    /// Time allowed for the asynchronous content reveal
    pub loading_timeout: Duration,
}

impl Default for DynamicLoadingScenario {
    fn default() -> Self {
        Self {
            url: TARGET_URL.to_string(),
            expected_text: EXPECTED_TEXT.to_string(),
            element_timeout: Duration::from_secs(10),
            loading_timeout: Duration::from_secs(30),
        }
    }
}

/// What a completed drive pass hands back for the verdict
struct DriveOutcome {
    text: String,
    wait_seconds: f64,
}

impl DynamicLoadingScenario {
    /// Run the scenario against a session and assemble the result record.
    ///
    /// Always returns a report: step failures become a `Failed` record with
    /// the error rendered into the message and duration fields unset. The
    /// start timestamp is captured before any fallible step so the failure
    /// path never lacks it.
    pub async fn run(&self, session: &dyn BrowserSession, events: &EventEmitter) -> ScenarioReport {
        let started_at = format_timestamp(Local::now());
        let run_clock = Instant::now();

        events.emit(ScenarioEvent::ScenarioStarted {
            name: "dynamic loading".to_string(),
            url: self.url.clone(),
        });

        let report = match self.drive(session, events).await {
            Ok(outcome) => {
                let total_seconds = run_clock.elapsed().as_secs_f64();
                let finished_at = format_timestamp(Local::now());

                if outcome.text == self.expected_text {
                    ScenarioReport {
                        status: ScenarioStatus::Passed,
                        message: format!(
                            "text '{}' found after {:.2}s",
                            self.expected_text, outcome.wait_seconds
                        ),
                        total_seconds: Some(total_seconds),
                        wait_seconds: Some(outcome.wait_seconds),
                        started_at,
                        finished_at,
                    }
                } else {
                    // A mismatch is a normal failed result, not an error
                    ScenarioReport {
                        status: ScenarioStatus::Failed,
                        message: format!("unexpected text: '{}'", outcome.text),
                        total_seconds: Some(total_seconds),
                        wait_seconds: Some(outcome.wait_seconds),
                        started_at,
                        finished_at,
                    }
                }
            }
            Err(err) => ScenarioReport {
                status: ScenarioStatus::Failed,
                message: format!("error during scenario: {}", err),
                total_seconds: None,
                wait_seconds: None,
                started_at,
                finished_at: format_timestamp(Local::now()),
            },
        };

        events.emit(ScenarioEvent::ScenarioFinished {
            status: report.status,
            message: report.message.clone(),
        });

        report
    }

    /// The linear step sequence. Any step error short-circuits via `?` and
    /// is turned into the failed record by `run`.
    async fn drive(
        &self,
        session: &dyn BrowserSession,
        events: &EventEmitter,
    ) -> Result<DriveOutcome, DriverError> {
        let example_link = Selector::text("Example 1");
        let start_button = Selector::css("#start button");
        let finish_heading = Selector::css("#finish h4");

        step(events, 1, "open dynamic loading page", session.goto(&self.url)).await?;

        step(
            events,
            2,
            "find 'Example 1' link",
            session.wait_for_present(&example_link, self.element_timeout),
        )
        .await?;
        step(events, 3, "click 'Example 1'", session.click(&example_link)).await?;

        step(
            events,
            4,
            "wait for start button",
            session.wait_for_clickable(&start_button, self.element_timeout),
        )
        .await?;
        step(events, 5, "click start", session.click(&start_button)).await?;

        // The decisive wait is timed on its own
        let wait_clock = Instant::now();
        step(
            events,
            6,
            "wait for loaded content",
            session.wait_for_visible(&finish_heading, self.loading_timeout),
        )
        .await?;
        let wait_seconds = wait_clock.elapsed().as_secs_f64();
        events.emit(ScenarioEvent::WaitMeasured {
            seconds: wait_seconds,
        });

        let text = step(
            events,
            7,
            "read loaded text",
            session.element_text(&finish_heading),
        )
        .await?;

        Ok(DriveOutcome { text, wait_seconds })
    }
}

/// Run one step, bracketing it with events
async fn step<T, F>(
    events: &EventEmitter,
    index: usize,
    label: &str,
    action: F,
) -> Result<T, DriverError>
where
    F: std::future::Future<Output = Result<T, DriverError>>,
{
    events.emit(ScenarioEvent::StepStarted {
        index,
        label: label.to_string(),
    });
    let clock = Instant::now();

    match action.await {
        Ok(value) => {
            events.emit(ScenarioEvent::StepPassed {
                index,
                duration_ms: clock.elapsed().as_millis() as u64,
            });
            Ok(value)
        }
        Err(err) => {
            events.emit(ScenarioEvent::StepFailed {
                index,
                error: err.to_string(),
                duration_ms: clock.elapsed().as_millis() as u64,
            });
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_scenario;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// How the fake page behaves once the start button is clicked
    #[derive(Clone)]
    enum LoadBehavior {
        /// Content becomes visible and carries this text
        Reveal(String),
        /// Content never becomes visible; the decisive wait times out
        NeverVisible,
    }

    struct FakeSession {
        behavior: LoadBehavior,
        close_calls: Arc<AtomicUsize>,
    }

    impl FakeSession {
        fn new(behavior: LoadBehavior) -> (Self, Arc<AtomicUsize>) {
            let close_calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    behavior,
                    close_calls: close_calls.clone(),
                },
                close_calls,
            )
        }
    }

    #[async_trait]
    impl BrowserSession for FakeSession {
        async fn goto(&self, _url: &str) -> Result<(), DriverError> {
            Ok(())
        }

        async fn wait_for_present(
            &self,
            _selector: &Selector,
            _timeout: Duration,
        ) -> Result<(), DriverError> {
            Ok(())
        }

        async fn wait_for_clickable(
            &self,
            _selector: &Selector,
            _timeout: Duration,
        ) -> Result<(), DriverError> {
            Ok(())
        }

        async fn wait_for_visible(
            &self,
            selector: &Selector,
            timeout: Duration,
        ) -> Result<(), DriverError> {
            match &self.behavior {
                LoadBehavior::Reveal(_) => Ok(()),
                LoadBehavior::NeverVisible => Err(DriverError::ElementNotFound {
                    selector: selector.to_playwright(),
                    condition: "visible".to_string(),
                    timeout,
                }),
            }
        }

        async fn click(&self, _selector: &Selector) -> Result<(), DriverError> {
            Ok(())
        }

        async fn element_text(&self, _selector: &Selector) -> Result<String, DriverError> {
            match &self.behavior {
                LoadBehavior::Reveal(text) => Ok(text.clone()),
                LoadBehavior::NeverVisible => Ok(String::new()),
            }
        }

        async fn close(&self) -> Result<(), DriverError> {
            self.close_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn passing_run_produces_passed_record() {
        let (session, close_calls) =
            FakeSession::new(LoadBehavior::Reveal(EXPECTED_TEXT.to_string()));
        let scenario = DynamicLoadingScenario::default();
        let events = EventEmitter::default();

        let report = run_scenario(Box::new(session), &scenario, &events).await;

        assert_eq!(report.status, ScenarioStatus::Passed);
        let wait = report.wait_seconds.expect("wait duration on success");
        let total = report.total_seconds.expect("total duration on success");
        assert!(wait >= 0.0);
        assert!(wait <= 30.0);
        assert!(total >= wait);
        assert_eq!(close_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn visibility_timeout_produces_failed_record_with_na_durations() {
        let (session, close_calls) = FakeSession::new(LoadBehavior::NeverVisible);
        let scenario = DynamicLoadingScenario::default();
        let events = EventEmitter::default();

        let report = run_scenario(Box::new(session), &scenario, &events).await;

        assert_eq!(report.status, ScenarioStatus::Failed);
        assert!(report.message.contains("did not become visible"));
        assert_eq!(report.total_seconds, None);
        assert_eq!(report.wait_seconds, None);
        assert_eq!(report.total_display(), "N/A");
        assert_eq!(report.wait_display(), "N/A");
        assert_eq!(close_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unexpected_text_is_carried_in_the_message() {
        let (session, close_calls) = FakeSession::new(LoadBehavior::Reveal("Goodbye".to_string()));
        let scenario = DynamicLoadingScenario::default();
        let events = EventEmitter::default();

        let report = run_scenario(Box::new(session), &scenario, &events).await;

        assert_eq!(report.status, ScenarioStatus::Failed);
        assert!(report.message.contains("Goodbye"));
        // The run completed; durations are real even though the text differed
        assert!(report.total_seconds.is_some());
        assert!(report.wait_seconds.is_some());
        assert_eq!(close_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn timestamps_are_populated_even_on_failure() {
        let (session, _close_calls) = FakeSession::new(LoadBehavior::NeverVisible);
        let scenario = DynamicLoadingScenario::default();
        let events = EventEmitter::default();

        let report = run_scenario(Box::new(session), &scenario, &events).await;

        assert!(!report.started_at.is_empty());
        assert!(!report.finished_at.is_empty());
    }
}
