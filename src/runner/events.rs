use tokio::sync::broadcast;

use super::state::ScenarioStatus;

/// Scenario execution events for real-time updates
#[derive(Debug, Clone)]
pub enum ScenarioEvent {
    ScenarioStarted {
        name: String,
        url: String,
    },
    StepStarted {
        index: usize,
        label: String,
    },
    StepPassed {
        index: usize,
        duration_ms: u64,
    },
    StepFailed {
        index: usize,
        error: String,
        duration_ms: u64,
    },
    /// The decisive loading wait finished; carries the measured duration
    WaitMeasured {
        seconds: f64,
    },
    ScenarioFinished {
        status: ScenarioStatus,
        message: String,
    },
}

/// Event emitter for broadcasting scenario events.
///
/// Running without a listener is a valid state; send failures are ignored.
pub struct EventEmitter {
    sender: broadcast::Sender<ScenarioEvent>,
}

impl EventEmitter {
    pub fn new() -> (Self, broadcast::Receiver<ScenarioEvent>) {
        let (sender, receiver) = broadcast::channel(100);
        (Self { sender }, receiver)
    }

    pub fn emit(&self, event: ScenarioEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScenarioEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }
}

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration as StdDuration;

/// Console event listener for printing real-time progress
pub struct ConsoleEventListener;

impl ConsoleEventListener {
    pub async fn listen(mut receiver: broadcast::Receiver<ScenarioEvent>) {
        use colored::Colorize;
        use indicatif::ProgressDrawTarget;
        use std::io::IsTerminal;

        // Hidden draw target when piped to avoid terminal escape codes
        let multi = if std::io::stdout().is_terminal() {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        let mut spinner: Option<ProgressBar> = None;
        let mut step_text = String::new();

        while let Ok(event) = receiver.recv().await {
            match event {
                ScenarioEvent::ScenarioStarted { name, url } => {
                    multi
                        .println(format!(
                            "\n{} {}: {}",
                            "▶".green().bold(),
                            name.white().bold(),
                            url.cyan()
                        ))
                        .ok();
                }

                ScenarioEvent::StepStarted { index, label } => {
                    let pb = multi.add(ProgressBar::new_spinner());
                    let style = ProgressStyle::default_spinner()
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                        .template("    {spinner} {msg}")
                        .unwrap();
                    pb.set_style(style);

                    step_text = format!("[{}] {}... ", index, label.dimmed());
                    pb.set_message(step_text.clone());
                    pb.enable_steady_tick(StdDuration::from_millis(100));
                    spinner = Some(pb);
                }

                ScenarioEvent::StepPassed { duration_ms, .. } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    println!("    {} {}({}ms)", "✓".green(), step_text, duration_ms);
                }

                ScenarioEvent::StepFailed {
                    error, duration_ms, ..
                } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    println!("    {} {}({}ms)", "✗".red(), step_text, duration_ms);
                    println!("      {}", error.red());
                }

                ScenarioEvent::WaitMeasured { seconds } => {
                    multi
                        .println(format!("      loading wait: {:.2}s", seconds))
                        .ok();
                }

                ScenarioEvent::ScenarioFinished { status, message } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish();
                    }
                    let status_str = match status {
                        ScenarioStatus::Passed => "PASSED".green().bold(),
                        ScenarioStatus::Failed => "FAILED".red().bold(),
                    };
                    println!("\n  {} Scenario [{}] {}", "←".blue(), status_str, message);
                }
            }
        }
    }
}
