use clap::Parser;

use dynload_tester::{driver, report, runner};

#[derive(Parser)]
#[command(name = "dynload-tester")]
#[command(version = "0.1.0")]
#[command(about = "Browser automation check for dynamic content loading", long_about = None)]
struct Cli {
    /// Run the browser without a visible UI surface
    #[arg(long, default_value = "false")]
    headless: bool,

    /// Print the result record as JSON after the summary
    #[arg(long, default_value = "false")]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = driver::WebSessionConfig::default();
    if cli.headless {
        config.headless = true;
    }

    let (emitter, receiver) = runner::EventEmitter::new();
    let listener = tokio::spawn(runner::ConsoleEventListener::listen(receiver));

    // Launch failures are fatal; everything after this point always yields
    // a report and a normal exit
    let session = driver::WebSession::launch(config).await?;

    let scenario = runner::DynamicLoadingScenario::default();
    let result = runner::run_scenario(Box::new(session), &scenario, &emitter).await;

    // Dropping the emitter closes the channel so the listener drains and stops
    drop(emitter);
    let _ = listener.await;

    report::print_summary(&result);
    if cli.json {
        report::print_json(&result)?;
    }

    // Pass/fail is signaled by the printed summary only
    Ok(())
}
