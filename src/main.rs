use std::io;
use std::process::ExitCode;
use todo_list_manager::config::Settings;
use todo_list_manager::planner::{Planner, TerminalPrompter};
use todo_list_manager::Result;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "session ended");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let settings = Settings::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if !settings.color {
        colored::control::set_override(false);
    }

    tracing::debug!(?settings, "starting session");

    let mut planner = Planner::new(TerminalPrompter::new(), io::stdout(), settings);
    planner.run()
}
