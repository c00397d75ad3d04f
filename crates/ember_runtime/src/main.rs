//! Ember Runtime
//!
//! Minimal binary that boots the script runtime and makes the one call

use anyhow::{Context, Result};
use ember_script::{ScriptError, Settings};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logs go to stderr; stdout belongs to the script.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    tracing::info!("Ember v{}", ember_script::VERSION);

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            println!("fail to load func: {:#}", err);
            return ExitCode::from(1);
        }
    };

    match ember_script::run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn load_settings() -> Result<Settings> {
    Settings::discover().context("failed to load settings")
}

fn report(err: &ScriptError) -> ExitCode {
    let stage = err.stage();
    tracing::error!("{:?} stage failed", stage);

    println!("{}: {}", stage.label(), err);
    if let Some(trace) = err.trace() {
        eprintln!("{}", trace);
    }

    ExitCode::from(stage.exit_code())
}
