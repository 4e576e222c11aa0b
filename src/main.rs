//! langfile binary: query and inspect translation dictionaries from the shell.

mod args;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

use crate::args::Args;

/// Keeps the non-blocking log writer flushing until the process exits.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// `RUST_LOG` wins over the command-line level when set.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// What: Install the global tracing subscriber.
///
/// Inputs:
/// - `args`: Parsed command-line arguments (`--log-level`, `--verbose`, `--log-file`)
///
/// Details:
/// - With `--log-file` logs are appended to that file through a non-blocking writer
/// - Falls back to stderr when the file cannot be opened, so a bad path never blocks a command
fn init_logging(args: &Args) {
    let level = args::determine_log_level(args);

    let open_error = match &args.log_file {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter(&level))
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_timer(UtcTime::rfc_3339())
                    .init();
                let _ = LOG_GUARD.set(guard);
                tracing::info!(path = %path.display(), "logging initialized");
                return;
            }
            Err(e) => Some((path, e)),
        },
        None => None,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&level))
        .with_target(false)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .init();
    if let Some((path, e)) = open_error {
        tracing::warn!(path = %path.display(), error = %e, "failed to open log file; using stderr");
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    let settings = match args::resolve_settings(&args) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(error = %err, "failed to load settings");
            eprintln!("langfile: {err}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?settings, "resolved settings");
    let translator = args::build_translator(settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args::commands::run(&args.command, &translator, &mut out).and_then(|()| out.flush()) {
        Ok(()) => ExitCode::SUCCESS,
        // Output piped into `head` and friends.
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "failed to write output");
            ExitCode::FAILURE
        }
    }
}
