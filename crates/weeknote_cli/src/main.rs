//! Terminal front end for weeknote.
//!
//! # Responsibility
//! - Parse startup flags and optionally start file logging.
//! - Drive one in-memory capture session from stdin commands.
//!
//! Notes live only for the lifetime of the process.

mod app;
mod command;
mod render;

use clap::Parser;
use std::io;
use std::process::ExitCode;
use weeknote_core::{default_log_level, init_logging, parse_date, CaptureSession};

/// Week-scoped quick note capture.
#[derive(Debug, Parser)]
#[command(name = "weeknote", version)]
struct Cli {
    /// Reference date (YYYY-MM-DD) selecting the starting week; defaults to today.
    #[arg(long)]
    date: Option<String>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "WEEKNOTE_LOG_DIR")]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("weeknote: {err}");
            return ExitCode::from(2);
        }
    }

    let mut session = match cli.date.as_deref().map(parse_date) {
        Some(Ok(date)) => CaptureSession::new(date),
        Some(Err(err)) => {
            eprintln!("weeknote: {err}");
            return ExitCode::from(2);
        }
        None => CaptureSession::starting_today(),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match app::run(&mut session, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("weeknote: {err}");
            ExitCode::FAILURE
        }
    }
}
