//! Log output for the server and the command line tool.
//!
//! The server writes compact lines to stdout and mirrors them, without colour codes, into a
//! log file: the path in `PDF_SUMMARY_LOG_FILE` when set, `logs/pdf-summary.log` otherwise.
//! The command line tool logs to stderr only so its stdout carries just the summary.
use std::{fs::OpenOptions, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_ENV: &str = "PDF_SUMMARY_LOG_FILE";
const LOG_DIR: &str = "logs";
const LOG_FILE_NAME: &str = "pdf-summary.log";

/// Flushes buffered file output when the process exits.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// `RUST_LOG` when it parses, else the given level.
fn filter_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the server subscriber (stdout, plus the log file when it can be opened).
///
/// Filtering defaults to `info`. A log file that cannot be opened is reported on stderr and
/// the server keeps running with stdout logging alone.
pub fn init_tracing() {
    let registry = tracing_subscriber::registry()
        .with(filter_or("info"))
        .with(fmt::layer().with_target(false).compact());

    match file_writer() {
        Some(writer) => registry
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .compact(),
            )
            .init(),
        None => registry.init(),
    }
}

/// Install the `summarize-pdf` subscriber: stderr only, `warn` unless `RUST_LOG` says otherwise.
pub fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(filter_or("warn"))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn file_writer() -> Option<NonBlocking> {
    let (writer, guard) = match std::env::var(LOG_FILE_ENV) {
        Ok(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|err| eprintln!("Cannot open log file {path}: {err}"))
                .ok()?;
            tracing_appender::non_blocking(file)
        }
        Err(_) => {
            std::fs::create_dir_all(LOG_DIR)
                .map_err(|err| eprintln!("Cannot create {LOG_DIR}/ for logs: {err}"))
                .ok()?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(
                LOG_DIR,
                LOG_FILE_NAME,
            ))
        }
    };
    let _ = LOG_GUARD.set(guard);
    Some(writer)
}
