//! Logging setup and console output helpers.
//!
//! Logs go to a JSON file (daily rolling) and, unless quiet, to a pretty
//! stdout layer. `log` crate records are bridged into `tracing`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use console::style;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log file prefix inside the log directory.
pub const LOG_FILE_NAME: &str = "pokemundo.log";

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

// ============================================================================
// Logging Initialization
// ============================================================================

/// Initialize logging with both the file layer and a stdout layer.
///
/// The returned `WorkerGuard` must be kept alive until shutdown so buffered
/// lines are flushed.
pub fn init(log_dir: &Path) -> WorkerGuard {
    install(log_dir, true)
}

/// Like [`init()`] but file only, so command output stays clean.
pub fn init_quiet(log_dir: &Path) -> WorkerGuard {
    install(log_dir, false)
}

fn install(log_dir: &Path, with_stdout: bool) -> WorkerGuard {
    let log_dir = ensure_log_dir(log_dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = default_filter();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter);

    let stdout_layer = with_stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .pretty()
            .with_filter(default_filter())
    });

    let result = tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init();
    if let Err(e) = result {
        eprintln!("Failed to initialize tracing subscriber: {}", e);
    }

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_NAME)
    );

    guard
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Creates `log_dir` if needed, falling back to `./logs`.
fn ensure_log_dir(log_dir: &Path) -> PathBuf {
    if log_dir.exists() {
        return log_dir.to_path_buf();
    }
    match fs::create_dir_all(log_dir) {
        Ok(()) => log_dir.to_path_buf(),
        Err(e) => {
            eprintln!("Failed to create logs directory {:?}: {}", log_dir, e);
            PathBuf::from("logs")
        }
    }
}

// ============================================================================
// Console Output Utilities
// ============================================================================

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", style("✔").green(), style(message).green());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✘").red(), style(message).red().bold());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow(), style(message).yellow().bold());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", style("i").blue(), style(message).blue());
}
