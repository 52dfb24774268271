//! Console and log file setup
//!
//! The console shows events only when `RUST_LOG` asks for them; user-facing
//! errors are printed by the CLI itself. Every run also appends to
//! `~/.trae-logs/plugin-installer.log`, which is never rotated.

use crate::core::path::{ensure_dir, log_dir, LOG_FILE_NAME};
use crate::core::{HelperError, HelperResult};
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Filter applied to the log file.
pub const FILE_FILTER: &str = "vsplugin_helper=info,vsplugin_core=info";

/// Install the global subscriber
///
/// The returned guard flushes the file writer on drop and must be held for
/// the rest of `main`. When the log directory cannot be created only the
/// console layer is installed.
pub fn init() -> Option<WorkerGuard> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_filter(console_filter());

    match log_dir().and_then(|dir| file_writer(&dir)) {
        Ok((writer, guard)) => {
            let file = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_filter(EnvFilter::new(FILE_FILTER));
            tracing_subscriber::registry()
                .with(console)
                .with(file)
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry().with(console).init();
            tracing::warn!("Log file disabled: {}", e);
            None
        }
    }
}

/// `RUST_LOG` if set, otherwise nothing
fn console_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy()
}

fn file_writer(
    dir: &Path,
) -> HelperResult<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    ensure_dir(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
        .map_err(|e| HelperError::Path(format!("Cannot open log file in {}: {}", dir.display(), e)))?;
    Ok(tracing_appender::non_blocking(appender))
}
