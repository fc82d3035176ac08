//! Where genq's tracing output goes.
//!
//! Diagnostics are appended to `$XDG_STATE_HOME/genq/genq.log` so the terminal
//! only carries job progress and results. When the log file cannot be set up,
//! `init_logging_stderr` keeps warnings on the terminal instead.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "genq.log";

/// Default directives for the log file: request and poll detail from our crates.
const FILE_DIRECTIVES: &str = "info,genq=debug,genq_core=debug";

/// Default directives on the terminal, where progress lines must stay readable.
const TERMINAL_DIRECTIVES: &str = "warn";

/// Location of the log file. The state directory is created if missing.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("genq")?;
    dirs.place_state_file(LOG_FILE)
        .context("creating genq state directory")
}

/// Append-mode log file; every event writes through its own cloned handle.
struct LogFile(File);

impl LogFile {
    fn open(path: &Path) -> io::Result<Self> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(LogFile)
    }
}

/// Destination of a single event. Events go to stderr when the handle cannot be cloned.
enum LogSink {
    File(File),
    Stderr(io::Stderr),
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr(e) => e.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> LogSink {
        match self.0.try_clone() {
            Ok(f) => LogSink::File(f),
            Err(_) => LogSink::Stderr(io::stderr()),
        }
    }
}

/// `RUST_LOG` when set, otherwise `fallback`.
fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs the global subscriber writing to [`log_file_path`].
///
/// Errors leave no subscriber installed, so the caller can still use
/// [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = LogFile::open(&path).with_context(|| format!("opening {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(FILE_DIRECTIVES))
        .with_writer(file)
        .with_ansi(false)
        .init();

    tracing::info!(path = %path.display(), "genq logging started");
    Ok(())
}

/// Terminal-only subscriber: warnings and errors unless `RUST_LOG` asks for more.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(TERMINAL_DIRECTIVES))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
