use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::model::Config;

/// Log file written inside the data directory when `debug` is on
pub const LOG_FILE: &str = "tally.log";

/// Which front end is starting; the TUI owns the terminal, so it never logs
/// to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontend {
    Cli,
    Tui,
}

/// Install the global tracing subscriber.
///
/// With `debug` on, everything at DEBUG and above is appended to
/// `<data_dir>/tally.log`. Otherwise the CLI reports warnings on stderr
/// (`RUST_LOG` can raise the level) and the TUI stays silent.
pub fn init(config: &Config, data_dir: &Path, frontend: Frontend) -> io::Result<()> {
    if config.debug {
        std::fs::create_dir_all(data_dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join(LOG_FILE))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
        return Ok(());
    }

    if frontend == Frontend::Cli {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(Level::WARN.into()),
            )
            .with_writer(io::stderr)
            .without_time()
            .try_init();
    }
    Ok(())
}
