use crate::error::Result;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::Level;

/// Install the global fmt subscriber.
///
/// `verbose` forces `DEBUG`. With a log file, output goes there without ANSI
/// colouring, otherwise to stderr. A second call is a no-op.
pub fn init_logging(level: &str, verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        Level::from_str(level).unwrap_or(Level::INFO)
    };

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }

    Ok(())
}
