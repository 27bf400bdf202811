use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `RUST_LOG` is given.
///
/// Warnings only, so normal runs print nothing but the report.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the log filter.
///
/// An explicit level wins over `RUST_LOG`. Accepts a bare level ("error",
/// "warn", "info", "debug", "trace") or any full `EnvFilter` directive.
pub fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| anyhow!("invalid log level '{level}': {e}")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Initializes logging. Call once at startup.
///
/// - Without a log file, records go to stderr so they never mix with the
///   report on stdout; colored when stderr is a terminal.
/// - With a log file, records are appended to it without color.
pub fn init_logging(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder
            .with_ansi(io::stderr().is_terminal())
            .without_time()
            .with_writer(io::stderr)
            .try_init(),
    };

    installed.map_err(|e| anyhow!("logging already initialized: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_filter_accepts_bare_level() {
        let filter = make_filter(Some("debug"));

        assert!(filter.is_ok());
    }

    #[test]
    fn make_filter_accepts_directives() {
        let filter = make_filter(Some("aid_core=trace,warn"));

        assert!(filter.is_ok());
    }

    #[test]
    fn make_filter_rejects_garbage() {
        let error = make_filter(Some("aid_core=loud")).unwrap_err();

        assert!(error.to_string().starts_with("invalid log level 'aid_core=loud'"));
    }
}
