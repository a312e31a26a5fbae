//! Global logging system.

use std::{
    fs::File,
    path::Path,
    sync::Arc,
    env,
    panic,
};
use anyhow::*;
use backtrace::Backtrace;
use tracing_subscriber::{
    fmt::{
        self,
        time::uptime,
    },
    prelude::*,
    Registry,
    EnvFilter,
};


/// Default logging environment filter. Our crates are debug, everything else is warn.
pub const DEFAULT_FILTER: &'static str = "warn,pfmap=debug,map_editor=debug";

/// Build the filter directive string: the default, extended by `RUST_LOG` if set.
pub fn filter_directives() -> String {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Some(env_filter) = env::var(EnvFilter::DEFAULT_ENV).ok() {
        filter.push(',');
        filter.push_str(&env_filter);
    }
    filter
}

/// Initializes a `tracing` logging backend which outputs to stdout and also to `log_path`.
/// Accepts ecosystem-standard `RUST_LOG` env filters. Routes panics through the log.
pub fn init_logging(log_path: impl AsRef<Path>) -> Result<()> {
    let log_path = log_path.as_ref();

    let format = fmt::format()
        .compact()
        .with_timer(uptime())
        .with_line_number(true);
    let stdout_log = fmt::layer()
        .event_format(format);

    let log_file = File::create(log_path)
        .with_context(|| format!("unable to create log file {}", log_path.display()))?;
    let log_file_log = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    let subscriber = Registry::default()
        .with(EnvFilter::new(filter_directives()))
        .with(stdout_log)
        .with(log_file_log);
    tracing::subscriber::set_global_default(subscriber)
        .context("unable to install log subscriber")?;
    info!("starting map editor");

    // make panic messages and backtrace go through logging system
    panic::set_hook(Box::new(|info| {
        error!("{}", info);
        if env::var("RUST_BACKTRACE").map(|val| val == "1").unwrap_or(true) {
            error!("{:?}", Backtrace::new());
        }
    }));
    trace!("installed custom panic hook");
    Ok(())
}
