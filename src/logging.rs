//! Run-scoped logging handle.
//!
//! `env_logger` is installed once in `main`; components never reach for the
//! global macros directly but log through the `RunLog` they are handed, so
//! every record of a run carries the same target.

use std::fmt;

use log::Level;

#[derive(Debug, Clone)]
pub struct RunLog {
    target: String,
}

impl RunLog {
    /// Create a logger scoped to one snapshot run of `org`.
    pub fn for_org(org: &str) -> Self {
        Self {
            target: format!("team_snapshot::{org}"),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        log::log!(target: self.target(), level, "{args}");
    }
}

/// Install the process-wide backend. `RUST_LOG` wins over the default filter.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}
