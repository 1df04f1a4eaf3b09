//! Logger installation for the `frisk` binary.
//!
//! The library only talks to the `log` facade; embedders bring their own
//! backend.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable consulted for filter directives.
pub const FILTER_ENV: &str = "RUST_LOG";

/// Map the number of `-v` flags to a level. Warnings are always shown.
pub fn level_for(verbosity: u8) -> LevelFilter {
	match verbosity {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}

/// Install the stderr logger. `RUST_LOG` directives override `verbosity`.
///
/// Calling this more than once keeps the first logger.
pub fn initialize(verbosity: u8) {
	let mut builder = Builder::from_env(Env::default().filter(FILTER_ENV));
	if std::env::var_os(FILTER_ENV).is_none() {
		builder.filter_level(level_for(verbosity));
	}
	builder.format_timestamp_millis();
	if builder.try_init().is_err() {
		log::debug!("logger already installed");
	}
}
