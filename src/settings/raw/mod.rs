use std::env;

use anyhow::Result;
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod search;
mod walk;

use search::SearchSection;
use walk::WalkSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	walk: WalkSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.search.apply_cli_overrides(cli);
		self.walk.apply_cli_overrides(cli);
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			search_case: detect_source(
				cli.case.is_some(),
				self.search.case.is_some(),
				"FRISK__SEARCH__CASE",
				"--case",
				"search.case",
			),
			search_algorithm: detect_source(
				cli.algorithm.is_some(),
				self.search.algorithm.is_some(),
				"FRISK__SEARCH__ALGORITHM",
				"--algo",
				"search.algorithm",
			),
			search_limit: detect_source(
				cli.limit.is_some(),
				self.search.limit.is_some(),
				"FRISK__SEARCH__LIMIT",
				"--limit",
				"search.limit",
			),
			search_threads: detect_source(
				cli.threads.is_some(),
				self.search.threads.is_some(),
				"FRISK__SEARCH__THREADS",
				"--threads",
				"search.threads",
			),
			search_slab_capacity: detect_source(
				false,
				self.search.slab_capacity.is_some(),
				"FRISK__SEARCH__SLAB_CAPACITY",
				"",
				"search.slab_capacity",
			),
			walk_threads: detect_source(
				cli.walk_threads.is_some(),
				self.walk.threads.is_some(),
				"FRISK__WALK__THREADS",
				"--walk-threads",
				"walk.threads",
			),
			walk_max_depth: detect_source(
				cli.max_depth.is_some(),
				self.walk.max_depth.is_some(),
				"FRISK__WALK__MAX_DEPTH",
				"--max-depth",
				"walk.max_depth",
			),
		};

		let search = self.search.resolve(&sources)?;
		let walk = self.walk.resolve();
		let config = ResolvedConfig::new(cli, search, walk)?;
		config.validate(&sources)?;

		Ok(config)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
