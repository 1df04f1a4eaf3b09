use std::time::Duration;

use serde::Deserialize;

use frisk::{CaseMode, FuzzyAlgorithm, SearchOptions};

use crate::cli::CliArgs;

use super::super::resolved::{ConfigError, ConfigSources};

/// Matching and ranking options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) case: Option<String>,
	pub(super) exact: Option<bool>,
	pub(super) algorithm: Option<String>,
	pub(super) limit: Option<usize>,
	pub(super) min_score: Option<i32>,
	pub(super) threads: Option<usize>,
	pub(super) debounce_ms: Option<u64>,
	pub(super) slab_capacity: Option<usize>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(case) = cli.case {
			self.case = Some(case.as_str().to_string());
		}
		if cli.exact {
			self.exact = Some(true);
		}
		if let Some(algorithm) = cli.algorithm {
			self.algorithm = Some(algorithm.as_str().to_string());
		}
		if let Some(value) = cli.limit {
			self.limit = Some(value);
		}
		if let Some(value) = cli.min_score {
			self.min_score = Some(value);
		}
		if let Some(value) = cli.threads {
			self.threads = Some(value);
		}
	}

	pub(super) fn resolve(self, sources: &ConfigSources) -> Result<SearchOptions, ConfigError> {
		let defaults = SearchOptions::default();

		let case_mode = match self.case.as_deref().map(str::trim) {
			None => defaults.case_mode,
			Some(value) if value.eq_ignore_ascii_case("smart") => CaseMode::Smart,
			Some(value) if value.eq_ignore_ascii_case("respect") => CaseMode::Respect,
			Some(value) => {
				return Err(ConfigError::invalid(
					"search.case",
					value,
					sources.source_for_case(),
					"expected `smart` or `respect`",
				));
			}
		};

		let algorithm = match self.algorithm.as_deref().map(str::trim) {
			None => defaults.algorithm,
			Some(value) if value.eq_ignore_ascii_case("dp") => FuzzyAlgorithm::Dp,
			Some(value) if value.eq_ignore_ascii_case("greedy") => FuzzyAlgorithm::Greedy,
			Some(value) => {
				return Err(ConfigError::invalid(
					"search.algorithm",
					value,
					sources.source_for_algorithm(),
					"expected `dp` or `greedy`",
				));
			}
		};

		Ok(SearchOptions {
			case_mode,
			exact: self.exact.unwrap_or(defaults.exact),
			algorithm,
			limit: self.limit.unwrap_or(defaults.limit),
			min_score: self.min_score.unwrap_or(defaults.min_score),
			threads: self.threads,
			debounce: self
				.debounce_ms
				.filter(|ms| *ms > 0)
				.map(Duration::from_millis),
			slab_capacity: self.slab_capacity.unwrap_or(defaults.slab_capacity),
		})
	}
}
