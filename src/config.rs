//! Engine and walker options.

use std::collections::HashSet;
use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

use crate::matcher::{CaseMode, DEFAULT_SLAB_CAPACITY, FuzzyAlgorithm, PatternOptions};

/// Number of ranked results published per pass.
pub const DEFAULT_LIMIT: usize = 512;

/// Tunables for a search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
	pub case_mode: CaseMode,
	/// Match plain terms as exact substrings instead of fuzzily.
	pub exact: bool,
	pub algorithm: FuzzyAlgorithm,
	/// Maximum number of results kept per pass.
	pub limit: usize,
	/// Candidates must score strictly above this to be ranked.
	pub min_score: i32,
	/// Number of ranking workers; defaults to available parallelism.
	pub threads: Option<usize>,
	/// Quiet period to wait for after a query change before ranking.
	pub debounce: Option<Duration>,
	/// Matrix-cell budget of each worker's slab.
	pub slab_capacity: usize,
}

impl Default for SearchOptions {
	fn default() -> Self {
		Self {
			case_mode: CaseMode::Smart,
			exact: false,
			algorithm: FuzzyAlgorithm::Dp,
			limit: DEFAULT_LIMIT,
			min_score: 0,
			threads: None,
			debounce: None,
			slab_capacity: DEFAULT_SLAB_CAPACITY,
		}
	}
}

impl SearchOptions {
	pub fn pattern_options(&self) -> PatternOptions {
		PatternOptions {
			case_mode: self.case_mode,
			fuzzy: !self.exact,
			algorithm: self.algorithm,
		}
	}

	/// Resolve the effective worker count, defaulting to available parallelism.
	pub fn thread_count(&self) -> usize {
		resolve_threads(self.threads)
	}
}

/// Configuration options for the filesystem walk source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
	/// Include hidden files and directories.
	pub include_hidden: bool,
	/// Follow symbolic links during traversal.
	pub follow_symlinks: bool,
	/// Respect .ignore files.
	pub respect_ignore_files: bool,
	/// Respect .gitignore files.
	pub git_ignore: bool,
	/// Respect global gitignore settings.
	pub git_global: bool,
	/// Respect git exclude files.
	pub git_exclude: bool,
	/// Directory names to always skip.
	pub global_ignores: Vec<String>,
	/// Number of walker threads.
	pub threads: Option<usize>,
	/// Maximum directory traversal depth.
	pub max_depth: Option<usize>,
	/// File extensions to keep; everything else is skipped.
	pub allowed_extensions: Option<Vec<String>>,
}

impl Default for WalkOptions {
	fn default() -> Self {
		Self {
			include_hidden: true,
			follow_symlinks: false,
			respect_ignore_files: true,
			git_ignore: true,
			git_global: true,
			git_exclude: true,
			global_ignores: [
				".git",
				"node_modules",
				"target",
				".venv",
				"__pycache__",
			]
			.into_iter()
			.map(String::from)
			.collect(),
			threads: None,
			max_depth: None,
			allowed_extensions: None,
		}
	}
}

impl WalkOptions {
	/// Build a set of allowed extensions if configured.
	pub fn extension_filter(&self) -> Option<HashSet<String>> {
		self.allowed_extensions.as_ref().map(|extensions| {
			extensions
				.iter()
				.map(|ext| normalize_extension(ext))
				.filter(|ext| !ext.is_empty())
				.collect::<HashSet<_>>()
		})
	}

	/// Directory names to skip wherever they appear in a path.
	pub fn global_ignore_set(&self) -> HashSet<OsString> {
		self.global_ignores
			.iter()
			.map(|entry| OsString::from(entry.as_str()))
			.collect()
	}

	pub fn thread_count(&self) -> usize {
		resolve_threads(self.threads)
	}
}

/// Normalize an extension by trimming and removing leading dots.
pub fn normalize_extension(ext: &str) -> String {
	ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

fn resolve_threads(threads: Option<usize>) -> usize {
	threads
		.filter(|threads| *threads > 0)
		.unwrap_or_else(|| thread::available_parallelism().map_or(1, NonZeroUsize::get))
}
