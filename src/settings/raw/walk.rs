use serde::Deserialize;

use frisk::WalkOptions;
use frisk::config::normalize_extension;

use crate::cli::CliArgs;

/// Directory walk options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct WalkSection {
	pub(super) include_hidden: Option<bool>,
	pub(super) follow_symlinks: Option<bool>,
	pub(super) respect_ignore_files: Option<bool>,
	pub(super) git_ignore: Option<bool>,
	pub(super) git_global: Option<bool>,
	pub(super) git_exclude: Option<bool>,
	pub(super) threads: Option<usize>,
	pub(super) max_depth: Option<usize>,
	pub(super) allowed_extensions: Option<Vec<String>>,
	pub(super) global_ignores: Option<Vec<String>>,
}

impl WalkSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(value) = cli.hidden {
			self.include_hidden = Some(value);
		}
		if let Some(value) = cli.follow_symlinks {
			self.follow_symlinks = Some(value);
		}
		if let Some(value) = cli.respect_ignore_files {
			self.respect_ignore_files = Some(value);
		}
		if let Some(value) = cli.git_ignore {
			self.git_ignore = Some(value);
		}
		if let Some(value) = cli.git_global {
			self.git_global = Some(value);
		}
		if let Some(value) = cli.git_exclude {
			self.git_exclude = Some(value);
		}
		if let Some(value) = cli.walk_threads {
			self.threads = Some(value);
		}
		if let Some(value) = cli.max_depth {
			self.max_depth = Some(value);
		}
		if let Some(value) = &cli.extensions {
			self.allowed_extensions = Some(value.clone());
		}
		if let Some(value) = &cli.global_ignores {
			self.global_ignores = Some(value.clone());
		}
	}

	pub(super) fn resolve(self) -> WalkOptions {
		let defaults = WalkOptions::default();
		WalkOptions {
			include_hidden: self.include_hidden.unwrap_or(defaults.include_hidden),
			follow_symlinks: self.follow_symlinks.unwrap_or(defaults.follow_symlinks),
			respect_ignore_files: self
				.respect_ignore_files
				.unwrap_or(defaults.respect_ignore_files),
			git_ignore: self.git_ignore.unwrap_or(defaults.git_ignore),
			git_global: self.git_global.unwrap_or(defaults.git_global),
			git_exclude: self.git_exclude.unwrap_or(defaults.git_exclude),
			threads: self.threads,
			max_depth: self.max_depth,
			allowed_extensions: self
				.allowed_extensions
				.map(sanitize_extensions)
				.filter(|exts| !exts.is_empty()),
			global_ignores: self.global_ignores.unwrap_or(defaults.global_ignores),
		}
	}
}

/// Normalize and deduplicate file extensions, keeping their order.
fn sanitize_extensions(values: Vec<String>) -> Vec<String> {
	let mut cleaned: Vec<String> = Vec::new();
	for value in values {
		let normalized = normalize_extension(&value);
		if !normalized.is_empty() && !cleaned.contains(&normalized) {
			cleaned.push(normalized);
		}
	}
	cleaned
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extensions_are_cleaned_and_deduplicated() {
		let cleaned =
			sanitize_extensions(vec![" .RS ".into(), "rs".into(), "".into(), ".Txt".into()]);
		assert_eq!(cleaned, vec!["rs", "txt"]);
	}

	#[test]
	fn empty_extension_list_means_all() {
		let section = WalkSection {
			allowed_extensions: Some(vec![".".into()]),
			..WalkSection::default()
		};
		assert_eq!(section.resolve().allowed_extensions, None);
	}
}
