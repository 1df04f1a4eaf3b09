use frisk::{CaseMode, FuzzyAlgorithm};

use super::{InputSource, ResolvedConfig};

pub(super) fn print_summary(config: &ResolvedConfig) {
	println!("Effective configuration:");
	match &config.source {
		InputSource::Stdin => println!("  Input: stdin"),
		InputSource::File { path, reverse } => println!(
			"  Input: file {}{}",
			path.display(),
			if *reverse { " (reversed)" } else { "" }
		),
		InputSource::Command(command) => println!("  Input: command `{command}`"),
		InputSource::Walk(root) => println!("  Input: walk {}", root.display()),
	}
	if !config.query.is_empty() {
		println!("  Query: {}", config.query);
	}

	let search = &config.search;
	println!(
		"  Case: {}",
		match search.case_mode {
			CaseMode::Smart => "smart",
			CaseMode::Respect => "respect",
		}
	);
	println!("  Exact: {}", bool_to_word(search.exact));
	println!(
		"  Algorithm: {}",
		match search.algorithm {
			FuzzyAlgorithm::Dp => "dp",
			FuzzyAlgorithm::Greedy => "greedy",
		}
	);
	println!("  Limit: {}", search.limit);
	println!("  Min score: {}", search.min_score);
	println!("  Ranking threads: {}", search.thread_count());
	println!("  Slab capacity: {}", search.slab_capacity);
	if let Some(debounce) = search.debounce {
		println!("  Debounce: {}ms", debounce.as_millis());
	}

	if let InputSource::Walk(_) = config.source {
		let walk = &config.walk;
		println!("  Include hidden: {}", bool_to_word(walk.include_hidden));
		println!("  Follow symlinks: {}", bool_to_word(walk.follow_symlinks));
		println!(
			"  Respect ignore files: {}",
			bool_to_word(walk.respect_ignore_files)
		);
		println!("  Git ignore: {}", bool_to_word(walk.git_ignore));
		println!("  Git global: {}", bool_to_word(walk.git_global));
		println!("  Git exclude: {}", bool_to_word(walk.git_exclude));
		match walk.max_depth {
			Some(depth) => println!("  Max depth: {depth}"),
			None => println!("  Max depth: unlimited"),
		}
		match &walk.allowed_extensions {
			Some(exts) => println!("  Allowed extensions: {}", exts.join(", ")),
			None => println!("  Allowed extensions: (all)"),
		}
		if !walk.global_ignores.is_empty() {
			println!("  Global ignores: {}", walk.global_ignores.join(", "));
		}
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use frisk::{SearchOptions, WalkOptions};

	use super::*;

	#[test]
	fn bool_to_word_matches_expectations() {
		assert_eq!(bool_to_word(true), "yes");
		assert_eq!(bool_to_word(false), "no");
	}

	#[test]
	fn summary_prints_without_panic() {
		let config = ResolvedConfig {
			query: "foo".into(),
			source: InputSource::Walk(PathBuf::from("/tmp")),
			search: SearchOptions::default(),
			walk: WalkOptions {
				allowed_extensions: Some(vec!["rs".into()]),
				..WalkOptions::default()
			},
		};

		print_summary(&config);
	}
}
