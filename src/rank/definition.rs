use std::fmt;

use super::entry::{Comparator, Item, by_score_length_then_text, by_score_then_length};
use crate::config::SearchOptions;
use crate::matcher::{Pattern, PatternOptions, Slab, SlabError};

/// Maps an item to its display length and score under a pattern.
pub type ScoreFn<T> = fn(&T, &Pattern, &mut Slab) -> Result<(usize, i32), SlabError>;

/// Computes highlighted character offsets of an item, in descending order.
pub type HighlightFn<T> = fn(&T, &Pattern, &mut Slab) -> Result<Vec<usize>, SlabError>;

/// How a session scores, orders, and highlights its items.
pub struct QueryDefinition<T> {
	/// Candidates must score strictly above this.
	pub min_score: i32,
	/// Order used while collecting per-worker results.
	pub comparator: Comparator<T>,
	/// Order of the published result set.
	pub final_comparator: Comparator<T>,
	pub score: ScoreFn<T>,
	/// Falls back to [`Pattern::positions`] over the item text.
	pub highlight: Option<HighlightFn<T>>,
	pub limit: usize,
	pub pattern: PatternOptions,
}

impl<T> Clone for QueryDefinition<T> {
	fn clone(&self) -> Self {
		Self {
			min_score: self.min_score,
			comparator: self.comparator,
			final_comparator: self.final_comparator,
			score: self.score,
			highlight: self.highlight,
			limit: self.limit,
			pattern: self.pattern,
		}
	}
}

impl<T> fmt::Debug for QueryDefinition<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("QueryDefinition")
			.field("min_score", &self.min_score)
			.field("highlight", &self.highlight.is_some())
			.field("limit", &self.limit)
			.field("pattern", &self.pattern)
			.finish_non_exhaustive()
	}
}

impl<T: Item> Default for QueryDefinition<T> {
	fn default() -> Self {
		Self::from_options(&SearchOptions::default())
	}
}

impl<T: Item> QueryDefinition<T> {
	/// Default scoring and ordering with thresholds taken from `options`.
	pub fn from_options(options: &SearchOptions) -> Self {
		Self {
			min_score: options.min_score,
			comparator: by_score_then_length,
			final_comparator: by_score_length_then_text,
			score: score_text,
			highlight: None,
			limit: options.limit,
			pattern: options.pattern_options(),
		}
	}

	pub(crate) fn highlight(
		&self,
		item: &T,
		pattern: &Pattern,
		slab: &mut Slab,
	) -> Result<Vec<usize>, SlabError> {
		match self.highlight {
			Some(highlight) => highlight(item, pattern, slab),
			None => pattern.positions(item.text(), slab),
		}
	}
}

/// Default [`ScoreFn`]: character length of the text and its pattern score.
pub fn score_text<T: Item>(item: &T, pattern: &Pattern, slab: &mut Slab) -> Result<(usize, i32), SlabError> {
	let text = item.text();
	Ok((text.chars().count(), pattern.score(text, slab)?))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::matcher::CaseMode;

	#[test]
	fn defaults_follow_search_options() {
		let options = SearchOptions {
			min_score: 7,
			limit: 20,
			exact: true,
			..SearchOptions::default()
		};
		let definition: QueryDefinition<String> = QueryDefinition::from_options(&options);
		assert_eq!(definition.min_score, 7);
		assert_eq!(definition.limit, 20);
		assert!(!definition.pattern.fuzzy);
		assert!(definition.highlight.is_none());
	}

	#[test]
	fn default_score_counts_characters() {
		let pattern = Pattern::parse(CaseMode::Smart, "é", true);
		let mut slab = Slab::default();
		let (length, score) = score_text(&String::from("café"), &pattern, &mut slab).expect("slab");
		assert_eq!(length, 4);
		assert!(score > 0);
	}

	#[test]
	fn highlight_defaults_to_pattern_positions() {
		let definition: QueryDefinition<String> = QueryDefinition::default();
		let pattern = Pattern::parse(CaseMode::Smart, "ab", true);
		let mut slab = Slab::default();
		let positions = definition
			.highlight(&String::from("xab"), &pattern, &mut slab)
			.expect("slab");
		assert_eq!(positions, vec![2, 1]);
	}
}
