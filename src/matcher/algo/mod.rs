//! fzf-compatible match algorithms.
//!
//! Every algorithm takes the candidate as a `char` slice and the (already
//! case-folded, when insensitive) pattern, and returns the matched span with
//! its score. Matched positions are appended to the optional output in
//! descending order.

mod dp;
mod greedy;
mod literal;

use super::chars::{
	BONUS_BOUNDARY, BONUS_CONSECUTIVE, BONUS_FIRST_CHAR_MULTIPLIER, CharClass, SCORE_GAP_EXTENSION,
	SCORE_GAP_START, SCORE_MATCH, bonus_for, fold,
};
use super::slab::{Slab, SlabError};

pub use dp::fuzzy_match_v2;
pub use greedy::fuzzy_match_v1;
pub use literal::{exact_match_naive, prefix_match, suffix_match};

/// Span and score of a successful match. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
	pub start: usize,
	pub end: usize,
	pub score: i32,
}

impl MatchResult {
	pub const fn new(start: usize, end: usize, score: i32) -> Self {
		Self { start, end, score }
	}
}

/// The closed set of algorithms a term can be matched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
	/// Optimal fuzzy alignment (fzf v2).
	Fuzzy,
	/// Greedy single pass fuzzy match (fzf v1).
	FuzzyGreedy,
	Exact,
	Prefix,
	Suffix,
}

impl MatchMode {
	pub fn run(
		self,
		case_sensitive: bool,
		text: &[char],
		pattern: &[char],
		slab: &mut Slab,
		positions: Option<&mut Vec<usize>>,
	) -> Result<Option<MatchResult>, SlabError> {
		match self {
			Self::Fuzzy => fuzzy_match_v2(case_sensitive, text, pattern, slab, positions),
			Self::FuzzyGreedy => Ok(fuzzy_match_v1(case_sensitive, text, pattern, positions)),
			Self::Exact => Ok(exact_match_naive(case_sensitive, text, pattern, positions)),
			Self::Prefix => Ok(prefix_match(case_sensitive, text, pattern, positions)),
			Self::Suffix => Ok(suffix_match(case_sensitive, text, pattern, positions)),
		}
	}

	pub fn is_fuzzy(self) -> bool {
		matches!(self, Self::Fuzzy | Self::FuzzyGreedy)
	}
}

/// Cheap subsequence check.
///
/// Returns the index just before the first occurrence of the pattern's first
/// character (or 0), so the caller can derive the character class preceding
/// the match.
pub(crate) fn fuzzy_index(text: &[char], pattern: &[char], case_sensitive: bool) -> Option<usize> {
	let mut index = 0;
	let mut first = 0;

	for (pidx, &pchar) in pattern.iter().enumerate() {
		let pchar = fold(pchar, case_sensitive);
		let found = text[index..]
			.iter()
			.position(|&ch| fold(ch, case_sensitive) == pchar)?
			+ index;
		if pidx == 0 && found > 0 {
			first = found - 1;
		}
		index = found + 1;
	}

	Some(first)
}

/// Score the `[start, end)` span of `text` against `pattern`.
///
/// Matched offsets are appended to `positions` in descending order.
pub(crate) fn calculate_score(
	case_sensitive: bool,
	text: &[char],
	pattern: &[char],
	start: usize,
	end: usize,
	positions: Option<&mut Vec<usize>>,
) -> i32 {
	let mut pidx = 0;
	let mut score = 0;
	let mut consecutive = 0;
	let mut in_gap = false;
	let mut first_bonus = 0;
	let mut prev_class = if start > 0 {
		CharClass::of(text[start - 1])
	} else {
		CharClass::NonWord
	};

	let mut positions = positions;
	let mark = positions.as_ref().map_or(0, |pos| pos.len());

	for (index, &ch) in text.iter().enumerate().take(end).skip(start) {
		let class = CharClass::of(ch);
		if pidx < pattern.len() && fold(ch, case_sensitive) == pattern[pidx] {
			if let Some(pos) = positions.as_deref_mut() {
				pos.push(index);
			}
			score += SCORE_MATCH;
			let mut bonus = bonus_for(prev_class, class);
			if consecutive == 0 {
				first_bonus = bonus;
			} else {
				if bonus == BONUS_BOUNDARY {
					first_bonus = bonus;
				}
				bonus = bonus.max(first_bonus).max(BONUS_CONSECUTIVE);
			}

			if pidx == 0 {
				score += bonus * BONUS_FIRST_CHAR_MULTIPLIER;
			} else {
				score += bonus;
			}
			in_gap = false;
			consecutive += 1;
			pidx += 1;
		} else {
			score += if in_gap {
				SCORE_GAP_EXTENSION
			} else {
				SCORE_GAP_START
			};
			in_gap = true;
			consecutive = 0;
			first_bonus = 0;
		}
		prev_class = class;
	}

	if let Some(pos) = positions {
		pos[mark..].reverse();
	}

	score
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chars(text: &str) -> Vec<char> {
		text.chars().collect()
	}

	#[test]
	fn fuzzy_index_points_before_first_occurrence() {
		let text = chars("xxabc");
		assert_eq!(fuzzy_index(&text, &chars("ac"), true), Some(1));
		assert_eq!(fuzzy_index(&text, &chars("xc"), true), Some(0));
		assert_eq!(fuzzy_index(&text, &chars("ca"), true), None);
		assert_eq!(fuzzy_index(&text, &chars("ABC"), false), Some(1));
		assert_eq!(fuzzy_index(&text, &chars("ABC"), true), None);
	}

	#[test]
	fn span_score_collects_descending_positions() {
		let text = chars("foobar fb");
		let mut positions = vec![99];
		let score = calculate_score(false, &text, &chars("fb"), 0, 4, Some(&mut positions));
		assert_eq!(positions, vec![99, 3, 0]);
		assert_eq!(
			score,
			SCORE_MATCH * 2 + BONUS_BOUNDARY * BONUS_FIRST_CHAR_MULTIPLIER + SCORE_GAP_START
				+ SCORE_GAP_EXTENSION
		);
	}

	#[test]
	fn modes_dispatch_to_their_algorithm() {
		let mut slab = Slab::default();
		let text = chars("fooBarbaz");
		let run = |mode: MatchMode, pattern: &str, slab: &mut Slab| {
			mode.run(false, &text, &chars(pattern), slab, None)
				.expect("slab")
				.map(|result| (result.start, result.end))
		};

		assert_eq!(run(MatchMode::Prefix, "foo", &mut slab), Some((0, 3)));
		assert_eq!(run(MatchMode::Suffix, "baz", &mut slab), Some((6, 9)));
		assert_eq!(run(MatchMode::Exact, "bar", &mut slab), Some((3, 6)));
		assert_eq!(run(MatchMode::Prefix, "bar", &mut slab), None);
		assert!(run(MatchMode::Fuzzy, "fbz", &mut slab).is_some());
		assert!(run(MatchMode::FuzzyGreedy, "fbz", &mut slab).is_some());
		assert!(MatchMode::FuzzyGreedy.is_fuzzy());
		assert!(!MatchMode::Suffix.is_fuzzy());
	}
}
