//! Combines per-term matches into a candidate score and its highlight.

use super::algo::MatchResult;
use super::pattern::{Pattern, Term};
use super::slab::{Slab, SlabError};

impl Term {
	/// Match this term against `text`, ignoring inversion.
	pub fn run(
		&self,
		text: &[char],
		slab: &mut Slab,
		positions: Option<&mut Vec<usize>>,
	) -> Result<Option<MatchResult>, SlabError> {
		slab.reset();
		self.mode()
			.run(self.case_sensitive(), text, self.text(), slab, positions)
	}
}

impl Pattern {
	/// Score `text`; `0` rejects the candidate.
	///
	/// An empty pattern accepts everything with a score of `1`.
	pub fn score(&self, text: &str, slab: &mut Slab) -> Result<i32, SlabError> {
		if self.is_empty() {
			return Ok(1);
		}
		with_chars(text, slab, |chars, slab| self.score_chars(chars, slab))
	}

	pub fn score_chars(&self, text: &[char], slab: &mut Slab) -> Result<i32, SlabError> {
		if self.is_empty() {
			return Ok(1);
		}

		if self.only_inv() {
			// Every set is one inverted term: any hit rejects.
			let mut found = 0;
			for set in self.term_sets() {
				if let Some(result) = set.terms()[0].run(text, slab, None)? {
					found += result.score;
				}
			}
			return Ok(if found > 0 { 0 } else { 1 });
		}

		let mut total = 0;
		for set in self.term_sets() {
			match satisfy(set.terms(), text, slab, None)? {
				Some(score) => total += score,
				None => return Ok(0),
			}
		}
		Ok(total)
	}

	/// Matched character offsets in strictly descending order, or an empty
	/// list when the candidate is rejected.
	pub fn positions(&self, text: &str, slab: &mut Slab) -> Result<Vec<usize>, SlabError> {
		if self.is_empty() {
			return Ok(Vec::new());
		}
		with_chars(text, slab, |chars, slab| self.positions_chars(chars, slab))
	}

	pub fn positions_chars(&self, text: &[char], slab: &mut Slab) -> Result<Vec<usize>, SlabError> {
		let mut positions = Vec::new();
		for set in self.term_sets() {
			if satisfy(set.terms(), text, slab, Some(&mut positions))?.is_none() {
				return Ok(Vec::new());
			}
		}
		positions.sort_unstable_by(|a, b| b.cmp(a));
		positions.dedup();
		Ok(positions)
	}
}

/// Walk an OR-group and return the contribution of the first term that
/// satisfies it: a matching plain term, or an inverted term that does not
/// match (worth nothing).
fn satisfy(
	terms: &[Term],
	text: &[char],
	slab: &mut Slab,
	mut positions: Option<&mut Vec<usize>>,
) -> Result<Option<i32>, SlabError> {
	for term in terms {
		if term.inverted() {
			if term.run(text, slab, None)?.is_none() {
				return Ok(Some(0));
			}
		} else if let Some(result) = term.run(text, slab, positions.as_deref_mut())? {
			return Ok(Some(result.score));
		}
	}
	Ok(None)
}

fn with_chars<R>(
	text: &str,
	slab: &mut Slab,
	f: impl FnOnce(&[char], &mut Slab) -> Result<R, SlabError>,
) -> Result<R, SlabError> {
	let mut buffer = slab.take_text_buffer();
	buffer.extend(text.chars());
	let result = f(&buffer, slab);
	slab.restore_text_buffer(buffer);
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::matcher::chars::{
		BONUS_BOUNDARY, BONUS_CAMEL123, BONUS_CONSECUTIVE, BONUS_FIRST_CHAR_MULTIPLIER,
		SCORE_GAP_EXTENSION, SCORE_GAP_START, SCORE_MATCH,
	};
	use crate::matcher::pattern::CaseMode;

	fn score(query: &str, text: &str) -> i32 {
		let pattern = Pattern::parse(CaseMode::Smart, query, true);
		pattern.score(text, &mut Slab::default()).expect("slab")
	}

	fn positions(query: &str, text: &str) -> Vec<usize> {
		let pattern = Pattern::parse(CaseMode::Smart, query, true);
		pattern.positions(text, &mut Slab::default()).expect("slab")
	}

	#[test]
	fn empty_pattern_accepts_everything() {
		assert_eq!(score("", "anything"), 1);
		assert_eq!(score("   ", ""), 1);
		assert!(positions("", "anything").is_empty());
	}

	#[test]
	fn only_inverted_patterns_score_one_or_zero() {
		assert_eq!(score("!bbb", "aaa ccc"), 1);
		assert_eq!(score("!bbb", "aaabbbccc"), 0);
		assert_eq!(score("!foo !bar", "baz"), 1);
		assert_eq!(score("!foo !bar", "xbar"), 0);
	}

	#[test]
	fn prefix_term_scores_boundary_run() {
		assert_eq!(
			score("^foo", "fooBarbaz"),
			3 * SCORE_MATCH + BONUS_BOUNDARY * 2 + BONUS_BOUNDARY * BONUS_FIRST_CHAR_MULTIPLIER
		);
	}

	#[test]
	fn and_sets_add_up_and_any_failure_rejects() {
		let obz = 3 * SCORE_MATCH + BONUS_CAMEL123 + SCORE_GAP_START + 3 * SCORE_GAP_EXTENSION;
		assert_eq!(score("obz", "fooBarbaz1"), obz);
		assert_eq!(score("obz 1$", "fooBarbaz1"), obz + score("1$", "fooBarbaz1"));
		assert_eq!(score("obz qqq", "fooBarbaz1"), 0);
		assert_eq!(score("obz !bar", "fooBarbaz1"), 0);
		assert_eq!(score("obz !qux", "fooBarbaz1"), obz);
	}

	#[test]
	fn or_group_takes_the_first_satisfying_term() {
		let first = score("abc", "abc xyz");
		let second = score("xyz", "abc xyz");
		assert_eq!(score("abc | xyz", "abc xyz"), first);
		assert_eq!(score("xyz | abc", "abc xyz"), second);
		assert_eq!(score("qqq | xyz", "abc xyz"), second);
		assert_eq!(score("qqq | rrr", "abc xyz"), 0);
		// a satisfied inversion ends the group with nothing added
		assert_eq!(score("abc !qqq | xyz", "abc xyz"), first);
	}

	#[test]
	fn consecutive_run_positions_are_descending() {
		assert_eq!(
			score("abc", "aabcd"),
			3 * SCORE_MATCH + 2 * BONUS_CONSECUTIVE
		);
		assert_eq!(positions("abc", "aabcd"), vec![3, 2, 0]);
	}

	#[test]
	fn positions_follow_the_satisfying_terms() {
		assert_eq!(positions("aa", "aaa"), vec![1, 0]);
		assert_eq!(positions("aa !bb", "aaa"), vec![1, 0]);
		assert!(positions("aa !bb", "aaabb").is_empty());
		assert!(positions("qq", "aaa").is_empty());
	}

	#[test]
	fn positions_from_several_terms_are_merged() {
		assert_eq!(positions("^ab cd$", "abxcd"), vec![4, 3, 1, 0]);
		assert_eq!(positions("ab b", "ab"), vec![1, 0]);
	}

	#[test]
	fn path_highlights() {
		let path = r"c:\Users\eric\src\dotfiles\.git\logs\HEAD";
		assert_eq!(positions("dotfiles", path), (18..=25).rev().collect::<Vec<_>>());
		assert_eq!(positions("la", path), vec![39, 32]);

		let scattered = "c:\\Program Files\\dotnet\\sdk\\NuGetFallbackFolder\\microsoft.azure.keyvault.webkey\\2.0.7\\lib\\net452\\Microsoft.Azure.KeyVault.WebKey.xml";
		assert_eq!(
			positions("dotfiles", scattered),
			vec![102, 91, 86, 49, 41, 19, 18, 17]
		);
	}

	#[test]
	fn text_buffer_is_returned_to_the_slab() {
		let mut slab = Slab::default();
		let pattern = Pattern::parse(CaseMode::Smart, "foo", true);
		for text in ["foo", "xfoo", "barfoo"] {
			assert!(pattern.score(text, &mut slab).expect("slab") > 0);
		}
		assert!(slab.take_text_buffer().capacity() >= "barfoo".len());
	}
}
