//! Query compiler.
//!
//! A query is split on unescaped spaces into terms. Space separated terms are
//! AND-ed together; terms joined with a lone `|` form an OR-group
//! ([`TermSet`]). Each term may carry a marker selecting how it is matched:
//!
//! | Token    | Match                         |
//! |----------|-------------------------------|
//! | `sbtrkt` | fuzzy                         |
//! | `'wild`  | exact (fuzzy when `--exact`)  |
//! | `^music` | prefix                        |
//! | `.mp3$`  | suffix                        |
//! | `!fire`  | inverse exact                 |
//!
//! Parsing never fails: the worst a malformed query produces is an empty
//! pattern, which matches everything.

use super::algo::MatchMode;

/// How a term decides whether to compare case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
	/// Always case-sensitive.
	Respect,
	/// Case-sensitive only when the term contains an upper-case character.
	#[default]
	Smart,
}

/// Algorithm used for plain fuzzy terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuzzyAlgorithm {
	/// Optimal alignment, quadratic in the worst case.
	#[default]
	Dp,
	/// Single forward and backward scan.
	Greedy,
}

impl FuzzyAlgorithm {
	pub(crate) fn mode(self) -> MatchMode {
		match self {
			Self::Dp => MatchMode::Fuzzy,
			Self::Greedy => MatchMode::FuzzyGreedy,
		}
	}
}

/// Options shared by every term of a parsed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternOptions {
	pub case_mode: CaseMode,
	/// Plain terms match fuzzily when set, as exact substrings otherwise.
	pub fuzzy: bool,
	pub algorithm: FuzzyAlgorithm,
}

impl Default for PatternOptions {
	fn default() -> Self {
		Self {
			case_mode: CaseMode::Smart,
			fuzzy: true,
			algorithm: FuzzyAlgorithm::Dp,
		}
	}
}

/// One literal sub-pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
	mode: MatchMode,
	inverted: bool,
	text: Vec<char>,
	original_text: String,
	case_sensitive: bool,
}

impl Term {
	pub fn mode(&self) -> MatchMode {
		self.mode
	}

	pub fn inverted(&self) -> bool {
		self.inverted
	}

	/// Characters matched against candidates, with markers stripped and
	/// already lower-cased when the term is case-insensitive.
	pub fn text(&self) -> &[char] {
		&self.text
	}

	/// The token as typed, markers included (lower-cased when insensitive).
	pub fn original_text(&self) -> &str {
		&self.original_text
	}

	pub fn case_sensitive(&self) -> bool {
		self.case_sensitive
	}
}

/// OR-group of terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet {
	terms: Vec<Term>,
}

impl TermSet {
	pub fn terms(&self) -> &[Term] {
		&self.terms
	}

	pub fn len(&self) -> usize {
		self.terms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.terms.is_empty()
	}
}

/// A compiled query: term sets AND-ed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
	term_sets: Vec<TermSet>,
	only_inv: bool,
}

impl Pattern {
	/// Compile `query` using the DP algorithm for fuzzy terms.
	pub fn parse(case_mode: CaseMode, query: &str, fuzzy: bool) -> Self {
		Self::parse_with(
			query,
			&PatternOptions {
				case_mode,
				fuzzy,
				..PatternOptions::default()
			},
		)
	}

	pub fn parse_with(query: &str, options: &PatternOptions) -> Self {
		let query = trim_trailing_spaces(query.trim_start());
		if query.is_empty() {
			return Self::default();
		}

		let fuzzy_mode = options.algorithm.mode();
		let default_mode = if options.fuzzy {
			fuzzy_mode
		} else {
			MatchMode::Exact
		};

		let escaped = query.replace("\\ ", "\t");
		let mut term_sets = Vec::new();
		let mut set = TermSet::default();
		let mut switch_set = false;
		let mut after_bar = false;

		for token in escaped.split(' ') {
			let mut text = token.replace('\t', " ");
			let lower = text.to_lowercase();
			let case_sensitive = match options.case_mode {
				CaseMode::Respect => true,
				CaseMode::Smart => text != lower,
			};
			if !case_sensitive {
				text = lower;
			}
			let original_text = text.clone();

			if !set.is_empty() && !after_bar && text == "|" {
				switch_set = false;
				after_bar = true;
				continue;
			}
			after_bar = false;

			let mut mode = default_mode;
			let mut inverted = false;
			let mut body = text.as_str();

			if let Some(rest) = body.strip_prefix('!') {
				inverted = true;
				mode = MatchMode::Exact;
				body = rest;
			}

			if body != "$" {
				if let Some(rest) = body.strip_suffix('$') {
					mode = MatchMode::Suffix;
					body = rest;
				}
			}

			if let Some(rest) = body.strip_prefix('\'') {
				mode = if options.fuzzy && !inverted {
					MatchMode::Exact
				} else {
					fuzzy_mode
				};
				body = rest;
			} else if let Some(rest) = body.strip_prefix('^') {
				mode = MatchMode::Prefix;
				body = rest;
			}

			if body.is_empty() {
				continue;
			}

			if switch_set {
				term_sets.push(std::mem::take(&mut set));
			}
			set.terms.push(Term {
				mode,
				inverted,
				text: body.chars().collect(),
				original_text,
				case_sensitive,
			});
			switch_set = true;
		}

		if !set.is_empty() {
			term_sets.push(set);
		}

		let only_inv = !term_sets.is_empty()
			&& term_sets
				.iter()
				.all(|set| set.len() == 1 && set.terms[0].inverted);

		Self {
			term_sets,
			only_inv,
		}
	}

	pub fn term_sets(&self) -> &[TermSet] {
		&self.term_sets
	}

	/// True when the query had no usable terms; such a pattern accepts
	/// every candidate.
	pub fn is_empty(&self) -> bool {
		self.term_sets.is_empty()
	}

	/// True when every term set is a single inverted term.
	pub fn only_inv(&self) -> bool {
		self.only_inv
	}
}

/// Strip trailing spaces, keeping one that is escaped with a backslash.
fn trim_trailing_spaces(query: &str) -> &str {
	let bytes = query.as_bytes();
	let mut end = bytes.len();
	while end > 0 && bytes[end - 1] == b' ' && !(end > 1 && bytes[end - 2] == b'\\') {
		end -= 1;
	}
	&query[..end]
}

#[cfg(test)]
mod tests {
	use super::*;

	fn smart(query: &str) -> Pattern {
		Pattern::parse(CaseMode::Smart, query, true)
	}

	fn text(term: &Term) -> String {
		term.text().iter().collect()
	}

	fn single(query: &str) -> Term {
		let pattern = smart(query);
		assert_eq!(pattern.term_sets().len(), 1, "{query}");
		assert_eq!(pattern.term_sets()[0].len(), 1, "{query}");
		pattern.term_sets()[0].terms()[0].clone()
	}

	#[test]
	fn plain_token_is_a_fuzzy_term() {
		let term = single("aaa");
		assert_eq!(term.mode(), MatchMode::Fuzzy);
		assert!(!term.inverted());
		assert!(!term.case_sensitive());
		assert_eq!(text(&term), "aaa");
		assert_eq!(term.original_text(), "aaa");
	}

	#[test]
	fn bang_inverts_as_exact() {
		let pattern = smart("!aaa");
		let term = &pattern.term_sets()[0].terms()[0];
		assert_eq!(term.mode(), MatchMode::Exact);
		assert!(term.inverted());
		assert_eq!(text(term), "aaa");
		assert_eq!(term.original_text(), "!aaa");
		assert!(pattern.only_inv());
	}

	#[test]
	fn dollar_anchors_only_at_the_end() {
		let suffix = single("aaa$");
		assert_eq!(suffix.mode(), MatchMode::Suffix);
		assert_eq!(text(&suffix), "aaa");

		let inner = single("aa$a");
		assert_eq!(inner.mode(), MatchMode::Fuzzy);
		assert_eq!(text(&inner), "aa$a");

		let lone = single("$");
		assert_eq!(lone.mode(), MatchMode::Fuzzy);
		assert_eq!(text(&lone), "$");
	}

	#[test]
	fn caret_anchors_only_at_the_start() {
		let prefix = single("^aaa");
		assert_eq!(prefix.mode(), MatchMode::Prefix);
		assert_eq!(text(&prefix), "aaa");

		let inner = single("a^aa");
		assert_eq!(inner.mode(), MatchMode::Fuzzy);
		assert_eq!(text(&inner), "a^aa");
	}

	#[test]
	fn quote_toggles_against_the_default_mode() {
		assert_eq!(single("'aaa").mode(), MatchMode::Exact);

		let exact_default = Pattern::parse(CaseMode::Smart, "'aaa plain", false);
		let sets = exact_default.term_sets();
		assert_eq!(sets[0].terms()[0].mode(), MatchMode::Fuzzy);
		assert_eq!(sets[1].terms()[0].mode(), MatchMode::Exact);

		let inverted = single("!'aaa");
		assert!(inverted.inverted());
		assert_eq!(inverted.mode(), MatchMode::Fuzzy);
	}

	#[test]
	fn quote_follows_the_configured_algorithm() {
		let options = PatternOptions {
			fuzzy: false,
			algorithm: FuzzyAlgorithm::Greedy,
			..PatternOptions::default()
		};
		let pattern = Pattern::parse_with("'abc", &options);
		assert_eq!(pattern.term_sets()[0].terms()[0].mode(), MatchMode::FuzzyGreedy);

		let plain = Pattern::parse_with("abc", &PatternOptions {
			algorithm: FuzzyAlgorithm::Greedy,
			..PatternOptions::default()
		});
		assert_eq!(plain.term_sets()[0].terms()[0].mode(), MatchMode::FuzzyGreedy);
	}

	#[test]
	fn escaped_space_stays_inside_the_term() {
		let term = single("a\\ aa");
		assert_eq!(text(&term), "a aa");
	}

	#[test]
	fn bar_joins_terms_into_one_set() {
		let pattern = smart("aaa | bbb");
		assert_eq!(pattern.term_sets().len(), 1);
		let terms = pattern.term_sets()[0].terms();
		assert_eq!(terms.len(), 2);
		assert_eq!(text(&terms[0]), "aaa");
		assert_eq!(text(&terms[1]), "bbb");
	}

	#[test]
	fn spaces_start_new_sets() {
		let pattern = smart("aaa bbb");
		assert_eq!(pattern.term_sets().len(), 2);
		assert!(!pattern.only_inv());

		let mixed = smart("aaa !bbb");
		assert_eq!(mixed.term_sets().len(), 2);
		assert!(mixed.term_sets()[1].terms()[0].inverted());
		assert!(!mixed.only_inv());
	}

	#[test]
	fn leading_bar_and_double_bar_are_literal_terms() {
		let leading = smart("| aaa");
		assert_eq!(leading.term_sets().len(), 2);
		assert_eq!(text(&leading.term_sets()[0].terms()[0]), "|");

		let double = smart("aaa | | bbb");
		assert_eq!(double.term_sets().len(), 2);
		assert_eq!(double.term_sets()[0].len(), 2);
		assert_eq!(text(&double.term_sets()[0].terms()[1]), "|");
	}

	#[test]
	fn smart_case_is_decided_per_token() {
		let pattern = smart("Foo bar");
		let sets = pattern.term_sets();
		assert!(sets[0].terms()[0].case_sensitive());
		assert_eq!(text(&sets[0].terms()[0]), "Foo");
		assert!(!sets[1].terms()[0].case_sensitive());

		let respect = Pattern::parse(CaseMode::Respect, "bar", true);
		assert!(respect.term_sets()[0].terms()[0].case_sensitive());
	}

	#[test]
	fn insensitive_tokens_are_lower_cased() {
		let pattern = Pattern::parse(CaseMode::Smart, "!ABC", true);
		let term = &pattern.term_sets()[0].terms()[0];
		assert!(term.case_sensitive());
		assert_eq!(text(term), "ABC");
	}

	#[test]
	fn blank_and_marker_only_queries_are_empty() {
		assert!(smart("").is_empty());
		assert!(smart("    ").is_empty());
		assert!(smart("! ^ '").is_empty());
		assert!(!smart("").only_inv());
	}

	#[test]
	fn surrounding_spaces_are_trimmed_unless_escaped() {
		assert_eq!(text(&single("  foo  ")), "foo");
		assert_eq!(text(&single("foo\\ ")), "foo ");
	}

	#[test]
	fn repeated_spaces_do_not_create_empty_sets() {
		let pattern = smart("aaa    bbb");
		assert_eq!(pattern.term_sets().len(), 2);
	}
}
