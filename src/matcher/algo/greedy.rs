use super::{MatchResult, calculate_score, fold, fuzzy_index};

/// Greedy fuzzy match (fzf v1).
///
/// Scans forward for the first position where the whole pattern has been
/// consumed, walks back from there to tighten the start, then scores the
/// resulting span. Linear in the text length and needs no scratch space.
pub fn fuzzy_match_v1(
	case_sensitive: bool,
	text: &[char],
	pattern: &[char],
	positions: Option<&mut Vec<usize>>,
) -> Option<MatchResult> {
	if pattern.is_empty() {
		return Some(MatchResult::new(0, 0, 0));
	}
	fuzzy_index(text, pattern, case_sensitive)?;

	let mut pidx = 0;
	let mut start = None;
	let mut end = None;
	for (index, &ch) in text.iter().enumerate() {
		if fold(ch, case_sensitive) == pattern[pidx] {
			start.get_or_insert(index);
			pidx += 1;
			if pidx == pattern.len() {
				end = Some(index + 1);
				break;
			}
		}
	}
	let (mut start, end) = (start?, end?);

	let mut pidx = pattern.len() - 1;
	for index in (start..end).rev() {
		if fold(text[index], case_sensitive) == pattern[pidx] {
			if pidx == 0 {
				start = index;
				break;
			}
			pidx -= 1;
		}
	}

	let score = calculate_score(case_sensitive, text, pattern, start, end, positions);
	Some(MatchResult::new(start, end, score))
}
