use super::{BONUS_BOUNDARY, MatchResult, calculate_score, fold, fuzzy_index};
use crate::matcher::chars::bonus_at;

/// Substring match that prefers occurrences starting on a word boundary.
///
/// Keeps scanning after the first hit for an occurrence with a strictly
/// better boundary bonus and stops at the first perfect one.
pub fn exact_match_naive(
	case_sensitive: bool,
	text: &[char],
	pattern: &[char],
	positions: Option<&mut Vec<usize>>,
) -> Option<MatchResult> {
	let m = pattern.len();
	let n = text.len();
	if m == 0 {
		return Some(MatchResult::new(0, 0, 0));
	}
	if n < m {
		return None;
	}
	fuzzy_index(text, pattern, case_sensitive)?;

	let mut pidx = 0;
	let mut best_end = None;
	let mut bonus = 0;
	let mut best_bonus = -1;
	let mut index = 0;

	while index < n {
		let ch = fold(text[index], case_sensitive);
		if ch == fold(pattern[pidx], case_sensitive) {
			if pidx == 0 {
				bonus = bonus_at(text, index);
			}
			pidx += 1;
			if pidx == m {
				if bonus > best_bonus {
					best_end = Some(index);
					best_bonus = bonus;
				}
				if bonus >= BONUS_BOUNDARY {
					break;
				}
				// resume right after the start of this occurrence
				index -= pidx - 1;
				pidx = 0;
				bonus = 0;
			}
		} else {
			index -= pidx;
			pidx = 0;
			bonus = 0;
		}
		index += 1;
	}

	let last = best_end?;
	let start = last + 1 - m;
	let end = last + 1;
	let score = calculate_score(case_sensitive, text, pattern, start, end, None);
	if let Some(pos) = positions {
		pos.extend((start..end).rev());
	}
	Some(MatchResult::new(start, end, score))
}

/// Anchored match at the first non-space character.
///
/// Leading spaces are skipped unless the pattern itself starts with
/// whitespace.
pub fn prefix_match(
	case_sensitive: bool,
	text: &[char],
	pattern: &[char],
	positions: Option<&mut Vec<usize>>,
) -> Option<MatchResult> {
	let Some(&first) = pattern.first() else {
		return Some(MatchResult::new(0, 0, 0));
	};

	let trimmed = if first.is_whitespace() {
		0
	} else {
		text.iter().take_while(|&&ch| ch == ' ').count()
	};
	if text.len() - trimmed < pattern.len() {
		return None;
	}

	let anchored = text[trimmed..trimmed + pattern.len()]
		.iter()
		.zip(pattern)
		.all(|(&ch, &pchar)| fold(ch, case_sensitive) == fold(pchar, case_sensitive));
	if !anchored {
		return None;
	}

	let start = trimmed;
	let end = trimmed + pattern.len();
	let score = calculate_score(case_sensitive, text, pattern, start, end, None);
	if let Some(pos) = positions {
		pos.extend((start..end).rev());
	}
	Some(MatchResult::new(start, end, score))
}

/// Anchored match at the end of the text.
///
/// Trailing spaces are ignored unless the pattern itself ends with
/// whitespace. A space escaped with a backslash is kept.
pub fn suffix_match(
	case_sensitive: bool,
	text: &[char],
	pattern: &[char],
	positions: Option<&mut Vec<usize>>,
) -> Option<MatchResult> {
	let trimmed = match pattern.last() {
		Some(last) if last.is_whitespace() => text,
		_ => trim_trailing_spaces(text),
	};
	if pattern.is_empty() {
		return Some(MatchResult::new(trimmed.len(), trimmed.len(), 0));
	}
	let start = trimmed.len().checked_sub(pattern.len())?;

	let anchored = trimmed[start..]
		.iter()
		.zip(pattern)
		.all(|(&ch, &pchar)| fold(ch, case_sensitive) == fold(pchar, case_sensitive));
	if !anchored {
		return None;
	}

	let end = trimmed.len();
	let score = calculate_score(case_sensitive, trimmed, pattern, start, end, None);
	if let Some(pos) = positions {
		pos.extend((start..end).rev());
	}
	Some(MatchResult::new(start, end, score))
}

fn trim_trailing_spaces(text: &[char]) -> &[char] {
	let mut end = text.len();
	while end > 0 && text[end - 1] == ' ' && !(end > 1 && text[end - 2] == '\\') {
		end -= 1;
	}
	&text[..end]
}
