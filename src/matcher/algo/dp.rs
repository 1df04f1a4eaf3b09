use super::greedy::fuzzy_match_v1;
use super::{
	BONUS_BOUNDARY, BONUS_CONSECUTIVE, BONUS_FIRST_CHAR_MULTIPLIER, CharClass, MatchResult,
	SCORE_GAP_EXTENSION, SCORE_GAP_START, SCORE_MATCH, Slab, SlabError, bonus_for, fold,
	fuzzy_index,
};

/// Optimal fuzzy match (fzf v2).
///
/// Fills a Smith-Waterman style score matrix over the narrowest span that can
/// hold the pattern and backtracks from the best cell in the last row. Falls
/// back to [`fuzzy_match_v1`] when the matrix would not fit in `slab`.
pub fn fuzzy_match_v2(
	case_sensitive: bool,
	text: &[char],
	pattern: &[char],
	slab: &mut Slab,
	positions: Option<&mut Vec<usize>>,
) -> Result<Option<MatchResult>, SlabError> {
	let m = pattern.len();
	if m == 0 {
		return Ok(Some(MatchResult::new(0, 0, 0)));
	}
	if text.len().saturating_mul(m) >= slab.capacity() {
		return Ok(fuzzy_match_v1(case_sensitive, text, pattern, positions));
	}

	let Some(min_idx) = fuzzy_index(text, pattern, case_sensitive) else {
		return Ok(None);
	};

	// Everything below works on offsets relative to `min_idx`.
	let text = &text[min_idx..];
	let n = text.len();
	let (ints, folded) = slab.alloc(3 * n + m + 2 * n * m, n)?;
	let (h0, rest) = ints.split_at_mut(n);
	let (c0, rest) = rest.split_at_mut(n);
	let (bonuses, rest) = rest.split_at_mut(n);
	let (first_occ, matrix) = rest.split_at_mut(m);

	// Phase 1: fold the text, compute bonuses and the first row, and find the
	// first occurrence of every pattern character.
	let mut max_score = 0;
	let mut max_pos = 0;
	let mut pidx = 0;
	let mut last_idx = 0;
	let first_char = pattern[0];
	let mut pchar = pattern[0];
	let mut prev_h0 = 0;
	// A non-zero `min_idx` sits one before the first occurrence: only its class
	// feeds the scores, never its own bonus.
	let mut prev_class = CharClass::NonWord;
	let mut in_gap = false;

	for (off, &raw) in text.iter().enumerate() {
		let class = CharClass::of(raw);
		let ch = fold(raw, case_sensitive);
		folded[off] = ch;
		let bonus = bonus_for(prev_class, class);
		bonuses[off] = bonus;
		prev_class = class;

		if ch == pchar {
			if pidx < m {
				first_occ[pidx] = off as i32;
				pidx += 1;
				pchar = pattern[pidx.min(m - 1)];
			}
			last_idx = off;
		}

		if ch == first_char {
			let score = SCORE_MATCH + bonus * BONUS_FIRST_CHAR_MULTIPLIER;
			h0[off] = score;
			c0[off] = 1;
			if m == 1 && score > max_score {
				max_score = score;
				max_pos = off;
				if bonus >= BONUS_BOUNDARY {
					break;
				}
			}
			in_gap = false;
		} else {
			let gap = if in_gap {
				SCORE_GAP_EXTENSION
			} else {
				SCORE_GAP_START
			};
			h0[off] = (prev_h0 + gap).max(0);
			c0[off] = 0;
			in_gap = true;
		}
		prev_h0 = h0[off];
	}

	if pidx != m {
		return Ok(None);
	}

	if m == 1 {
		if let Some(pos) = positions {
			pos.push(min_idx + max_pos);
		}
		return Ok(Some(MatchResult::new(
			min_idx + max_pos,
			min_idx + max_pos + 1,
			max_score,
		)));
	}

	// Phase 2: fill the score (H) and consecutive-run (C) matrices, one row
	// per pattern character, columns spanning [f0, last_idx].
	let f0 = first_occ[0] as usize;
	let width = last_idx - f0 + 1;
	let (h, rest) = matrix.split_at_mut(width * m);
	let c = &mut rest[..width * m];
	h.fill(0);
	c.fill(0);
	h[..width].copy_from_slice(&h0[f0..=last_idx]);
	c[..width].copy_from_slice(&c0[f0..=last_idx]);

	for (i, &pchar) in pattern.iter().enumerate().skip(1) {
		let f = first_occ[i] as usize;
		let row = i * width;
		let mut in_gap = false;

		for col in f..=last_idx {
			let j = col - f0;
			let left = h[row + j - 1];
			let s2 = left
				+ if in_gap {
					SCORE_GAP_EXTENSION
				} else {
					SCORE_GAP_START
				};

			let mut s1 = 0;
			let mut consecutive = 0;
			if folded[col] == pchar {
				let diag = row - width + j - 1;
				s1 = h[diag] + SCORE_MATCH;
				let mut bonus = bonuses[col];
				consecutive = c[diag] + 1;
				if bonus == BONUS_BOUNDARY {
					consecutive = 1;
				} else if consecutive > 1 {
					let run_start = col + 1 - consecutive as usize;
					bonus = bonus.max(BONUS_CONSECUTIVE.max(bonuses[run_start]));
				}

				if s1 + bonus < s2 {
					s1 += bonuses[col];
					consecutive = 0;
				} else {
					s1 += bonus;
				}
			}

			c[row + j] = consecutive;
			in_gap = s1 < s2;
			let score = s1.max(s2).max(0);
			if i == m - 1 && score > max_score {
				max_score = score;
				max_pos = col;
			}
			h[row + j] = score;
		}
	}

	// Phase 3: backtrack from the best cell, preferring a match over a gap on
	// ties unless the current cell continues a longer run.
	let mut i = m - 1;
	let mut col = max_pos;
	let mut prefer_match = true;
	let mut positions = positions;
	loop {
		let row = i * width;
		let j = col - f0;
		let f = first_occ[i] as usize;
		let s = h[row + j];
		let s1 = if i > 0 && col >= f {
			h[row - width + j - 1]
		} else {
			0
		};
		let s2 = if col > f { h[row + j - 1] } else { 0 };

		if s > s1 && (s > s2 || (s == s2 && prefer_match)) {
			if let Some(pos) = positions.as_deref_mut() {
				pos.push(min_idx + col);
			}
			if i == 0 {
				break;
			}
			i -= 1;
		}

		let below = row + width + j + 1;
		prefer_match = c[row + j] > 1 || (below < c.len() && c[below] > 0);
		col -= 1;
	}

	Ok(Some(MatchResult::new(
		min_idx + col,
		min_idx + max_pos + 1,
		max_score,
	)))
}
