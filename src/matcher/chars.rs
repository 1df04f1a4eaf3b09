//! Character classification and the bonus table shared by every algorithm.

pub const SCORE_MATCH: i32 = 16;
pub const SCORE_GAP_START: i32 = -3;
pub const SCORE_GAP_EXTENSION: i32 = -1;

/// Matching right after a delimiter, or at the very start of the text.
pub const BONUS_BOUNDARY: i32 = SCORE_MATCH / 2;
/// Matching a delimiter itself.
pub const BONUS_NON_WORD: i32 = SCORE_MATCH / 2;
/// `fooBar`, `foo123`: worth slightly less than a real boundary.
pub const BONUS_CAMEL123: i32 = BONUS_BOUNDARY + SCORE_GAP_EXTENSION;
/// Minimum bonus for a character continuing a consecutive run. Makes two
/// adjacent matches outweigh a single gap.
pub const BONUS_CONSECUTIVE: i32 = -(SCORE_GAP_START + SCORE_GAP_EXTENSION);
pub const BONUS_FIRST_CHAR_MULTIPLIER: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
	NonWord,
	Lower,
	Upper,
	Digit,
}

impl CharClass {
	/// Only ASCII decimal digits count as `Digit`. Letters without case
	/// (CJK, Arabic, ...) are treated as `Lower` so that runs of them score
	/// like words rather than like separators.
	pub fn of(ch: char) -> Self {
		if ch.is_lowercase() {
			Self::Lower
		} else if ch.is_uppercase() {
			Self::Upper
		} else if ch.is_ascii_digit() {
			Self::Digit
		} else if ch.is_alphabetic() {
			// scripts without case behave like lowercase letters
			Self::Lower
		} else {
			Self::NonWord
		}
	}
}

/// Bonus for matching a character of class `current` preceded by `prev`.
pub fn bonus_for(prev: CharClass, current: CharClass) -> i32 {
	use CharClass::*;

	match (prev, current) {
		(NonWord, Lower | Upper | Digit) => BONUS_BOUNDARY,
		(Lower, Upper) => BONUS_CAMEL123,
		(prev, Digit) if prev != Digit => BONUS_CAMEL123,
		(_, NonWord) => BONUS_NON_WORD,
		_ => 0,
	}
}

/// Bonus of the character at `index`; the first character sits on a boundary.
pub fn bonus_at(text: &[char], index: usize) -> i32 {
	if index == 0 {
		return BONUS_BOUNDARY;
	}
	bonus_for(CharClass::of(text[index - 1]), CharClass::of(text[index]))
}

/// Lower-case `ch` when matching case-insensitively.
///
/// Characters whose lowercase form spans several code points are kept as is.
#[inline]
pub fn fold(ch: char, case_sensitive: bool) -> char {
	if case_sensitive || !ch.is_uppercase() {
		return ch;
	}
	let mut lower = ch.to_lowercase();
	match (lower.next(), lower.next()) {
		(Some(single), None) => single,
		_ => ch,
	}
}
