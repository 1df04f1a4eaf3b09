use thiserror::Error;

/// Default matrix-cell budget, matching fzf's 100K slab.
pub const DEFAULT_SLAB_CAPACITY: usize = 100 * 1024;

/// Integer slots reserved per matrix cell.
///
/// The DP match needs `3n + m + 2nm` integers for a pattern of length `m`
/// against `n` characters. Below the `n * m < capacity` cutover that is always
/// less than six times the capacity.
const INTS_PER_CELL: usize = 6;

/// Raised when a caller asks the slab for more scratch space than remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlabError {
	#[error("slab out of integer slots: requested {requested}, {remaining} remaining")]
	OutOfInts { requested: usize, remaining: usize },
	#[error("slab out of character slots: requested {requested}, {remaining} remaining")]
	OutOfChars { requested: usize, remaining: usize },
}

/// Fixed-size scratch arena reused across match calls.
///
/// Allocation only advances a cursor; [`Slab::reset`] rewinds it without
/// clearing memory, so callers must overwrite what they read.
#[derive(Debug, Clone)]
pub struct Slab {
	capacity: usize,
	ints: Vec<i32>,
	chars: Vec<char>,
	int_offset: usize,
	char_offset: usize,
	text: Vec<char>,
}

impl Default for Slab {
	fn default() -> Self {
		Self::new(DEFAULT_SLAB_CAPACITY)
	}
}

impl Slab {
	/// Create a slab able to hold a DP matrix of up to `capacity` cells.
	#[must_use]
	pub fn new(capacity: usize) -> Self {
		Self::with_sizes(capacity, capacity.saturating_mul(INTS_PER_CELL), capacity)
	}

	/// Create a slab with explicit buffer sizes.
	#[must_use]
	pub fn with_sizes(capacity: usize, ints: usize, chars: usize) -> Self {
		Self {
			capacity,
			ints: vec![0; ints],
			chars: vec!['\0'; chars],
			int_offset: 0,
			char_offset: 0,
			text: Vec::new(),
		}
	}

	/// Matrix-cell budget. Fuzzy matches whose `pattern * text` product
	/// reaches it fall back to the greedy algorithm.
	#[must_use]
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	#[must_use]
	pub fn remaining_ints(&self) -> usize {
		self.ints.len() - self.int_offset
	}

	#[must_use]
	pub fn remaining_chars(&self) -> usize {
		self.chars.len() - self.char_offset
	}

	pub fn alloc_int(&mut self, size: usize) -> Result<&mut [i32], SlabError> {
		let range = self.reserve_ints(size)?;
		Ok(&mut self.ints[range])
	}

	pub fn alloc_char(&mut self, size: usize) -> Result<&mut [char], SlabError> {
		let range = self.reserve_chars(size)?;
		Ok(&mut self.chars[range])
	}

	/// Allocate integer and character views at once.
	///
	/// Nothing is reserved when either request fails.
	pub fn alloc(
		&mut self,
		ints: usize,
		chars: usize,
	) -> Result<(&mut [i32], &mut [char]), SlabError> {
		if chars > self.remaining_chars() {
			return Err(SlabError::OutOfChars {
				requested: chars,
				remaining: self.remaining_chars(),
			});
		}
		let int_range = self.reserve_ints(ints)?;
		let char_range = self.reserve_chars(chars)?;
		Ok((&mut self.ints[int_range], &mut self.chars[char_range]))
	}

	/// Rewind both cursors. Memory is left as is.
	pub fn reset(&mut self) {
		self.int_offset = 0;
		self.char_offset = 0;
	}

	/// Lend the text buffer out so a candidate can be decoded into it while
	/// the slab itself stays mutably borrowable.
	pub(crate) fn take_text_buffer(&mut self) -> Vec<char> {
		std::mem::take(&mut self.text)
	}

	pub(crate) fn restore_text_buffer(&mut self, mut buffer: Vec<char>) {
		buffer.clear();
		self.text = buffer;
	}

	fn reserve_ints(&mut self, size: usize) -> Result<std::ops::Range<usize>, SlabError> {
		let remaining = self.remaining_ints();
		if size > remaining {
			return Err(SlabError::OutOfInts {
				requested: size,
				remaining,
			});
		}
		let start = self.int_offset;
		self.int_offset += size;
		Ok(start..self.int_offset)
	}

	fn reserve_chars(&mut self, size: usize) -> Result<std::ops::Range<usize>, SlabError> {
		let remaining = self.remaining_chars();
		if size > remaining {
			return Err(SlabError::OutOfChars {
				requested: size,
				remaining,
			});
		}
		let start = self.char_offset;
		self.char_offset += size;
		Ok(start..self.char_offset)
	}
}
