use std::cmp::Ordering;

use super::entry::Entry;

/// Capacity-bounded list kept sorted by a caller-supplied order.
///
/// Inserting into a full list drops whatever falls past the limit, so the
/// list never grows beyond `limit` entries.
#[derive(Debug, Clone)]
pub struct TopK {
	entries: Vec<Entry>,
	limit: usize,
}

impl TopK {
	pub fn new(limit: usize) -> Self {
		Self {
			entries: Vec::with_capacity(limit.min(4096)),
			limit,
		}
	}

	pub fn limit(&self) -> usize {
		self.limit
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn as_slice(&self) -> &[Entry] {
		&self.entries
	}

	/// Insert `entry` after every entry that does not sort after it.
	///
	/// Returns `false` when the entry did not make the cut.
	pub fn insert_by<F>(&mut self, entry: Entry, mut compare: F) -> bool
	where
		F: FnMut(&Entry, &Entry) -> Ordering,
	{
		let at = self
			.entries
			.partition_point(|probe| compare(probe, &entry) != Ordering::Greater);
		if at >= self.limit {
			return false;
		}
		self.entries.insert(at, entry);
		self.entries.truncate(self.limit);
		true
	}

	/// Move every entry out, leaving the allocation in place.
	pub fn drain(&mut self) -> std::vec::Drain<'_, Entry> {
		self.entries.drain(..)
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}
}
