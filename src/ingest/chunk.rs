use parking_lot::Mutex;

/// Number of candidates a chunk holds before it seals itself.
pub const CHUNK_CAPACITY: usize = 1000;

/// Query characters that can make a longer query match more than a shorter
/// one, which rules out narrowing a cached result.
const NON_NARROWING: [char; 4] = ['|', '!', '$', '\\'];

/// Fixed-capacity, append-then-seal batch of candidates.
///
/// Once sealed a chunk is never written again and can be shared freely
/// between scoring workers.
#[derive(Debug)]
pub struct Chunk<T> {
	items: Vec<T>,
	manually_complete: bool,
	cache: Mutex<Option<QueryCache>>,
}

#[derive(Debug, Clone)]
struct QueryCache {
	query: String,
	hits: Vec<u32>,
}

impl<T> Default for Chunk<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Chunk<T> {
	pub fn new() -> Self {
		Self {
			items: Vec::with_capacity(CHUNK_CAPACITY),
			manually_complete: false,
			cache: Mutex::new(None),
		}
	}

	pub(crate) fn seeded(item: T) -> Self {
		let mut chunk = Self::new();
		chunk.items.push(item);
		chunk
	}

	/// Append `item`, handing it back when the chunk is already sealed.
	pub fn try_add(&mut self, item: T) -> Result<(), T> {
		if self.is_complete() {
			return Err(item);
		}
		self.items.push(item);
		Ok(())
	}

	/// Seal the chunk below capacity, typically at the end of a stream.
	pub fn set_complete(&mut self) {
		self.manually_complete = true;
	}

	pub fn is_complete(&self) -> bool {
		self.manually_complete || self.items.len() >= CHUNK_CAPACITY
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn get(&self, slot: usize) -> Option<&T> {
		self.items.get(slot)
	}

	pub fn items(&self) -> &[T] {
		&self.items
	}

	pub fn iter(&self) -> std::slice::Iter<'_, T> {
		self.items.iter()
	}

	/// Slots that scored above zero for a query `query` refines.
	///
	/// Returns `None` when nothing usable is cached.
	pub fn cached_hits(&self, query: &str) -> Option<Vec<u32>> {
		if query.contains(NON_NARROWING) {
			return None;
		}
		let cache = self.cache.lock();
		let cache = cache.as_ref()?;
		query
			.starts_with(cache.query.as_str())
			.then(|| cache.hits.clone())
	}

	/// Remember which slots scored above zero for `query`.
	pub fn store_hits(&self, query: &str, hits: Vec<u32>) {
		let mut cache = self.cache.lock();
		if query.contains(NON_NARROWING) {
			*cache = None;
		} else {
			*cache = Some(QueryCache {
				query: query.to_owned(),
				hits,
			});
		}
	}
}

impl<'a, T> IntoIterator for &'a Chunk<T> {
	type Item = &'a T;
	type IntoIter = std::slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn full_chunk_rejects_the_next_item() {
		let mut chunk = Chunk::new();
		for value in 0..CHUNK_CAPACITY {
			assert!(chunk.try_add(value).is_ok());
		}
		assert!(chunk.is_complete());
		assert_eq!(chunk.try_add(CHUNK_CAPACITY), Err(CHUNK_CAPACITY));
		assert_eq!(chunk.len(), CHUNK_CAPACITY);
	}

	#[test]
	fn manual_completion_seals_below_capacity() {
		let mut chunk = Chunk::new();
		chunk.try_add("a").expect("open chunk");
		assert!(!chunk.is_complete());
		chunk.set_complete();
		assert!(chunk.is_complete());
		assert_eq!(chunk.try_add("b"), Err("b"));
		assert_eq!(chunk.iter().copied().collect::<Vec<_>>(), vec!["a"]);
	}

	#[test]
	fn cache_only_serves_refinements() {
		let chunk: Chunk<String> = Chunk::new();
		assert_eq!(chunk.cached_hits("foo"), None);

		chunk.store_hits("fo", vec![1, 4]);
		assert_eq!(chunk.cached_hits("fo"), Some(vec![1, 4]));
		assert_eq!(chunk.cached_hits("foo bar"), Some(vec![1, 4]));
		assert_eq!(chunk.cached_hits("f"), None);
		assert_eq!(chunk.cached_hits("fo | x"), None);
		assert_eq!(chunk.cached_hits("fo !x"), None);
		assert_eq!(chunk.cached_hits("fo$"), None);
		assert_eq!(chunk.cached_hits("fo\\ x"), None);
	}

	#[test]
	fn storing_a_non_narrowing_query_drops_the_cache() {
		let chunk: Chunk<String> = Chunk::new();
		chunk.store_hits("fo", vec![0]);
		chunk.store_hits("fo | ba", vec![0, 1]);
		assert_eq!(chunk.cached_hits("fo"), None);
	}
}
