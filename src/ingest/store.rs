use std::sync::Arc;

use parking_lot::RwLock;

use super::chunk::{CHUNK_CAPACITY, Chunk};

/// Owns the open chunk of one ingestion stream.
///
/// Items are appended until the chunk fills; the sealed chunk is handed back
/// so it can be published right away.
#[derive(Debug)]
pub struct ChunkBuilder<T> {
	open: Chunk<T>,
}

impl<T> Default for ChunkBuilder<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> ChunkBuilder<T> {
	pub fn new() -> Self {
		Self { open: Chunk::new() }
	}

	/// Append `item`, returning the chunk it sealed, if any.
	pub fn push(&mut self, item: T) -> Option<Chunk<T>> {
		match self.open.try_add(item) {
			Ok(()) => self.take_if_full(),
			Err(item) => {
				let mut sealed = std::mem::replace(&mut self.open, Chunk::seeded(item));
				sealed.set_complete();
				Some(sealed)
			}
		}
	}

	/// Items waiting in the open chunk.
	pub fn pending(&self) -> usize {
		self.open.len()
	}

	/// Seal whatever is left. Returns `None` when nothing is pending.
	pub fn finish(mut self) -> Option<Chunk<T>> {
		if self.open.is_empty() {
			return None;
		}
		self.open.set_complete();
		Some(self.open)
	}

	fn take_if_full(&mut self) -> Option<Chunk<T>> {
		self.open
			.is_complete()
			.then(|| std::mem::take(&mut self.open))
	}
}

/// Append-only list of sealed chunks shared between ingestion and ranking.
///
/// Every [`ChunkStore::clear`] starts a new epoch; chunks built for an older
/// epoch are refused on publication.
#[derive(Debug)]
pub struct ChunkStore<T> {
	inner: RwLock<Chunks<T>>,
}

#[derive(Debug)]
struct Chunks<T> {
	epoch: u64,
	list: Vec<Arc<Chunk<T>>>,
}

impl<T> Default for ChunkStore<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> ChunkStore<T> {
	pub fn new() -> Self {
		Self {
			inner: RwLock::new(Chunks {
				epoch: 0,
				list: Vec::new(),
			}),
		}
	}

	pub fn epoch(&self) -> u64 {
		self.inner.read().epoch
	}

	/// Publish a sealed chunk built during `epoch` and return its chunk
	/// number, or `None` when the store was cleared in the meantime.
	pub fn publish(&self, epoch: u64, chunk: Chunk<T>) -> Option<usize> {
		debug_assert!(chunk.is_complete());
		let mut inner = self.inner.write();
		if inner.epoch != epoch {
			return None;
		}
		inner.list.push(Arc::new(chunk));
		Some(inner.list.len() - 1)
	}

	/// The chunks published so far, in publication order.
	pub fn snapshot(&self) -> Vec<Arc<Chunk<T>>> {
		self.inner.read().list.clone()
	}

	pub fn chunk_count(&self) -> usize {
		self.inner.read().list.len()
	}

	pub fn item_count(&self) -> usize {
		self.inner.read().list.iter().map(|chunk| chunk.len()).sum()
	}

	/// Drop every chunk and start a new epoch, which is returned.
	pub fn clear(&self) -> u64 {
		let mut inner = self.inner.write();
		inner.list.clear();
		inner.epoch += 1;
		inner.epoch
	}
}

/// Session-wide index of the candidate in `slot` of chunk `chunk`.
pub fn item_index(chunk: usize, slot: usize) -> usize {
	chunk * CHUNK_CAPACITY + slot
}
