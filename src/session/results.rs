use std::sync::Arc;

use frisk_stream::StreamEnvelope;

use crate::ingest::{CHUNK_CAPACITY, Chunk};
use crate::rank::{Entry, Item};

/// How a published result set was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
	/// The query was empty: items in arrival order, unscored.
	Listing,
	/// Items ranked against the query.
	Ranked,
}

/// One published result: the backing item, its rank data, and highlight.
#[derive(Debug)]
pub struct ResultItem<T> {
	chunk: Arc<Chunk<T>>,
	entry: Entry,
	positions: Vec<usize>,
}

impl<T> Clone for ResultItem<T> {
	fn clone(&self) -> Self {
		Self {
			chunk: Arc::clone(&self.chunk),
			entry: self.entry,
			positions: self.positions.clone(),
		}
	}
}

impl<T> ResultItem<T> {
	pub(crate) fn new(chunk: Arc<Chunk<T>>, entry: Entry, positions: Vec<usize>) -> Self {
		Self {
			chunk,
			entry,
			positions,
		}
	}

	pub fn item(&self) -> &T {
		&self.chunk.items()[self.entry.index % CHUNK_CAPACITY]
	}

	pub fn score(&self) -> i32 {
		self.entry.score
	}

	/// Session-wide index in arrival order.
	pub fn index(&self) -> usize {
		self.entry.index
	}

	/// Highlighted character offsets, descending.
	pub fn positions(&self) -> &[usize] {
		&self.positions
	}
}

impl<T: Item> ResultItem<T> {
	pub fn text(&self) -> &str {
		self.item().text()
	}
}

/// Ordered, capped outcome of one completed pass.
#[derive(Debug)]
pub struct ResultSet<T> {
	pub generation: u64,
	pub query: String,
	pub kind: PassKind,
	pub items: Vec<ResultItem<T>>,
	/// Selection carried over from the previous result set.
	pub selected: Option<usize>,
	pub items_read: usize,
	pub items_scored: usize,
}

impl<T> ResultSet<T> {
	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&ResultItem<T>> {
		self.items.get(index)
	}

	pub fn selected_item(&self) -> Option<&ResultItem<T>> {
		self.selected.and_then(|index| self.items.get(index))
	}
}

/// Message published after every completed pass. `id` is the query
/// generation; `complete` is set once ingestion had finished when the pass
/// started.
pub type ResultUpdate<T> = StreamEnvelope<PassKind, Arc<ResultSet<T>>>;

/// Keep `previous` when it still addresses a result, otherwise fall back to
/// the first one.
pub(crate) fn carry_selection(previous: Option<usize>, len: usize) -> Option<usize> {
	match previous {
		_ if len == 0 => None,
		Some(index) if index < len => Some(index),
		_ => Some(0),
	}
}
