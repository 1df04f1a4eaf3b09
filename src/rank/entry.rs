use std::cmp::Ordering;
use std::sync::Arc;

use crate::ingest::{CHUNK_CAPACITY, Chunk};

/// Something that can be searched by its display text.
pub trait Item: Send + Sync + 'static {
	fn text(&self) -> &str;
}

impl Item for String {
	fn text(&self) -> &str {
		self
	}
}

impl Item for Box<str> {
	fn text(&self) -> &str {
		self
	}
}

impl Item for Arc<str> {
	fn text(&self) -> &str {
		self
	}
}

/// A candidate that passed the score threshold, addressed by its
/// session-wide index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
	pub index: usize,
	pub score: i32,
	pub length: usize,
}

/// An [`Entry`] next to the item it refers to, as seen by comparators.
#[derive(Debug)]
pub struct Ranked<'a, T> {
	item: &'a T,
	entry: Entry,
}

impl<T> Clone for Ranked<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Ranked<'_, T> {}

impl<'a, T> Ranked<'a, T> {
	pub fn new(item: &'a T, entry: Entry) -> Self {
		Self { item, entry }
	}

	pub fn item(&self) -> &'a T {
		self.item
	}

	pub fn entry(&self) -> Entry {
		self.entry
	}

	pub fn score(&self) -> i32 {
		self.entry.score
	}

	pub fn length(&self) -> usize {
		self.entry.length
	}

	pub fn index(&self) -> usize {
		self.entry.index
	}
}

impl<'a, T: Item> Ranked<'a, T> {
	pub fn text(&self) -> &'a str {
		self.item.text()
	}
}

/// Orders two ranked candidates; `Less` sorts first.
pub type Comparator<T> = fn(&Ranked<'_, T>, &Ranked<'_, T>) -> Ordering;

/// Higher score first, then shorter, then earlier.
pub fn by_score_then_length<T>(a: &Ranked<'_, T>, b: &Ranked<'_, T>) -> Ordering {
	b.score()
		.cmp(&a.score())
		.then_with(|| a.length().cmp(&b.length()))
		.then_with(|| a.index().cmp(&b.index()))
}

/// Like [`by_score_then_length`] with an ordinal text tiebreak before the
/// insertion order.
pub fn by_score_length_then_text<T: Item>(a: &Ranked<'_, T>, b: &Ranked<'_, T>) -> Ordering {
	b.score()
		.cmp(&a.score())
		.then_with(|| a.length().cmp(&b.length()))
		.then_with(|| a.text().cmp(b.text()))
		.then_with(|| a.index().cmp(&b.index()))
}

/// Higher score first, then insertion order.
pub fn by_score_then_index<T>(a: &Ranked<'_, T>, b: &Ranked<'_, T>) -> Ordering {
	b.score()
		.cmp(&a.score())
		.then_with(|| a.index().cmp(&b.index()))
}

/// Resolve `index` against the chunks it was scored from.
///
/// Indices handed out by a pass always address an existing slot.
pub(crate) fn resolve<'a, T>(chunks: &'a [Arc<Chunk<T>>], entry: Entry) -> Ranked<'a, T> {
	let chunk = &chunks[entry.index / CHUNK_CAPACITY];
	Ranked::new(&chunk.items()[entry.index % CHUNK_CAPACITY], entry)
}
