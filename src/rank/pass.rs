//! One ranking pass over a snapshot of sealed chunks.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use frisk_stream::CancelToken;
use log::trace;
use rayon::ThreadPool;
use rayon::prelude::*;

use super::definition::QueryDefinition;
use super::entry::{Entry, Item, resolve};
use super::pool::{Scratch, ScratchPool};
use crate::ingest::{Chunk, item_index};
use crate::matcher::{Pattern, SlabError};

/// What a pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
	/// Ranked entries in final order, at most `limit` of them.
	Completed(Vec<Entry>),
	/// A newer generation started; nothing may be published.
	Cancelled,
}

/// Inputs of a ranking pass. Workers pull chunks off a shared cursor.
pub struct Pass<'a, T> {
	pub chunks: &'a [Arc<Chunk<T>>],
	pub pattern: &'a Pattern,
	/// Raw query text, used as the chunk cache key.
	pub query: &'a str,
	pub definition: &'a QueryDefinition<T>,
	pub token: &'a CancelToken,
	/// Counts candidates that passed the score threshold.
	pub scored: &'a AtomicUsize,
}

impl<T: Item> Pass<'_, T> {
	pub fn run(&self, pool: &ThreadPool, scratch: &ScratchPool) -> Result<PassOutcome, SlabError> {
		let cursor = AtomicUsize::new(0);
		let workers = pool.current_num_threads().clamp(1, self.chunks.len().max(1));

		let partials = pool.install(|| {
			(0..workers)
				.into_par_iter()
				.map(|_| self.work(&cursor, scratch))
				.collect::<Result<Vec<_>, SlabError>>()
		})?;

		let mut merged = Vec::new();
		for partial in partials {
			match partial {
				Some(entries) => merged.extend(entries),
				None => return Ok(PassOutcome::Cancelled),
			}
		}
		if self.token.is_cancelled() {
			return Ok(PassOutcome::Cancelled);
		}

		trace!(
			"pass {} merged {} candidates from {} chunks",
			self.token.id(),
			merged.len(),
			self.chunks.len()
		);
		Ok(PassOutcome::Completed(self.merge(merged)))
	}

	/// Score chunks until the cursor runs out. `None` means cancelled.
	fn work(&self, cursor: &AtomicUsize, pool: &ScratchPool) -> Result<Option<Vec<Entry>>, SlabError> {
		let mut scratch = pool.checkout();
		loop {
			if self.token.is_cancelled() {
				return Ok(None);
			}
			let number = cursor.fetch_add(1, Ordering::Relaxed);
			let Some(chunk) = self.chunks.get(number) else {
				break;
			};
			if !self.score_chunk(number, chunk, &mut scratch)? {
				return Ok(None);
			}
		}
		Ok(Some(scratch.top.drain().collect()))
	}

	/// Returns `false` when the pass was cancelled mid-chunk.
	fn score_chunk(&self, number: usize, chunk: &Chunk<T>, scratch: &mut Scratch) -> Result<bool, SlabError> {
		let slots: Box<dyn Iterator<Item = usize>> = match chunk.cached_hits(self.query) {
			Some(hits) => Box::new(hits.into_iter().map(|slot| slot as usize)),
			None => Box::new(0..chunk.len()),
		};
		let keep = self.definition.min_score.min(0);
		let compare = self.definition.comparator;
		let chunks = self.chunks;
		let mut hits = Vec::new();

		for slot in slots {
			if self.token.is_cancelled() {
				return Ok(false);
			}
			let Some(item) = chunk.get(slot) else {
				continue;
			};
			let (length, score) = (self.definition.score)(item, self.pattern, &mut scratch.slab)?;
			if score > keep {
				hits.push(slot as u32);
			}
			if score > self.definition.min_score {
				self.scored.fetch_add(1, Ordering::Relaxed);
				let entry = Entry {
					index: item_index(number, slot),
					score,
					length,
				};
				scratch
					.top
					.insert_by(entry, |a, b| compare(&resolve(chunks, *a), &resolve(chunks, *b)));
			}
		}

		chunk.store_hits(self.query, hits);
		Ok(true)
	}

	fn merge(&self, mut entries: Vec<Entry>) -> Vec<Entry> {
		let chunks = self.chunks;
		let primary = self.definition.comparator;
		entries.sort_by(|a, b| primary(&resolve(chunks, *a), &resolve(chunks, *b)));
		entries.truncate(self.definition.limit);

		let last = self.definition.final_comparator;
		entries.sort_by(|a, b| last(&resolve(chunks, *a), &resolve(chunks, *b)));
		entries
	}
}

/// The first `limit` items in chunk order, unscored.
pub fn first_items<T: Item>(chunks: &[Arc<Chunk<T>>], limit: usize) -> Vec<Entry> {
	chunks
		.iter()
		.enumerate()
		.flat_map(|(number, chunk)| {
			chunk.iter().enumerate().map(move |(slot, item)| Entry {
				index: item_index(number, slot),
				score: 0,
				length: item.text().chars().count(),
			})
		})
		.take(limit)
		.collect()
}
