use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::sync::mpsc::Sender;
use std::time::Instant;

use frisk_stream::{CancelToken, DataStream};
use log::{debug, error};
use rayon::ThreadPool;

use super::Shared;
use super::results::{PassKind, ResultItem, ResultSet, ResultUpdate};
use crate::ingest::{CHUNK_CAPACITY, Chunk};
use crate::matcher::{Pattern, Slab, SlabError};
use crate::rank::{Entry, Item, Pass, PassOutcome, QueryDefinition, ScratchPool, first_items};

/// Orchestration loop: one pass per coalesced restart signal until closed.
pub(super) fn run<T: Item>(shared: &Shared<T>, pool: &ThreadPool, tx: &Sender<ResultUpdate<T>>) {
	let scratch = ScratchPool::new(
		shared.options.slab_capacity,
		shared.definition.limit,
		pool.current_num_threads(),
	);
	let mut positions = Slab::new(shared.options.slab_capacity);
	let mut receiver_gone = false;

	while shared.signal.wait() {
		if let Some(window) = shared.options.debounce {
			if !shared.signal.settle(window) {
				break;
			}
		}

		let (token, query) = {
			let query = shared.query.lock();
			(shared.generation.token(), query.clone())
		};
		// read before the snapshot so a pass never claims items it did not see
		let complete = shared.status.ingestion_done();
		let chunks = shared.store.snapshot();

		shared.status.set_searching(true);
		let outcome = rank(shared, pool, &scratch, &mut positions, &chunks, &query, &token);
		shared.status.set_searching(false);

		let results = match outcome {
			Ok(Some(results)) => results,
			Ok(None) => {
				debug!("pass {} superseded", token.id());
				continue;
			}
			Err(err) => {
				error!("pass {} for {query:?} aborted: {err}", token.id());
				*shared.failure.lock() = Some((token.id(), err));
				continue;
			}
		};

		let kind = results.kind;
		let Some(results) = shared.publish(token.id(), results) else {
			debug!("pass {} finished after a newer query", token.id());
			continue;
		};
		if !receiver_gone && !DataStream::new(tx, token.id(), kind).send(results, complete) {
			debug!("result receiver dropped; publishing to the session only");
			receiver_gone = true;
		}
	}
}

/// Run one pass. `Ok(None)` means it was cancelled.
fn rank<T: Item>(
	shared: &Shared<T>,
	pool: &ThreadPool,
	scratch: &ScratchPool,
	positions: &mut Slab,
	chunks: &[Arc<Chunk<T>>],
	query: &str,
	token: &CancelToken,
) -> Result<Option<ResultSet<T>>, SlabError> {
	let started = Instant::now();
	let definition = &shared.definition;
	let pattern = Pattern::parse_with(query, &definition.pattern);
	let scored = shared.status.scored_counter();
	scored.store(0, Ordering::Relaxed);

	let (kind, entries) = if pattern.is_empty() {
		(PassKind::Listing, first_items(chunks, definition.limit))
	} else {
		let pass = Pass {
			chunks,
			pattern: &pattern,
			query,
			definition,
			token,
			scored,
		};
		match pass.run(pool, scratch)? {
			PassOutcome::Completed(entries) => (PassKind::Ranked, entries),
			PassOutcome::Cancelled => return Ok(None),
		}
	};

	let mut items = Vec::with_capacity(entries.len());
	for entry in entries {
		if token.is_cancelled() {
			return Ok(None);
		}
		items.push(highlight(chunks, entry, kind, &pattern, definition, positions)?);
	}

	debug!(
		"pass {} for {query:?}: {} results from {} chunks in {:?}",
		token.id(),
		items.len(),
		chunks.len(),
		started.elapsed()
	);

	Ok(Some(ResultSet {
		generation: token.id(),
		query: query.to_owned(),
		kind,
		items,
		selected: None,
		items_read: shared.status.items_read(),
		items_scored: match kind {
			PassKind::Listing => 0,
			PassKind::Ranked => scored.load(Ordering::Relaxed),
		},
	}))
}

fn highlight<T: Item>(
	chunks: &[Arc<Chunk<T>>],
	entry: Entry,
	kind: PassKind,
	pattern: &Pattern,
	definition: &QueryDefinition<T>,
	slab: &mut Slab,
) -> Result<ResultItem<T>, SlabError> {
	let chunk = Arc::clone(&chunks[entry.index / CHUNK_CAPACITY]);
	let positions = match kind {
		PassKind::Listing => Vec::new(),
		PassKind::Ranked => {
			let item = &chunk.items()[entry.index % CHUNK_CAPACITY];
			definition.highlight(item, pattern, slab)?
		}
	};
	Ok(ResultItem::new(chunk, entry, positions))
}
