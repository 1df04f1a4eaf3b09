use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use log::trace;

use super::Shared;
use crate::ingest::{Chunk, ChunkBuilder};
use crate::rank::Item;

/// How often a stream with no traffic checks for shutdown or clear. Busy
/// streams check on every item.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Drain one ingestion stream into sealed chunks until every injector is
/// dropped, the session shuts down, or the store is cleared.
pub(super) fn run<T: Item>(shared: &Shared<T>, rx: &Receiver<T>, epoch: u64) {
	let mut builder = ChunkBuilder::new();
	loop {
		match rx.recv_timeout(POLL_INTERVAL) {
			Ok(item) => {
				if shared.signal.is_closed() || shared.store.epoch() != epoch {
					break;
				}
				shared.status.record_read();
				if let Some(chunk) = builder.push(item) {
					if !seal(shared, epoch, chunk) {
						break;
					}
				}
			}
			Err(RecvTimeoutError::Timeout) => {
				if shared.signal.is_closed() || shared.store.epoch() != epoch {
					break;
				}
			}
			Err(RecvTimeoutError::Disconnected) => {
				if let Some(chunk) = builder.finish() {
					seal(shared, epoch, chunk);
				}
				break;
			}
		}
	}
	shared.status.ingestor_finished();
	shared.signal.notify();
}

/// Publish a sealed chunk. Returns `false` once the store moved to a newer
/// epoch.
fn seal<T: Item>(shared: &Shared<T>, epoch: u64, chunk: Chunk<T>) -> bool {
	let len = chunk.len();
	match shared.store.publish(epoch, chunk) {
		Some(number) => {
			trace!("sealed chunk {number} with {len} items");
			shared.signal.notify();
			true
		}
		None => {
			trace!("dropped a chunk built before the store was cleared");
			false
		}
	}
}
