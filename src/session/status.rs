use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Live progress counters shared by the session threads.
#[derive(Debug, Default)]
pub(crate) struct Status {
	ingestors: AtomicUsize,
	searching: AtomicBool,
	items_read: AtomicUsize,
	items_scored: AtomicUsize,
}

impl Status {
	pub fn ingestor_started(&self) {
		self.ingestors.fetch_add(1, Ordering::AcqRel);
	}

	pub fn ingestor_finished(&self) {
		self.ingestors.fetch_sub(1, Ordering::AcqRel);
	}

	/// No ingestion thread is running.
	pub fn ingestion_done(&self) -> bool {
		self.ingestors.load(Ordering::Acquire) == 0
	}

	pub fn set_searching(&self, searching: bool) {
		self.searching.store(searching, Ordering::Release);
	}

	pub fn record_read(&self) {
		self.items_read.fetch_add(1, Ordering::Relaxed);
	}

	pub fn items_read(&self) -> usize {
		self.items_read.load(Ordering::Relaxed)
	}

	pub fn reset_read(&self) {
		self.items_read.store(0, Ordering::Relaxed);
	}

	/// Counter a pass adds its accepted candidates to.
	pub fn scored_counter(&self) -> &AtomicUsize {
		&self.items_scored
	}

	pub fn snapshot(&self, chunks: usize) -> StatusSnapshot {
		StatusSnapshot {
			reading: !self.ingestion_done(),
			searching: self.searching.load(Ordering::Acquire),
			items_read: self.items_read(),
			items_scored: self.items_scored.load(Ordering::Relaxed),
			chunks,
		}
	}
}

/// Point-in-time view of a session's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
	/// At least one ingestion stream is still open.
	pub reading: bool,
	/// A ranking pass is running.
	pub searching: bool,
	pub items_read: usize,
	/// Candidates that passed the score threshold in the latest pass.
	pub items_scored: usize,
	/// Sealed chunks available to ranking.
	pub chunks: usize,
}

impl StatusSnapshot {
	pub fn is_working(&self) -> bool {
		self.reading || self.searching
	}
}
