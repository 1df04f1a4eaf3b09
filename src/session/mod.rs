//! A live search session.
//!
//! A session owns the chunk store, the query, and two kinds of background
//! threads: ingestion threads that turn pushed items into sealed chunks, and a
//! single orchestration thread that reruns the ranking pass whenever the query
//! changes or a chunk is sealed. Completed passes are published both through
//! [`Session::results`] and as [`ResultUpdate`] messages.

mod ingest;
mod results;
mod status;
mod worker;

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use frisk_stream::{Generation, RestartSignal};
use log::{debug, error};
use parking_lot::Mutex;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

use crate::config::SearchOptions;
use crate::ingest::{ChunkStore, Injector};
use crate::matcher::SlabError;
use crate::rank::{Item, QueryDefinition};

pub use results::{PassKind, ResultItem, ResultSet, ResultUpdate};
pub use status::StatusSnapshot;

use results::carry_selection;
use status::Status;

#[derive(Debug, Error)]
pub enum SessionError {
	#[error("failed to build the ranking thread pool")]
	ThreadPool(#[from] ThreadPoolBuildError),
	#[error("failed to spawn the {name} thread")]
	Spawn {
		name: &'static str,
		#[source]
		source: io::Error,
	},
	#[error("the session has shut down")]
	Closed,
}

/// State shared between the session handle and its threads.
struct Shared<T> {
	definition: QueryDefinition<T>,
	options: SearchOptions,
	/// Guards the query together with its generation bump.
	query: Mutex<String>,
	generation: Generation,
	signal: RestartSignal,
	store: ChunkStore<T>,
	status: Status,
	selected: Mutex<Option<usize>>,
	/// Latest published results; also serialises publication.
	latest: Mutex<Option<Arc<ResultSet<T>>>>,
	/// Generation and cause of the most recent aborted pass.
	failure: Mutex<Option<(u64, SlabError)>>,
}

/// Handle on a running search session. Dropping it shuts the session down.
pub struct Session<T: Item> {
	shared: Arc<Shared<T>>,
	worker: Option<JoinHandle<()>>,
}

impl<T: Item> Session<T> {
	/// Start a session and its orchestration thread.
	///
	/// The receiver gets a [`ResultUpdate`] after every completed pass; it may
	/// be dropped if [`Session::results`] is polled instead.
	pub fn new(
		definition: QueryDefinition<T>,
		options: SearchOptions,
	) -> Result<(Self, Receiver<ResultUpdate<T>>), SessionError> {
		let threads = options.thread_count();
		let pool = ThreadPoolBuilder::new()
			.num_threads(threads)
			.thread_name(|index| format!("frisk-rank-{index}"))
			.build()?;

		let shared = Arc::new(Shared {
			definition,
			options,
			query: Mutex::new(String::new()),
			generation: Generation::new(),
			signal: RestartSignal::new(),
			store: ChunkStore::new(),
			status: Status::default(),
			selected: Mutex::new(None),
			latest: Mutex::new(None),
			failure: Mutex::new(None),
		});

		let (tx, rx) = mpsc::channel();
		let thread_shared = Arc::clone(&shared);
		let worker = thread::Builder::new()
			.name("frisk-session".into())
			.spawn(move || worker::run(&thread_shared, &pool, &tx))
			.map_err(|source| SessionError::Spawn {
				name: "session",
				source,
			})?;

		// publish the initial (empty) listing
		shared.signal.notify();
		debug!("session started with {threads} ranking threads");

		Ok((
			Self {
				shared,
				worker: Some(worker),
			},
			rx,
		))
	}

	/// Replace the query and restart ranking. Returns the new generation.
	pub fn set_query(&self, query: impl Into<String>) -> u64 {
		let generation = {
			let mut current = self.shared.query.lock();
			*current = query.into();
			self.shared.generation.bump()
		};
		self.shared.signal.notify();
		generation
	}

	pub fn query(&self) -> String {
		self.shared.query.lock().clone()
	}

	/// Generation of the current query; published updates carry it as `id`.
	pub fn generation(&self) -> u64 {
		self.shared.generation.current()
	}

	/// Open a new ingestion stream. The session reads while any stream is
	/// open; a stream ends when its injector and all clones are dropped.
	pub fn injector(&self) -> Result<Injector<T>, SessionError> {
		if self.shared.signal.is_closed() {
			return Err(SessionError::Closed);
		}
		let (tx, rx) = mpsc::channel();
		let epoch = self.shared.store.epoch();
		let shared = Arc::clone(&self.shared);

		self.shared.status.ingestor_started();
		let spawned = thread::Builder::new()
			.name("frisk-ingest".into())
			.spawn(move || ingest::run(&shared, &rx, epoch));
		if let Err(source) = spawned {
			self.shared.status.ingestor_finished();
			return Err(SessionError::Spawn {
				name: "ingestion",
				source,
			});
		}
		Ok(Injector::new(tx))
	}

	/// Drop every item, stop open ingestion streams, and restart ranking.
	pub fn clear(&self) {
		{
			let _query = self.shared.query.lock();
			self.shared.store.clear();
			self.shared.status.reset_read();
			self.shared.generation.bump();
		}
		self.shared.signal.notify();
	}

	/// Move the selection, clamped to the latest results. Returns the
	/// effective selection.
	pub fn select(&self, index: usize) -> Option<usize> {
		let latest = self.shared.latest.lock();
		let len = latest.as_ref().map_or(0, |results| results.len());
		let mut selected = self.shared.selected.lock();
		*selected = (len > 0).then(|| index.min(len - 1));
		*selected
	}

	pub fn selected(&self) -> Option<usize> {
		*self.shared.selected.lock()
	}

	/// The selected result of the latest published set.
	pub fn selected_item(&self) -> Option<ResultItem<T>> {
		let latest = self.shared.latest.lock();
		let index = (*self.shared.selected.lock())?;
		latest.as_ref()?.get(index).cloned()
	}

	/// The latest published result set.
	pub fn results(&self) -> Option<Arc<ResultSet<T>>> {
		self.shared.latest.lock().clone()
	}

	/// The most recent pass that ran out of slab space, with its generation.
	pub fn last_failure(&self) -> Option<(u64, SlabError)> {
		*self.shared.failure.lock()
	}

	pub fn status(&self) -> StatusSnapshot {
		self.shared.status.snapshot(self.shared.store.chunk_count())
	}

	/// Stop ranking and ingestion and wait for the orchestration thread.
	pub fn shutdown(&mut self) {
		self.shared.signal.close();
		self.shared.generation.bump();
		if let Some(worker) = self.worker.take() {
			if worker.join().is_err() {
				error!("session thread panicked");
			}
			debug!("session stopped");
		}
	}
}

impl<T: Item> Drop for Session<T> {
	fn drop(&mut self) {
		self.shutdown();
	}
}

impl<T> Shared<T> {
	/// Store a completed result set unless `generation` was superseded.
	///
	/// Returns the stored set with the selection carried over.
	fn publish(&self, generation: u64, mut results: ResultSet<T>) -> Option<Arc<ResultSet<T>>> {
		let mut latest = self.latest.lock();
		if self.generation.current() != generation {
			return None;
		}
		let mut selected = self.selected.lock();
		*selected = carry_selection(*selected, results.len());
		results.selected = *selected;
		let results = Arc::new(results);
		*latest = Some(Arc::clone(&results));
		Some(results)
	}
}
