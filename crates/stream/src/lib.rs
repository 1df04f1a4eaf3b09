//! Streaming primitives for delivering search results across threads.
//!
//! The base types wrap an [`mpsc`] channel so a background ranking loop can
//! publish result sets to a consumer without blocking either side. Each
//! message is tagged with the generation that produced it, so consumers can
//! drop anything older than the query they are currently showing.
//!
//! Two small synchronisation helpers sit next to the channel types:
//! [`RestartSignal`] coalesces any number of "something changed" notifications
//! into a single wake-up, and [`Generation`] hands out cooperative
//! [`CancelToken`]s that turn stale as soon as a newer generation starts.
//!
//! ```
//! use std::sync::mpsc;
//!
//! use frisk_stream::{DataStream, StreamEnvelope};
//!
//! let (tx, rx) = mpsc::channel::<StreamEnvelope<&'static str, Vec<u32>>>();
//! let stream = DataStream::new(&tx, 7, "ranked");
//! assert!(stream.send(vec![3, 1, 2], true));
//!
//! let envelope = rx.recv().unwrap();
//! assert_eq!(envelope.id, 7);
//! assert!(envelope.complete);
//! let lengths = envelope.map_payload(|payload| payload.len());
//! assert_eq!(lengths.payload, 3);
//! ```
//!
//! [`mpsc`]: std::sync::mpsc

use std::sync::mpsc::Sender;

mod generation;
mod signal;

pub use generation::{CancelToken, Generation};
pub use signal::RestartSignal;

/// Message emitted by a background system and delivered to the consumer.
#[derive(Debug, Clone)]
pub struct StreamEnvelope<M, P> {
	/// Identifier correlating the message with a query generation.
	pub id: u64,
	/// Stream-specific metadata describing the payload.
	pub kind: M,
	/// Payload delivered to the consumer.
	pub payload: P,
	/// Whether the producer finished streaming for this identifier.
	pub complete: bool,
}

impl<M, P> StreamEnvelope<M, P> {
	/// Transform the payload while preserving the envelope metadata.
	pub fn map_payload<N>(self, f: impl FnOnce(P) -> N) -> StreamEnvelope<M, N> {
		StreamEnvelope {
			id: self.id,
			kind: self.kind,
			payload: f(self.payload),
			complete: self.complete,
		}
	}
}

/// Handle for producing stream messages backed by an [`mpsc::Sender`].
///
/// [`mpsc::Sender`]: std::sync::mpsc::Sender
pub struct DataStream<'a, M, P> {
	tx: &'a Sender<StreamEnvelope<M, P>>,
	id: u64,
	kind: M,
}

impl<'a, M: Clone, P: Send + 'static> DataStream<'a, M, P> {
	/// Create a new handle backed by the provided sender.
	#[must_use]
	pub fn new(tx: &'a Sender<StreamEnvelope<M, P>>, id: u64, kind: M) -> Self {
		Self { tx, id, kind }
	}

	/// Identifier associated with this stream.
	#[must_use]
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Metadata associated with each emitted payload.
	#[must_use]
	pub fn kind(&self) -> &M {
		&self.kind
	}

	/// Emit a payload to the consumer. Returns `false` once the receiver hung up.
	pub fn send(&self, payload: P, complete: bool) -> bool {
		self.tx
			.send(StreamEnvelope {
				id: self.id,
				kind: self.kind.clone(),
				payload,
				complete,
			})
			.is_ok()
	}
}

impl<'a, M: Clone, P: Send + 'static> Clone for DataStream<'a, M, P> {
	fn clone(&self) -> Self {
		Self {
			tx: self.tx,
			id: self.id,
			kind: self.kind.clone(),
		}
	}
}
