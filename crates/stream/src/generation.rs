use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter identifying the most recent unit of work.
///
/// Every bump invalidates the tokens handed out for earlier generations, which
/// is how a running pass learns that a newer query superseded it.
#[derive(Debug, Clone, Default)]
pub struct Generation {
	latest: Arc<AtomicU64>,
}

impl Generation {
	/// Create a counter starting at generation zero.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a new generation and return its identifier.
	pub fn bump(&self) -> u64 {
		self.latest.fetch_add(1, Ordering::AcqRel) + 1
	}

	/// Identifier of the newest generation.
	#[must_use]
	pub fn current(&self) -> u64 {
		self.latest.load(Ordering::Acquire)
	}

	/// Token bound to the current generation.
	#[must_use]
	pub fn token(&self) -> CancelToken {
		CancelToken {
			id: self.current(),
			latest: Arc::clone(&self.latest),
		}
	}
}

/// Cooperative cancellation handle tied to a single generation.
#[derive(Debug, Clone)]
pub struct CancelToken {
	id: u64,
	latest: Arc<AtomicU64>,
}

impl CancelToken {
	/// Generation this token was issued for.
	#[must_use]
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Whether a newer generation has started since the token was issued.
	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		should_abort(self.id, &self.latest)
	}
}

fn should_abort(id: u64, latest: &AtomicU64) -> bool {
	latest.load(Ordering::Acquire) != id
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bump_cancels_outstanding_tokens() {
		let generation = Generation::new();
		let token = generation.token();
		assert_eq!(token.id(), 0);
		assert!(!token.is_cancelled());

		assert_eq!(generation.bump(), 1);
		assert!(token.is_cancelled());
		assert!(!generation.token().is_cancelled());
	}

	#[test]
	fn clones_share_the_counter() {
		let generation = Generation::new();
		let other = generation.clone();
		other.bump();
		other.bump();
		assert_eq!(generation.current(), 2);
	}
}
