use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

use super::topk::TopK;
use crate::matcher::Slab;

/// Per-worker state reused across passes.
#[derive(Debug)]
pub struct Scratch {
	pub slab: Slab,
	pub top: TopK,
}

impl Scratch {
	/// Placeholder that owns no buffers.
	fn empty() -> Self {
		Self {
			slab: Slab::with_sizes(0, 0, 0),
			top: TopK::new(0),
		}
	}
}

/// Bounded pool of [`Scratch`] objects.
///
/// A checkout is exclusive until its guard drops, at which point the scratch
/// is cleaned and returned, whether or not the pass completed.
#[derive(Debug)]
pub struct ScratchPool {
	free: Mutex<Vec<Scratch>>,
	slab_capacity: usize,
	limit: usize,
	max_idle: usize,
}

impl ScratchPool {
	pub fn new(slab_capacity: usize, limit: usize, max_idle: usize) -> Self {
		Self {
			free: Mutex::new(Vec::with_capacity(max_idle)),
			slab_capacity,
			limit,
			max_idle,
		}
	}

	pub fn checkout(&self) -> ScratchGuard<'_> {
		let scratch = self.free.lock().pop().unwrap_or_else(|| Scratch {
			slab: Slab::new(self.slab_capacity),
			top: TopK::new(self.limit),
		});
		ScratchGuard {
			pool: self,
			scratch,
		}
	}

	/// Scratch objects waiting to be checked out.
	#[cfg(test)]
	pub fn idle(&self) -> usize {
		self.free.lock().len()
	}

	fn restore(&self, mut scratch: Scratch) {
		scratch.slab.reset();
		scratch.top.clear();
		let mut free = self.free.lock();
		if free.len() < self.max_idle {
			free.push(scratch);
		}
	}
}

/// Exclusive handle on a pooled [`Scratch`].
#[derive(Debug)]
pub struct ScratchGuard<'p> {
	pool: &'p ScratchPool,
	scratch: Scratch,
}

impl Deref for ScratchGuard<'_> {
	type Target = Scratch;

	fn deref(&self) -> &Scratch {
		&self.scratch
	}
}

impl DerefMut for ScratchGuard<'_> {
	fn deref_mut(&mut self) -> &mut Scratch {
		&mut self.scratch
	}
}

impl Drop for ScratchGuard<'_> {
	fn drop(&mut self) {
		let scratch = std::mem::replace(&mut self.scratch, Scratch::empty());
		self.pool.restore(scratch);
	}
}
