use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct SignalState {
	pending: bool,
	closed: bool,
	last_notify: Option<Instant>,
}

/// Auto-resetting wake-up flag shared between producers and a single consumer.
///
/// Any number of [`notify`](Self::notify) calls between two waits collapse into
/// one wake-up, so a burst of keystrokes or sealed chunks schedules exactly one
/// more pass instead of a backlog.
#[derive(Debug, Default)]
pub struct RestartSignal {
	state: Mutex<SignalState>,
	ready: Condvar,
}

impl RestartSignal {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Raise the signal. Has no effect once the signal is closed.
	pub fn notify(&self) {
		let mut state = self.state.lock();
		if state.closed {
			return;
		}
		state.pending = true;
		state.last_notify = Some(Instant::now());
		self.ready.notify_one();
	}

	/// Block until the signal is raised, consuming it.
	///
	/// Returns `false` when the signal was closed instead.
	pub fn wait(&self) -> bool {
		let mut state = self.state.lock();
		while !state.pending && !state.closed {
			self.ready.wait(&mut state);
		}
		if state.closed {
			return false;
		}
		state.pending = false;
		true
	}

	/// Wait until no notification arrived for `window`, absorbing any that do.
	///
	/// Meant to be called right after [`wait`](Self::wait) returned. Returns
	/// `false` when the signal was closed while settling.
	pub fn settle(&self, window: Duration) -> bool {
		if window.is_zero() {
			return !self.state.lock().closed;
		}

		let mut state = self.state.lock();
		loop {
			if state.closed {
				return false;
			}
			let elapsed = state
				.last_notify
				.map_or(window, |last| last.elapsed());
			if elapsed >= window {
				state.pending = false;
				return true;
			}
			let remaining = window - elapsed;
			self.ready.wait_for(&mut state, remaining);
		}
	}

	/// Whether a notification is waiting to be consumed.
	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.state.lock().pending
	}

	/// Permanently close the signal and release every waiter.
	pub fn close(&self) {
		let mut state = self.state.lock();
		state.closed = true;
		state.pending = false;
		self.ready.notify_all();
	}

	#[must_use]
	pub fn is_closed(&self) -> bool {
		self.state.lock().closed
	}
}
