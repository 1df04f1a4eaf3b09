use std::sync::mpsc::Sender;

/// Cloneable handle producers push candidates through.
///
/// The stream is complete once every clone has been dropped.
#[derive(Debug)]
pub struct Injector<T> {
	sender: Sender<T>,
}

impl<T> Clone for Injector<T> {
	fn clone(&self) -> Self {
		Self {
			sender: self.sender.clone(),
		}
	}
}

impl<T> Injector<T> {
	pub(crate) fn new(sender: Sender<T>) -> Self {
		Self { sender }
	}

	/// Push one candidate. Returns `false` when the session no longer accepts
	/// items, after which producers should stop.
	pub fn push(&self, item: T) -> bool {
		self.sender.send(item).is_ok()
	}

	/// Push every item of `items`, stopping early when the session hangs up.
	/// Returns the number of items accepted.
	pub fn extend<I>(&self, items: I) -> usize
	where
		I: IntoIterator<Item = T>,
	{
		let mut accepted = 0;
		for item in items {
			if !self.push(item) {
				break;
			}
			accepted += 1;
		}
		accepted
	}
}
