use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

/// Mailbox send error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MailboxSendError {
	/// Mailbox is closed.
	Closed,
}

struct MailboxState<T> {
	queue: VecDeque<T>,
	closed: bool,
}

struct MailboxInner<T> {
	state: Mutex<MailboxState<T>>,
	ready: Condvar,
}

/// Multi-producer mailbox sender.
pub(crate) struct MailboxSender<T> {
	inner: Arc<MailboxInner<T>>,
}

/// Mailbox receiver, owned by the lane thread.
pub(crate) struct MailboxReceiver<T> {
	inner: Arc<MailboxInner<T>>,
}

/// Unbounded FIFO mailbox backing a serial lane.
///
/// Senders never wait: `send` only takes the state lock long enough to push.
/// Closing discards anything still queued, so a closed mailbox never yields
/// another message.
pub(crate) struct Mailbox<T> {
	inner: Arc<MailboxInner<T>>,
}

impl<T> Clone for MailboxSender<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> Mailbox<T> {
	/// Creates an open, empty mailbox.
	pub(crate) fn new() -> Self {
		Self {
			inner: Arc::new(MailboxInner {
				state: Mutex::new(MailboxState {
					queue: VecDeque::new(),
					closed: false,
				}),
				ready: Condvar::new(),
			}),
		}
	}

	pub(crate) fn sender(&self) -> MailboxSender<T> {
		MailboxSender {
			inner: Arc::clone(&self.inner),
		}
	}

	pub(crate) fn receiver(&self) -> MailboxReceiver<T> {
		MailboxReceiver {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> MailboxSender<T> {
	/// Enqueues one message at the tail.
	pub(crate) fn send(&self, msg: T) -> Result<(), MailboxSendError> {
		let mut state = self.inner.state.lock();
		if state.closed {
			return Err(MailboxSendError::Closed);
		}
		state.queue.push_back(msg);
		drop(state);
		self.inner.ready.notify_one();
		Ok(())
	}

	/// Closes the mailbox and discards queued messages.
	///
	/// Returns the number of discarded messages, or `None` when the mailbox
	/// was already closed.
	pub(crate) fn close(&self) -> Option<usize> {
		let mut state = self.inner.state.lock();
		if state.closed {
			return None;
		}
		state.closed = true;
		let discarded = state.queue.len();
		// Drop payloads outside the lock; message destructors may tell other actors.
		let pending = std::mem::take(&mut state.queue);
		drop(state);
		drop(pending);
		self.inner.ready.notify_all();
		Some(discarded)
	}

	/// Returns current queue length.
	pub(crate) fn len(&self) -> usize {
		self.inner.state.lock().queue.len()
	}
}

impl<T> MailboxReceiver<T> {
	/// Blocks until a message is available. Returns `None` once the mailbox is closed.
	pub(crate) fn recv(&self) -> Option<T> {
		let mut state = self.inner.state.lock();
		loop {
			if state.closed {
				return None;
			}
			if let Some(msg) = state.queue.pop_front() {
				return Some(msg);
			}
			self.inner.ready.wait(&mut state);
		}
	}
}
