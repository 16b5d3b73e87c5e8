//! Actor addressing: the [`Actor`] contract and the [`ActorRef`] handle.

use std::sync::Arc;

use crate::cell::{ActorCell, ActorStats};
use crate::dispatch::ParallelJob;
use crate::exit::ActorExit;
use crate::lane::{Lane, LaneKind};

/// Optional reply address attached to every delivered message.
///
/// `None` is a valid sender: the message came from outside any actor, or the
/// caller chose not to be replied to.
pub type Sender<M> = Option<ActorRef<M>>;

/// Uniform addressing and lifecycle surface of an actor.
pub trait Actor<M> {
	/// Diagnostic identity assigned at construction.
	fn id(&self) -> &str;

	/// Reply address of this actor. Always `Some`.
	fn myself(&self) -> Sender<M>;

	/// Accepts `message` for asynchronous delivery with the given reply address.
	///
	/// Never waits for the message to be processed. Messages sent to a shut
	/// down actor are discarded without notice.
	fn tell(&self, message: M, sender: Sender<M>);

	/// Stops further dispatches. Idempotent and non-blocking.
	fn shutdown(&self);
}

/// One message together with its reply address.
pub(crate) struct Envelope<M> {
	pub(crate) message: M,
	pub(crate) sender: Sender<M>,
}

/// Cloneable address of a spawned actor.
///
/// Equality is identity: two references are equal when they address the same actor.
pub struct ActorRef<M> {
	cell: Arc<ActorCell<M>>,
}

impl<M> Clone for ActorRef<M> {
	fn clone(&self) -> Self {
		Self {
			cell: Arc::clone(&self.cell),
		}
	}
}

impl<M> PartialEq for ActorRef<M> {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.cell, &other.cell)
	}
}

impl<M> Eq for ActorRef<M> {}

impl<M> std::fmt::Debug for ActorRef<M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ActorRef")
			.field("id", &self.cell.id())
			.field("seq", &self.cell.seq())
			.field("lane", &self.cell.lane_kind())
			.finish()
	}
}

impl<M> ActorRef<M>
where
	M: Send + 'static,
{
	pub(crate) fn from_cell(cell: Arc<ActorCell<M>>) -> Self {
		Self { cell }
	}

	pub(crate) fn cell(&self) -> &ActorCell<M> {
		&self.cell
	}

	pub(crate) fn downgrade_cell(&self) -> std::sync::Weak<ActorCell<M>> {
		Arc::downgrade(&self.cell)
	}

	/// Lane kind chosen at spawn.
	pub fn lane(&self) -> LaneKind {
		self.cell.lane_kind()
	}

	/// System-unique sequence number.
	pub fn seq(&self) -> u64 {
		self.cell.seq()
	}

	/// Whether `shutdown` has been requested.
	pub fn is_shut_down(&self) -> bool {
		self.cell.is_shut_down()
	}

	/// Resolves once the actor is shut down and its lane has finished all
	/// in-flight work.
	pub async fn stopped(&self) {
		self.cell.stopped().await;
	}

	/// Exit summary, once the actor has exited.
	pub fn exit(&self) -> Option<ActorExit> {
		self.cell.exit()
	}

	/// Counters for this actor.
	pub fn stats(&self) -> ActorStats {
		self.cell.stats()
	}
}

impl<M> Actor<M> for ActorRef<M>
where
	M: Send + 'static,
{
	fn id(&self) -> &str {
		self.cell.id()
	}

	fn myself(&self) -> Sender<M> {
		Some(self.clone())
	}

	fn tell(&self, message: M, sender: Sender<M>) {
		let envelope = Envelope { message, sender };
		match self.cell.lane() {
			Lane::Serial(tx) => {
				if tx.send(envelope).is_err() {
					self.cell.record_drop();
					return;
				}
			}
			Lane::Parallel(handle) => {
				if !self.cell.begin_job() {
					self.cell.record_drop();
					return;
				}
				let job = ParallelJob::new(self.clone(), envelope);
				crate::spawn::spawn_lane_job(handle, move || job.run());
			}
		}
		tracing::trace!(actor = %self.cell.id(), seq = self.cell.seq(), lane = self.cell.lane_kind().as_str(), "actor.tell");
	}

	fn shutdown(&self) {
		self.cell.shutdown();
	}
}
