use std::sync::Arc;

use crate::actor::{Actor, ActorRef, Sender};
use crate::behavior::Behavior;

/// View of the actor currently handling a message.
///
/// Handed to the behavior for every dispatch. It is the only way to replace
/// an actor's behavior, so behavior changes always originate from the actor's
/// own processing.
pub struct ActorContext<M> {
	actor: ActorRef<M>,
}

impl<M> ActorContext<M>
where
	M: Send + 'static,
{
	pub(crate) fn new(actor: ActorRef<M>) -> Self {
		Self { actor }
	}

	/// Installs `behavior` for every message dispatched after this call.
	///
	/// The message currently being handled keeps running the behavior it was
	/// dispatched with.
	pub fn become_behavior(&self, behavior: impl Into<Arc<Behavior<M>>>) {
		let behavior = behavior.into();
		tracing::trace!(actor = %self.actor.id(), seq = self.actor.seq(), behavior = behavior.tag(), "actor.become");
		self.actor.cell().behavior().store(behavior);
	}

	/// Returns the currently installed behavior.
	pub fn behavior(&self) -> Arc<Behavior<M>> {
		self.actor.cell().behavior().load()
	}

	/// Address of the actor handling this message.
	pub fn actor(&self) -> &ActorRef<M> {
		&self.actor
	}

	/// Tells `target`, claiming this actor as the sender.
	pub fn tell_to(&self, target: &ActorRef<M>, message: M) {
		target.tell(message, self.myself());
	}

	/// Replies to `sender` when present, claiming this actor as the sender.
	///
	/// Returns `false` and drops `message` when there is nobody to reply to.
	pub fn reply(&self, sender: &Sender<M>, message: M) -> bool {
		match sender {
			Some(target) => {
				self.tell_to(target, message);
				true
			}
			None => false,
		}
	}
}

impl<M> Actor<M> for ActorContext<M>
where
	M: Send + 'static,
{
	fn id(&self) -> &str {
		self.actor.id()
	}

	fn myself(&self) -> Sender<M> {
		self.actor.myself()
	}

	fn tell(&self, message: M, sender: Sender<M>) {
		self.actor.tell(message, sender);
	}

	fn shutdown(&self) {
		self.actor.shutdown();
	}
}
