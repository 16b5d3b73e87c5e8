//! First-class message processors and the swappable slot that holds the current one.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::actor::Sender;
use crate::context::ActorContext;

type Handler<M> = dyn Fn(&ActorContext<M>, M, Sender<M>) + Send + Sync;

/// One unit of behavior: the function that handles an actor's next message.
///
/// Behaviors are plain values. An actor implements a state machine by building
/// a new behavior that captures the next state and installing it with
/// [`ActorContext::become_behavior`].
pub struct Behavior<M> {
	tag: &'static str,
	handler: Box<Handler<M>>,
}

impl<M> Behavior<M> {
	/// Creates an untagged behavior.
	pub fn new(handler: impl Fn(&ActorContext<M>, M, Sender<M>) + Send + Sync + 'static) -> Self {
		Self::named("anonymous", handler)
	}

	/// Creates a behavior carrying a diagnostic tag.
	pub fn named(tag: &'static str, handler: impl Fn(&ActorContext<M>, M, Sender<M>) + Send + Sync + 'static) -> Self {
		Self {
			tag,
			handler: Box::new(handler),
		}
	}

	/// Diagnostic tag, reported in dispatch traces.
	pub fn tag(&self) -> &'static str {
		self.tag
	}

	pub(crate) fn handle(&self, ctx: &ActorContext<M>, message: M, sender: Sender<M>) {
		(self.handler)(ctx, message, sender);
	}
}

impl<M> std::fmt::Debug for Behavior<M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Behavior").field("tag", &self.tag).finish_non_exhaustive()
	}
}

/// Holder of an actor's current behavior.
///
/// Reads take a full snapshot so a dispatch keeps the behavior it started
/// with even if the handler replaces it mid-flight.
pub(crate) struct BehaviorSlot<M> {
	current: ArcSwap<Behavior<M>>,
}

impl<M> BehaviorSlot<M> {
	pub(crate) fn new(initial: Behavior<M>) -> Self {
		Self {
			current: ArcSwap::from_pointee(initial),
		}
	}

	pub(crate) fn load(&self) -> Arc<Behavior<M>> {
		self.current.load_full()
	}

	pub(crate) fn store(&self, next: Arc<Behavior<M>>) {
		self.current.store(next);
	}
}
