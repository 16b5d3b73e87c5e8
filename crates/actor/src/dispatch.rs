//! Lane execution: turning accepted envelopes into behavior invocations.

use std::panic::{self, AssertUnwindSafe};

use crate::actor::{ActorRef, Envelope};
use crate::context::ActorContext;
use crate::exit::panic_message;
use crate::mailbox::MailboxReceiver;

/// Invokes the actor's current behavior for one envelope.
///
/// The behavior is read at dispatch time, not at `tell` time, so a `become`
/// performed by an earlier message applies to every later one.
///
/// A panic is reported through the actor's exit record (`Panicked` with the
/// payload message) and an `actor.behavior.panicked` error event. The actor is
/// shut down, then the panic is resumed to end the current lane thread or
/// job. Nothing joins those, so the resumed panic is not observable beyond
/// the default panic hook output.
pub(crate) fn dispatch<M>(actor: &ActorRef<M>, envelope: Envelope<M>)
where
	M: Send + 'static,
{
	let cell = actor.cell();
	if cell.is_shut_down() {
		cell.record_drop();
		return;
	}

	let behavior = cell.behavior().load();
	let ctx = ActorContext::new(actor.clone());
	tracing::trace!(actor = %cell.id(), seq = cell.seq(), behavior = behavior.tag(), "actor.dispatch");

	let Envelope { message, sender } = envelope;
	match panic::catch_unwind(AssertUnwindSafe(|| behavior.handle(&ctx, message, sender))) {
		Ok(()) => cell.record_dispatch(),
		Err(payload) => {
			let reason = panic_message(&*payload);
			tracing::error!(
				actor = %cell.id(),
				seq = cell.seq(),
				behavior = behavior.tag(),
				panic = %reason,
				"actor.behavior.panicked"
			);
			cell.fail(reason);
			panic::resume_unwind(payload);
		}
	}
}

/// Marks the lane stopped when the serial lane thread leaves its loop,
/// including by unwinding.
struct SerialLaneGuard<'a, M>(&'a ActorRef<M>)
where
	M: Send + 'static;

impl<M> Drop for SerialLaneGuard<'_, M>
where
	M: Send + 'static,
{
	fn drop(&mut self) {
		let cell = self.0.cell();
		cell.lane_exited();
		tracing::debug!(actor = %cell.id(), seq = cell.seq(), "actor.lane.exit");
	}
}

/// Body of a serial lane thread: one message at a time, in mailbox order.
pub(crate) fn run_serial_lane<M>(actor: ActorRef<M>, rx: MailboxReceiver<Envelope<M>>)
where
	M: Send + 'static,
{
	let _guard = SerialLaneGuard(&actor);
	while let Some(envelope) = rx.recv() {
		dispatch(&actor, envelope);
	}
}

/// One accepted parallel-lane message, holding an in-flight slot until dropped.
///
/// Created by `tell` before the job is handed to the runtime. If the runtime
/// discards the job without running it, the drop counts the message as
/// dropped and still releases the slot, so `stopped` can resolve.
pub(crate) struct ParallelJob<M>
where
	M: Send + 'static,
{
	actor: ActorRef<M>,
	envelope: Option<Envelope<M>>,
}

impl<M> ParallelJob<M>
where
	M: Send + 'static,
{
	/// Wraps an envelope whose slot was already taken with `begin_job`.
	pub(crate) fn new(actor: ActorRef<M>, envelope: Envelope<M>) -> Self {
		Self {
			actor,
			envelope: Some(envelope),
		}
	}

	/// Body of one parallel lane job.
	pub(crate) fn run(mut self) {
		if let Some(envelope) = self.envelope.take() {
			dispatch(&self.actor, envelope);
		}
	}
}

impl<M> Drop for ParallelJob<M>
where
	M: Send + 'static,
{
	fn drop(&mut self) {
		let cell = self.actor.cell();
		if self.envelope.take().is_some() {
			tracing::debug!(actor = %cell.id(), seq = cell.seq(), "parallel job discarded by the runtime before running");
			cell.record_drop();
		}
		cell.end_job();
	}
}
