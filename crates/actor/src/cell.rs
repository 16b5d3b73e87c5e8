use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::behavior::BehaviorSlot;
use crate::exit::ActorExit;
use crate::lane::{Lane, LaneKind};
use crate::registry::ActorRecord;

/// Point-in-time counters for one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActorStats {
	/// Messages whose behavior ran to completion.
	pub dispatched: u64,
	/// Messages discarded because the actor was shut down.
	pub dropped: u64,
	/// Messages accepted but not yet dispatched (serial lanes only).
	pub queued: usize,
}

/// Shared state behind every [`ActorRef`](crate::ActorRef).
pub(crate) struct ActorCell<M> {
	seq: u64,
	id: String,
	lane: Lane<M>,
	behavior: BehaviorSlot<M>,
	/// Cancelled by `shutdown`; gates every dispatch.
	shutdown: CancellationToken,
	/// Cancelled once the lane has no more work in flight.
	stopped: CancellationToken,
	exit: Mutex<Option<ActorExit>>,
	in_flight: AtomicUsize,
	dispatched: AtomicU64,
	dropped: AtomicU64,
	drop_log_interval: u64,
}

impl<M> ActorCell<M> {
	pub(crate) fn new(seq: u64, id: String, lane: Lane<M>, behavior: BehaviorSlot<M>, drop_log_interval: u64) -> Self {
		Self {
			seq,
			id,
			lane,
			behavior,
			shutdown: CancellationToken::new(),
			stopped: CancellationToken::new(),
			exit: Mutex::new(None),
			in_flight: AtomicUsize::new(0),
			dispatched: AtomicU64::new(0),
			dropped: AtomicU64::new(0),
			drop_log_interval: drop_log_interval.max(1),
		}
	}

	pub(crate) fn seq(&self) -> u64 {
		self.seq
	}

	pub(crate) fn id(&self) -> &str {
		&self.id
	}

	pub(crate) fn lane(&self) -> &Lane<M> {
		&self.lane
	}

	pub(crate) fn lane_kind(&self) -> LaneKind {
		self.lane.kind()
	}

	pub(crate) fn behavior(&self) -> &BehaviorSlot<M> {
		&self.behavior
	}

	pub(crate) fn is_shut_down(&self) -> bool {
		self.shutdown.is_cancelled()
	}

	pub(crate) async fn stopped(&self) {
		self.stopped.cancelled().await;
	}

	pub(crate) fn is_stopped(&self) -> bool {
		self.stopped.is_cancelled()
	}

	pub(crate) fn exit(&self) -> Option<ActorExit> {
		self.exit.lock().clone()
	}

	pub(crate) fn stats(&self) -> ActorStats {
		ActorStats {
			dispatched: self.dispatched.load(Ordering::Acquire),
			dropped: self.dropped.load(Ordering::Acquire),
			queued: match &self.lane {
				Lane::Serial(tx) => tx.len(),
				Lane::Parallel(_) => 0,
			},
		}
	}

	pub(crate) fn record(&self) -> ActorRecord {
		let stats = self.stats();
		ActorRecord {
			seq: self.seq,
			id: self.id.clone(),
			lane: self.lane_kind(),
			dispatched: stats.dispatched,
			dropped: stats.dropped,
			shut_down: self.is_shut_down(),
			stopped: self.is_stopped(),
			exit: self.exit(),
		}
	}

	pub(crate) fn record_dispatch(&self) {
		self.dispatched.fetch_add(1, Ordering::AcqRel);
	}

	/// Counts one message discarded by a shut down actor.
	pub(crate) fn record_drop(&self) {
		self.record_drops(1);
	}

	fn record_drops(&self, count: u64) {
		if count == 0 {
			return;
		}
		let before = self.dropped.fetch_add(count, Ordering::AcqRel);
		let after = before.wrapping_add(count);
		tracing::trace!(actor = %self.id, seq = self.seq, count, "actor.drop");
		if before / self.drop_log_interval != after / self.drop_log_interval || before == 0 {
			tracing::debug!(actor = %self.id, seq = self.seq, dropped = after, "actor is shut down, discarding messages");
		}
	}

	/// Registers one parallel job. Returns `false` when the actor is shut down.
	pub(crate) fn begin_job(&self) -> bool {
		self.in_flight.fetch_add(1, Ordering::SeqCst);
		if self.shutdown.is_cancelled() {
			self.end_job();
			return false;
		}
		true
	}

	pub(crate) fn end_job(&self) {
		if self.in_flight.fetch_sub(1, Ordering::SeqCst) != 1 {
			return;
		}
		// Serialized with `terminate` through the exit lock so the last job and
		// a concurrent shutdown cannot both miss the transition to stopped.
		let _exit = self.exit.lock();
		if self.shutdown.is_cancelled() {
			self.stopped.cancel();
		}
	}

	/// Marks a serial lane thread as exited.
	pub(crate) fn lane_exited(&self) {
		self.stopped.cancel();
	}

	/// Requests shutdown with a normal exit.
	pub(crate) fn shutdown(&self) {
		self.terminate(ActorExit::shutdown());
	}

	/// Requests shutdown after a behavior fault.
	pub(crate) fn fail(&self, message: String) {
		self.terminate(ActorExit::panicked(message));
	}

	fn terminate(&self, exit: ActorExit) {
		{
			let mut slot = self.exit.lock();
			if slot.is_some() {
				return;
			}
			*slot = Some(exit);
			self.shutdown.cancel();
			if matches!(self.lane, Lane::Parallel(_)) && self.in_flight.load(Ordering::SeqCst) == 0 {
				self.stopped.cancel();
			}
		}

		let discarded = match &self.lane {
			Lane::Serial(tx) => tx.close().unwrap_or(0),
			Lane::Parallel(_) => 0,
		};
		self.record_drops(discarded as u64);
		tracing::debug!(actor = %self.id, seq = self.seq, lane = self.lane_kind().as_str(), discarded, "actor.shutdown");
	}
}
