use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, Weak};

use crate::LaneKind;
use crate::cell::ActorCell;
use crate::exit::ActorExit;

const PRUNE_INTERVAL: u64 = 64;

/// Snapshot for one registered actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorRecord {
	pub seq: u64,
	pub id: String,
	pub lane: LaneKind,
	pub dispatched: u64,
	pub dropped: u64,
	pub shut_down: bool,
	/// Lane has finished all work accepted before shutdown.
	pub stopped: bool,
	pub exit: Option<ActorExit>,
}

/// Type-erased lifecycle surface of a registered actor.
pub(crate) trait RegisteredActor: Send + Sync {
	fn record(&self) -> ActorRecord;
	fn shutdown(&self);
}

impl<M> RegisteredActor for ActorCell<M>
where
	M: Send + 'static,
{
	fn record(&self) -> ActorRecord {
		ActorCell::record(self)
	}

	fn shutdown(&self) {
		ActorCell::shutdown(self);
	}
}

/// In-memory actor registry for status snapshots and system-wide shutdown.
///
/// Holds weak references only; an actor that nobody addresses any more drops
/// out of the registry on the next snapshot.
#[derive(Default, Clone)]
pub(crate) struct ActorRegistry {
	inner: Arc<RwLock<BTreeMap<u64, Weak<dyn RegisteredActor>>>>,
}

impl ActorRegistry {
	/// Creates an empty registry.
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Inserts one actor under its sequence number.
	///
	/// Every [`PRUNE_INTERVAL`]-th sequence number also drops entries of
	/// deallocated actors, so the map stays bounded without snapshots.
	pub(crate) fn insert(&self, seq: u64, actor: Weak<dyn RegisteredActor>) {
		if let Ok(mut guard) = self.inner.write() {
			if seq % PRUNE_INTERVAL == 0 {
				guard.retain(|_, actor| actor.strong_count() > 0);
			}
			guard.insert(seq, actor);
		}
	}

	/// Returns snapshots sorted by sequence number, pruning deallocated actors.
	pub(crate) fn snapshots(&self) -> Vec<ActorRecord> {
		let Ok(mut guard) = self.inner.write() else {
			return Vec::new();
		};
		guard.retain(|_, actor| actor.strong_count() > 0);
		guard.values().filter_map(Weak::upgrade).map(|actor| actor.record()).collect()
	}

	/// Shuts down every live registered actor.
	pub(crate) fn shutdown_all(&self) -> usize {
		let live: Vec<Arc<dyn RegisteredActor>> = match self.inner.read() {
			Ok(guard) => guard.values().filter_map(Weak::upgrade).collect(),
			Err(_) => return 0,
		};
		for actor in &live {
			actor.shutdown();
		}
		live.len()
	}
}

impl std::fmt::Debug for ActorRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let len = self.inner.read().map(|guard| guard.len()).unwrap_or_default();
		f.debug_struct("ActorRegistry").field("len", &len).finish()
	}
}
