use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::actor::{Actor, ActorRef};
use crate::behavior::BehaviorSlot;
use crate::cell::ActorCell;
use crate::config::RuntimeConfig;
use crate::dispatch::run_serial_lane;
use crate::error::{ConfigError, SpawnError};
use crate::lane::{Lane, LaneKind};
use crate::mailbox::Mailbox;
use crate::registry::{ActorRecord, ActorRegistry, RegisteredActor};
use crate::spawn::{runtime_handle, spawn_lane_thread};
use crate::spec::ActorSpec;

/// Runtime entrypoint: binds actor identities to execution lanes.
///
/// Cloning is cheap; clones share configuration, registry and sequence counter.
#[derive(Debug, Clone)]
pub struct ActorSystem {
	config: Arc<RuntimeConfig>,
	handle: tokio::runtime::Handle,
	registry: ActorRegistry,
	next_seq: Arc<AtomicU64>,
}

impl Default for ActorSystem {
	fn default() -> Self {
		Self::new()
	}
}

impl ActorSystem {
	/// Creates a system with default configuration.
	pub fn new() -> Self {
		Self::build(RuntimeConfig::default())
	}

	/// Creates a system with explicit configuration.
	///
	/// The configuration is checked with [`RuntimeConfig::validate`] first.
	/// Parallel lanes run on the ambient tokio runtime when there is one, and
	/// on a process-wide fallback runtime otherwise.
	pub fn with_config(config: RuntimeConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self::build(config))
	}

	fn build(config: RuntimeConfig) -> Self {
		Self {
			config: Arc::new(config),
			handle: runtime_handle(),
			registry: ActorRegistry::new(),
			next_seq: Arc::new(AtomicU64::new(0)),
		}
	}

	/// Returns the runtime configuration.
	pub fn config(&self) -> &RuntimeConfig {
		&self.config
	}

	/// Spawns one actor and starts its lane.
	pub fn spawn<M>(&self, spec: ActorSpec<M>) -> Result<ActorRef<M>, SpawnError>
	where
		M: Send + 'static,
	{
		let ActorSpec { id, lane, behavior } = spec;
		let lane = lane.unwrap_or(self.config.default_lane);
		let seq = self.next_seq.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
		let behavior = BehaviorSlot::new(behavior);
		let interval = self.config.drop_log_interval;

		let actor = match lane {
			LaneKind::Serial => {
				let mailbox = Mailbox::new();
				let cell = ActorCell::new(seq, id, Lane::Serial(mailbox.sender()), behavior, interval);
				let actor = ActorRef::from_cell(Arc::new(cell));
				let lane_actor = actor.clone();
				let rx = mailbox.receiver();
				let thread_name = format!("{}-{seq}", self.config.lane_thread_prefix);
				if let Err(source) = spawn_lane_thread(thread_name, move || run_serial_lane(lane_actor, rx)) {
					return Err(SpawnError::LaneThread {
						id: actor.id().to_string(),
						source,
					});
				}
				actor
			}
			LaneKind::Parallel => {
				let cell = ActorCell::new(seq, id, Lane::Parallel(self.handle.clone()), behavior, interval);
				ActorRef::from_cell(Arc::new(cell))
			}
		};

		let registered: Weak<dyn RegisteredActor> = actor.downgrade_cell();
		self.registry.insert(seq, registered);
		tracing::debug!(actor = %actor.id(), seq, lane = lane.as_str(), "actor.spawn");
		Ok(actor)
	}

	/// Returns snapshots of all live actors, sorted by sequence number.
	pub fn snapshots(&self) -> Vec<ActorRecord> {
		self.registry.snapshots()
	}

	/// Shuts down every live actor spawned by this system.
	///
	/// Returns how many actors were asked to shut down. Idempotent.
	pub fn shutdown(&self) -> usize {
		let count = self.registry.shutdown_all();
		tracing::debug!(actors = count, "actor.system.shutdown");
		count
	}
}
