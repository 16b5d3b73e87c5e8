use crate::LaneKind;
use crate::behavior::Behavior;

/// Builder spec for one actor.
pub struct ActorSpec<M> {
	pub(crate) id: String,
	pub(crate) lane: Option<LaneKind>,
	pub(crate) behavior: Behavior<M>,
}

impl<M> ActorSpec<M> {
	/// Creates a spec from an identity and the actor's default behavior.
	pub fn new(id: impl Into<String>, behavior: Behavior<M>) -> Self {
		Self {
			id: id.into(),
			lane: None,
			behavior,
		}
	}

	/// Chooses the lane kind.
	#[must_use]
	pub fn lane(mut self, lane: LaneKind) -> Self {
		self.lane = Some(lane);
		self
	}

	/// Runs the actor on its own serial lane.
	#[must_use]
	pub fn serial(self) -> Self {
		self.lane(LaneKind::Serial)
	}

	/// Runs the actor on the shared parallel pool.
	#[must_use]
	pub fn parallel(self) -> Self {
		self.lane(LaneKind::Parallel)
	}
}

impl<M> std::fmt::Debug for ActorSpec<M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ActorSpec")
			.field("id", &self.id)
			.field("lane", &self.lane)
			.field("behavior", &self.behavior)
			.finish()
	}
}
