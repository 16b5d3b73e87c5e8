use serde::Deserialize;

use crate::actor::Envelope;
use crate::mailbox::MailboxSender;

/// Execution lane kind, fixed for the lifetime of one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneKind {
	/// One dedicated thread; messages are processed one at a time, in acceptance order.
	#[default]
	Serial,
	/// Shared blocking pool; messages may be processed concurrently and out of order.
	Parallel,
}

impl LaneKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Serial => "serial",
			Self::Parallel => "parallel",
		}
	}
}

impl std::fmt::Display for LaneKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Submission side of one actor's lane.
pub(crate) enum Lane<M> {
	Serial(MailboxSender<Envelope<M>>),
	Parallel(tokio::runtime::Handle),
}

impl<M> Lane<M> {
	pub(crate) const fn kind(&self) -> LaneKind {
		match self {
			Self::Serial(_) => LaneKind::Serial,
			Self::Parallel(_) => LaneKind::Parallel,
		}
	}
}
