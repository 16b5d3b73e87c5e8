use std::any::Any;

/// Exit classification for one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActorExitKind {
	/// `shutdown` was requested.
	Shutdown,
	/// A behavior panicked while handling a message.
	Panicked,
}

/// Exit summary recorded once per actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorExit {
	kind: ActorExitKind,
	message: Option<String>,
}

impl ActorExit {
	pub(crate) const fn shutdown() -> Self {
		Self {
			kind: ActorExitKind::Shutdown,
			message: None,
		}
	}

	pub(crate) fn panicked(message: impl Into<String>) -> Self {
		Self {
			kind: ActorExitKind::Panicked,
			message: Some(message.into()),
		}
	}

	pub fn kind(&self) -> ActorExitKind {
		self.kind
	}

	pub fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}

	pub fn is_failure(&self) -> bool {
		matches!(self.kind, ActorExitKind::Panicked)
	}
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(msg) = payload.downcast_ref::<&'static str>() {
		return (*msg).to_string();
	}
	if let Some(msg) = payload.downcast_ref::<String>() {
		return msg.clone();
	}
	"non-string panic payload".to_string()
}
