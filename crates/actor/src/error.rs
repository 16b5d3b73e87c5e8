//! Error types for the actor runtime.

use thiserror::Error;

/// Errors raised while spawning an actor.
#[derive(Debug, Error)]
pub enum SpawnError {
	/// The dedicated thread of a serial lane could not be started.
	#[error("failed to start serial lane thread for actor `{id}`")]
	LaneThread {
		/// Identity of the actor being spawned.
		id: String,
		/// The underlying I/O error.
		#[source]
		source: std::io::Error,
	},
}

/// Errors that can occur when loading a [`RuntimeConfig`](crate::RuntimeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or field types.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A numeric option must be strictly positive.
	#[error("option '{0}' must be greater than zero")]
	ZeroValue(&'static str),

	/// The lane thread prefix is empty.
	#[error("option 'lane_thread_prefix' must not be empty")]
	EmptyThreadPrefix,
}
