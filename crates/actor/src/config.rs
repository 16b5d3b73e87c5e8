use serde::Deserialize;

use crate::LaneKind;
use crate::error::ConfigError;

/// Runtime-wide configuration shared by every actor of one [`ActorSystem`](crate::ActorSystem).
///
/// Builder setters never fail; [`from_toml_str`](Self::from_toml_str) and
/// [`ActorSystem::with_config`](crate::ActorSystem::with_config) both run
/// [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
	/// Prefix for serial lane thread names; the actor sequence number is appended.
	pub lane_thread_prefix: String,
	/// Lane used by specs that do not pick one.
	pub default_lane: LaneKind,
	/// Every n-th discarded message is summarized at debug level.
	pub drop_log_interval: u64,
}

impl Default for RuntimeConfig {
	fn default() -> Self {
		Self {
			lane_thread_prefix: "strand-lane".to_string(),
			default_lane: LaneKind::Serial,
			drop_log_interval: 1024,
		}
	}
}

impl RuntimeConfig {
	/// Parses and validates a TOML document. Missing keys keep their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks value ranges that serde cannot express.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.lane_thread_prefix.is_empty() {
			return Err(ConfigError::EmptyThreadPrefix);
		}
		if self.drop_log_interval == 0 {
			return Err(ConfigError::ZeroValue("drop_log_interval"));
		}
		Ok(())
	}

	/// Sets the serial lane thread name prefix.
	#[must_use]
	pub fn lane_thread_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.lane_thread_prefix = prefix.into();
		self
	}

	/// Sets the lane used when a spec does not choose one.
	#[must_use]
	pub fn default_lane(mut self, lane: LaneKind) -> Self {
		self.default_lane = lane;
		self
	}

	/// Sets the discarded-message summary interval. Zero is rejected by
	/// [`validate`](Self::validate).
	#[must_use]
	pub fn drop_log_interval(mut self, interval: u64) -> Self {
		self.drop_log_interval = interval;
		self
	}
}
