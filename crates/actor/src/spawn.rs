use std::sync::OnceLock;

use crate::LaneKind;

/// Returns the ambient tokio runtime, or a process-wide fallback runtime when
/// called outside of one.
pub(crate) fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static GLOBAL_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = GLOBAL_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(2)
			.thread_name("strand-actor-global")
			.build()
			.expect("failed to build strand-actor global tokio runtime")
	});
	runtime.handle().clone()
}

/// Spawns the dedicated OS thread backing one serial lane.
pub(crate) fn spawn_lane_thread<F>(name: String, f: F) -> std::io::Result<std::thread::JoinHandle<()>>
where
	F: FnOnce() + Send + 'static,
{
	tracing::trace!(lane = LaneKind::Serial.as_str(), thread = %name, "actor.spawn_lane_thread");
	std::thread::Builder::new().name(name).spawn(f)
}

/// Runs one parallel-lane job on the runtime's blocking pool.
pub(crate) fn spawn_lane_job<F>(handle: &tokio::runtime::Handle, f: F)
where
	F: FnOnce() + Send + 'static,
{
	tracing::trace!(lane = LaneKind::Parallel.as_str(), "actor.spawn_lane_job");
	drop(handle.spawn_blocking(f));
}
