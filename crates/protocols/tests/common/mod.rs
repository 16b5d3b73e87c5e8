//! Shared helpers for protocol scenarios.
#![allow(dead_code)]

use std::future::Future;
use std::time::Duration;

/// Upper bound for any single wait in these tests.
pub const WAIT: Duration = Duration::from_secs(10);

/// Installs a fmt subscriber once per test binary.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

/// Awaits `fut` or fails the test after [`WAIT`].
pub async fn within<T>(what: &str, fut: impl Future<Output = T>) -> T {
	match tokio::time::timeout(WAIT, fut).await {
		Ok(value) => value,
		Err(_) => panic!("timed out waiting for {what}"),
	}
}

/// Lets stray messages land before asserting on totals.
pub async fn settle() {
	tokio::time::sleep(Duration::from_millis(150)).await;
}
