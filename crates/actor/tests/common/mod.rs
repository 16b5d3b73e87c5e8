//! Common utilities for actor runtime integration tests.
#![allow(dead_code)]

use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

/// Upper bound for any single wait in these tests.
pub const WAIT: Duration = Duration::from_secs(5);

/// Installs a fmt subscriber once per test binary.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

/// Receives the next value or fails the test after [`WAIT`].
pub async fn recv<T>(rx: &mut UnboundedReceiver<T>) -> T {
	tokio::time::timeout(WAIT, rx.recv())
		.await
		.expect("timed out waiting for actor output")
		.expect("actor output channel closed")
}

/// Receives `count` values in arrival order.
pub async fn recv_n<T>(rx: &mut UnboundedReceiver<T>, count: usize) -> Vec<T> {
	let mut out = Vec::with_capacity(count);
	for _ in 0..count {
		out.push(recv(rx).await);
	}
	out
}

/// Asserts that nothing else arrives within a short grace period.
pub async fn assert_quiet<T: std::fmt::Debug>(rx: &mut UnboundedReceiver<T>) {
	let extra = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
	assert!(matches!(extra, Err(_) | Ok(None)), "unexpected extra output: {extra:?}");
}
