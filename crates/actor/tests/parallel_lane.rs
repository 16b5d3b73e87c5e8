mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{WAIT, assert_quiet, recv, recv_n};
use strand_actor::{Actor, ActorExitKind, ActorSpec, ActorSystem, Behavior, LaneKind, RuntimeConfig};
use tokio::sync::mpsc;

#[tokio::test]
async fn parallel_lane_runs_messages_concurrently() {
	let system = ActorSystem::new();
	let active = Arc::new(AtomicUsize::new(0));
	let peak = Arc::new(AtomicUsize::new(0));
	let (tx, mut rx) = mpsc::unbounded_channel();

	let actor = {
		let active = Arc::clone(&active);
		let peak = Arc::clone(&peak);
		system
			.spawn(
				ActorSpec::new(
					"pool",
					Behavior::new(move |_, msg: u32, _| {
						let now = active.fetch_add(1, Ordering::SeqCst) + 1;
						peak.fetch_max(now, Ordering::SeqCst);
						std::thread::sleep(Duration::from_millis(100));
						active.fetch_sub(1, Ordering::SeqCst);
						let _ = tx.send(msg);
					}),
				)
				.parallel(),
			)
			.expect("spawn")
	};
	assert_eq!(actor.lane(), LaneKind::Parallel);

	for i in 0..4 {
		actor.tell(i, None);
	}
	let mut seen = recv_n(&mut rx, 4).await;
	seen.sort_unstable();

	assert_eq!(seen, vec![0, 1, 2, 3]);
	assert!(peak.load(Ordering::SeqCst) >= 2, "parallel lane should overlap dispatches");
	assert_eq!(actor.stats().dispatched, 4);
	actor.shutdown();
}

#[tokio::test]
async fn parallel_shutdown_waits_for_in_flight_jobs_before_stopping() {
	let system = ActorSystem::new();
	let (entered_tx, mut entered_rx) = mpsc::unbounded_channel();
	let (done_tx, mut done_rx) = mpsc::unbounded_channel();
	let actor = system
		.spawn(
			ActorSpec::new(
				"slow-pool",
				Behavior::new(move |_, msg: u32, _| {
					let _ = entered_tx.send(msg);
					std::thread::sleep(Duration::from_millis(150));
					let _ = done_tx.send(msg);
				}),
			)
			.parallel(),
		)
		.expect("spawn");

	actor.tell(1, None);
	assert_eq!(recv(&mut entered_rx).await, 1);

	actor.shutdown();
	assert!(actor.is_shut_down());
	actor.tell(2, None);

	// `stopped` resolves only after the in-flight job has finished.
	tokio::time::timeout(WAIT, actor.stopped()).await.expect("lane stops");
	assert_eq!(done_rx.try_recv().ok(), Some(1));
	assert_quiet(&mut entered_rx).await;
	assert_eq!(actor.stats().dropped, 1);
	assert_eq!(actor.exit().map(|exit| exit.kind()), Some(ActorExitKind::Shutdown));
}

#[tokio::test]
async fn idle_parallel_actor_stops_immediately() {
	let system = ActorSystem::new();
	let actor = system
		.spawn(ActorSpec::new("idle-pool", Behavior::<u32>::new(|_, _, _| {})).parallel())
		.expect("spawn");

	actor.shutdown();
	tokio::time::timeout(Duration::from_millis(500), actor.stopped())
		.await
		.expect("no in-flight work, stopped at once");
}

#[tokio::test]
async fn become_is_visible_across_parallel_dispatches() {
	let system = ActorSystem::new();
	let (tx, mut rx) = mpsc::unbounded_channel();
	let switched = {
		let tx = tx.clone();
		Behavior::named("switched", move |_, msg: u32, _| {
			let _ = tx.send(("switched", msg));
		})
	};
	let switched = Arc::new(switched);
	let actor = system
		.spawn(
			ActorSpec::new(
				"pool-become",
				Behavior::named("initial", move |ctx, msg: u32, _| {
					ctx.become_behavior(Arc::clone(&switched));
					let _ = tx.send(("initial", msg));
				}),
			)
			.parallel(),
		)
		.expect("spawn");

	actor.tell(1, None);
	assert_eq!(recv(&mut rx).await, ("initial", 1));
	actor.tell(2, None);
	assert_eq!(recv(&mut rx).await, ("switched", 2));
	actor.shutdown();
}

#[tokio::test]
async fn default_lane_comes_from_config() {
	let system = ActorSystem::with_config(RuntimeConfig::default().default_lane(LaneKind::Parallel)).expect("valid config");
	let actor = system.spawn(ActorSpec::new("defaulted", Behavior::<()>::new(|_, _, _| {}))).expect("spawn");
	let pinned = system
		.spawn(ActorSpec::new("pinned", Behavior::<()>::new(|_, _, _| {})).serial())
		.expect("spawn");

	assert_eq!(actor.lane(), LaneKind::Parallel);
	assert_eq!(pinned.lane(), LaneKind::Serial);
	system.shutdown();
}

#[test]
fn job_discarded_by_a_stopped_runtime_is_counted_and_releases_stop() {
	let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
	let system = runtime.block_on(async { ActorSystem::new() });
	drop(runtime);

	let handled = Arc::new(AtomicUsize::new(0));
	let actor = {
		let handled = Arc::clone(&handled);
		system
			.spawn(
				ActorSpec::new(
					"orphaned-pool",
					Behavior::new(move |_, _: u32, _| {
						handled.fetch_add(1, Ordering::SeqCst);
					}),
				)
				.parallel(),
			)
			.expect("spawn")
	};

	actor.tell(1, None);
	actor.shutdown();

	let waiter = tokio::runtime::Builder::new_current_thread().enable_time().build().expect("runtime");
	let _guard = waiter.enter();
	waiter
		.block_on(tokio::time::timeout(WAIT, actor.stopped()))
		.expect("stopped resolves without in-flight jobs");

	assert_eq!(handled.load(Ordering::SeqCst), 0);
	let stats = actor.stats();
	assert_eq!(stats.dispatched, 0);
	assert_eq!(stats.dropped, 1);
	let record = &system.snapshots()[0];
	assert!(record.shut_down && record.stopped, "got {record:?}");
}
