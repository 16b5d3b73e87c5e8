mod common;

use std::sync::Arc;

use common::{assert_quiet, recv, recv_n};
use strand_actor::{Actor, ActorSpec, ActorSystem, Behavior};
use tokio::sync::mpsc::{self, UnboundedSender};

fn second(tx: UnboundedSender<(&'static str, u32)>) -> Behavior<u32> {
	Behavior::named("second", move |_, msg, _| {
		let _ = tx.send(("second", msg));
	})
}

fn first(tx: UnboundedSender<(&'static str, u32)>) -> Behavior<u32> {
	Behavior::named("first", move |ctx, msg, _| {
		ctx.become_behavior(second(tx.clone()));
		let _ = tx.send(("first", msg));
	})
}

#[tokio::test]
async fn become_applies_from_the_next_message_only() {
	let system = ActorSystem::new();
	let (tx, mut rx) = mpsc::unbounded_channel();
	let actor = system.spawn(ActorSpec::new("switch", first(tx))).expect("spawn");

	// Both messages are queued before the first dispatch runs `become`.
	actor.tell(1, None);
	actor.tell(2, None);
	actor.tell(3, None);

	assert_eq!(recv_n(&mut rx, 3).await, vec![("first", 1), ("second", 2), ("second", 3)]);
	actor.shutdown();
}

#[tokio::test]
async fn behavior_in_flight_keeps_running_after_become() {
	let system = ActorSystem::new();
	let (tx, mut rx) = mpsc::unbounded_channel();
	let actor = system
		.spawn(ActorSpec::new(
			"observer",
			Behavior::named("before", move |ctx, msg: u32, _| {
				let tag_before = ctx.behavior().tag();
				ctx.become_behavior(Behavior::<u32>::named("after", |_, _, _| {}));
				let _ = tx.send((msg, tag_before, ctx.behavior().tag()));
			}),
		))
		.expect("spawn");

	actor.tell(7, None);
	assert_eq!(recv(&mut rx).await, (7, "before", "after"));
	actor.shutdown();
}

#[tokio::test]
async fn self_sent_message_sees_the_new_behavior() {
	let system = ActorSystem::new();
	let (tx, mut rx) = mpsc::unbounded_channel();
	let actor = system.spawn(ActorSpec::new("self-tell", {
		let tx = tx.clone();
		Behavior::named("first", move |ctx, msg: u32, _| {
			ctx.become_behavior(second(tx.clone()));
			let _ = tx.send(("first", msg));
			ctx.tell(msg + 1, None);
		})
	}));
	let actor = actor.expect("spawn");

	actor.tell(10, None);
	assert_eq!(recv_n(&mut rx, 2).await, vec![("first", 10), ("second", 11)]);
	assert_quiet(&mut rx).await;
	actor.shutdown();
}

/// Counter whose whole state lives in the installed behavior.
fn counting(count: u32, tx: UnboundedSender<u32>) -> Behavior<u32> {
	Behavior::named("counting", move |ctx, step, _| {
		let next = count + step;
		let _ = tx.send(next);
		ctx.become_behavior(counting(next, tx.clone()));
	})
}

#[tokio::test]
async fn behavior_carries_state_between_messages() {
	let system = ActorSystem::new();
	let (tx, mut rx) = mpsc::unbounded_channel();
	let actor = system.spawn(ActorSpec::new("counter", counting(0, tx))).expect("spawn");

	for step in [1, 2, 3, 4] {
		actor.tell(step, None);
	}
	assert_eq!(recv_n(&mut rx, 4).await, vec![1, 3, 6, 10]);
	actor.shutdown();
}

#[tokio::test]
async fn previous_behavior_can_be_restored() {
	let system = ActorSystem::new();
	let (tx, mut rx) = mpsc::unbounded_channel::<(&'static str, u32)>();
	let saved = Arc::new(parking_lot::Mutex::new(None));

	let actor = {
		let saved = Arc::clone(&saved);
		let tx = tx.clone();
		system
			.spawn(ActorSpec::new(
				"toggle",
				Behavior::named("base", move |ctx, msg: u32, _| {
					let _ = tx.send(("base", msg));
					*saved.lock() = Some(ctx.behavior());
					let restore = Arc::clone(&saved);
					let tx = tx.clone();
					ctx.become_behavior(Behavior::<u32>::named("detour", move |ctx, msg, _| {
						let _ = tx.send(("detour", msg));
						if let Some(base) = restore.lock().take() {
							ctx.become_behavior(base);
						}
					}));
				}),
			))
			.expect("spawn")
	};

	for msg in 1..=4 {
		actor.tell(msg, None);
	}
	assert_eq!(recv_n(&mut rx, 4).await, vec![("base", 1), ("detour", 2), ("base", 3), ("detour", 4)]);
	actor.shutdown();
}
