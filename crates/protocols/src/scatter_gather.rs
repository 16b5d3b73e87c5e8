//! Scatter/gather: a manager splits a batch across a worker pool and hands the
//! ordered aggregate to a client.
//!
//! The manager keeps its whole progress in its installed behavior. Every
//! result it receives retires the current behavior and installs the next one,
//! so the serial lane is the only synchronization the protocol needs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use strand_actor::{Actor, ActorContext, ActorRef, ActorSpec, ActorSystem, Behavior, Sender, SpawnError};
use thiserror::Error;
use tokio::sync::watch;

/// One unit of work, or its result, tagged with its input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
	pub position: usize,
	pub value: u64,
}

/// Anticipated protocol failures, delivered to the client as ordinary messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatherError {
	#[error("empty input: nothing to scatter across workers")]
	EmptyInput,
}

/// What the client eventually receives: the results in input order, or a failure.
pub type Outcome = Result<Vec<u64>, GatherError>;

/// Naive doubly recursive fibonacci, used as deliberately slow worker load.
pub fn slow_fibonacci(n: u64) -> u64 {
	if n < 2 { n } else { slow_fibonacci(n - 1) + slow_fibonacci(n - 2) }
}

fn worker() -> Behavior<Task> {
	Behavior::named("worker", |ctx, task: Task, sender| {
		let value = slow_fibonacci(task.value);
		tracing::trace!(worker = %ctx.id(), position = task.position, input = task.value, value, "gather.work");
		ctx.reply(&sender, Task { position: task.position, value });
	})
}

struct Gathering {
	tasks: Arc<[Task]>,
	/// Index of the next task not yet handed to a worker.
	next: usize,
	/// Taken by the dispatch that retires this behavior.
	results: Mutex<Vec<Task>>,
	client: ActorRef<Outcome>,
}

fn gathering(state: Gathering) -> Behavior<Task> {
	Behavior::named("gathering", move |ctx, result: Task, sender| collect(ctx, &state, result, sender))
}

fn collect(ctx: &ActorContext<Task>, state: &Gathering, result: Task, sender: Sender<Task>) {
	let mut results = std::mem::take(&mut *state.results.lock());
	results.push(result);
	tracing::debug!(
		manager = %ctx.id(),
		position = result.position,
		received = results.len(),
		expected = state.tasks.len(),
		"gather.result"
	);

	if results.len() == state.tasks.len() {
		results.sort_by_key(|task| task.position);
		let values = results.into_iter().map(|task| task.value).collect();
		state.client.tell(Ok(values), None);
		if let Some(worker) = &sender {
			worker.shutdown();
		}
		tracing::debug!(manager = %ctx.id(), "gather.deliver");
		ctx.shutdown();
		return;
	}

	let mut next = state.next;
	match (&sender, state.tasks.get(next)) {
		(Some(_), Some(task)) => {
			ctx.reply(&sender, *task);
			next += 1;
		}
		(Some(worker), None) => worker.shutdown(),
		(None, _) => tracing::warn!(manager = %ctx.id(), position = result.position, "result without a worker address"),
	}

	ctx.become_behavior(gathering(Gathering {
		tasks: Arc::clone(&state.tasks),
		next,
		results: Mutex::new(results),
		client: state.client.clone(),
	}));
}

/// Manager actor plus the worker pool it feeds.
pub struct Manager {
	actor: ActorRef<Task>,
	workers: Vec<ActorRef<Task>>,
	tasks: Arc<[Task]>,
	client: ActorRef<Outcome>,
	started: AtomicBool,
}

impl Manager {
	/// Spawns the manager and `min(workers, values.len())` workers.
	///
	/// Workers use the system's default lane; the manager always runs serially.
	pub fn spawn(
		system: &ActorSystem,
		client: &ActorRef<Outcome>,
		values: impl IntoIterator<Item = u64>,
		workers: usize,
	) -> Result<Self, SpawnError> {
		let tasks: Arc<[Task]> = values
			.into_iter()
			.enumerate()
			.map(|(position, value)| Task { position, value })
			.collect();
		let pool = workers.min(tasks.len());

		let workers = (0..pool)
			.map(|i| system.spawn(ActorSpec::new(format!("worker-{i}"), worker())))
			.collect::<Result<Vec<_>, _>>()?;
		let state = Gathering {
			tasks: Arc::clone(&tasks),
			next: pool,
			results: Mutex::new(Vec::with_capacity(tasks.len())),
			client: client.clone(),
		};
		let actor = system.spawn(ActorSpec::new("manager", gathering(state)).serial())?;

		Ok(Self {
			actor,
			workers,
			tasks,
			client: client.clone(),
			started: AtomicBool::new(false),
		})
	}

	/// Hands one initial task to each worker, claiming the manager as sender.
	///
	/// With nothing to scatter the client receives [`GatherError::EmptyInput`]
	/// and the manager shuts down. Returns `false` if already started.
	pub fn start(&self) -> bool {
		if self.started.swap(true, Ordering::AcqRel) {
			return false;
		}
		if self.workers.is_empty() {
			tracing::debug!(tasks = self.tasks.len(), "gather.empty");
			self.client.tell(Err(GatherError::EmptyInput), None);
			self.actor.shutdown();
			return true;
		}
		tracing::debug!(tasks = self.tasks.len(), workers = self.workers.len(), "gather.start");
		for (worker, task) in self.workers.iter().zip(self.tasks.iter()) {
			worker.tell(*task, self.actor.myself());
		}
		true
	}

	pub fn actor(&self) -> &ActorRef<Task> {
		&self.actor
	}

	pub fn workers(&self) -> &[ActorRef<Task>] {
		&self.workers
	}
}

/// Final receipt shared between a [`Client`] handle and its behaviors.
struct Receipt {
	outcome: watch::Sender<Option<Outcome>>,
	duplicates: AtomicUsize,
}

fn awaiting(receipt: Arc<Receipt>) -> Behavior<Outcome> {
	Behavior::named("awaiting", move |ctx, outcome: Outcome, _| {
		tracing::debug!(client = %ctx.id(), ok = outcome.is_ok(), "gather.outcome");
		receipt.outcome.send_replace(Some(outcome));
		ctx.become_behavior(settled(Arc::clone(&receipt)));
	})
}

fn settled(receipt: Arc<Receipt>) -> Behavior<Outcome> {
	Behavior::named("settled", move |ctx, _, _| {
		let duplicates = receipt.duplicates.fetch_add(1, Ordering::AcqRel) + 1;
		tracing::warn!(client = %ctx.id(), duplicates, "outcome delivered more than once");
	})
}

/// Actor that records the first outcome it receives.
pub struct Client {
	actor: ActorRef<Outcome>,
	receipt: Arc<Receipt>,
}

impl Client {
	pub fn spawn(system: &ActorSystem) -> Result<Self, SpawnError> {
		let (outcome, _) = watch::channel(None);
		let receipt = Arc::new(Receipt {
			outcome,
			duplicates: AtomicUsize::new(0),
		});
		let actor = system.spawn(ActorSpec::new("client", awaiting(Arc::clone(&receipt))).serial())?;
		Ok(Self { actor, receipt })
	}

	pub fn actor(&self) -> &ActorRef<Outcome> {
		&self.actor
	}

	/// Waits for the first outcome.
	pub async fn outcome(&self) -> Option<Outcome> {
		let mut rx = self.receipt.outcome.subscribe();
		let outcome = rx.wait_for(Option::is_some).await.ok().and_then(|outcome| outcome.clone());
		outcome
	}

	/// First outcome, if one has arrived.
	pub fn try_outcome(&self) -> Option<Outcome> {
		self.receipt.outcome.borrow().clone()
	}

	/// Outcomes received after the first one.
	pub fn duplicates(&self) -> usize {
		self.receipt.duplicates.load(Ordering::Acquire)
	}
}
