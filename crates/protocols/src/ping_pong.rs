//! Ping/pong: two serial players volley a counter until it reaches a limit,
//! then the receiving player reports the final value to a referee.

use std::sync::Arc;

use parking_lot::Mutex;
use strand_actor::{Actor, ActorRef, ActorSpec, ActorSystem, Behavior, SpawnError};
use tokio::sync::watch;

/// End-of-rally report sent to the referee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
	/// Id of the player that ended the rally.
	pub player: String,
	pub value: u32,
}

fn player(limit: u32, referee: ActorRef<Report>) -> Behavior<u32> {
	Behavior::named("player", move |ctx, value: u32, sender| {
		if value < limit && ctx.reply(&sender, value + 1) {
			tracing::trace!(player = %ctx.id(), value, "rally.volley");
			return;
		}
		tracing::debug!(player = %ctx.id(), value, limit, "rally.report");
		referee.tell(
			Report {
				player: ctx.id().to_string(),
				value,
			},
			None,
		);
		if let Some(opponent) = &sender {
			opponent.shutdown();
		}
		ctx.shutdown();
	})
}

/// Two players sharing one referee.
pub struct Rally {
	ping: ActorRef<u32>,
	pong: ActorRef<u32>,
}

impl Rally {
	/// Spawns both players on serial lanes.
	pub fn spawn(system: &ActorSystem, limit: u32, referee: &ActorRef<Report>) -> Result<Self, SpawnError> {
		let ping = system.spawn(ActorSpec::new("ping", player(limit, referee.clone())).serial())?;
		let pong = system.spawn(ActorSpec::new("pong", player(limit, referee.clone())).serial())?;
		Ok(Self { ping, pong })
	}

	/// Puts `value` in play: pong receives it with ping as the sender.
	pub fn serve(&self, value: u32) {
		self.pong.tell(value, self.ping.myself());
	}

	pub fn ping(&self) -> &ActorRef<u32> {
		&self.ping
	}

	pub fn pong(&self) -> &ActorRef<u32> {
		&self.pong
	}
}

struct Scoresheet {
	reports: Mutex<Vec<Report>>,
	first: watch::Sender<Option<Report>>,
}

/// Actor that keeps every report it receives.
pub struct Referee {
	actor: ActorRef<Report>,
	sheet: Arc<Scoresheet>,
}

impl Referee {
	pub fn spawn(system: &ActorSystem) -> Result<Self, SpawnError> {
		let (first, _) = watch::channel(None);
		let sheet = Arc::new(Scoresheet {
			reports: Mutex::new(Vec::new()),
			first,
		});
		let recorder = Arc::clone(&sheet);
		let actor = system.spawn(
			ActorSpec::new(
				"referee",
				Behavior::named("scoring", move |_, report: Report, _| {
					recorder.first.send_if_modified(|first| {
						if first.is_some() {
							return false;
						}
						*first = Some(report.clone());
						true
					});
					recorder.reports.lock().push(report);
				}),
			)
			.serial(),
		)?;
		Ok(Self { actor, sheet })
	}

	pub fn actor(&self) -> &ActorRef<Report> {
		&self.actor
	}

	/// Waits for the first report.
	pub async fn first_report(&self) -> Option<Report> {
		let mut rx = self.sheet.first.subscribe();
		let report = rx.wait_for(Option::is_some).await.ok().and_then(|report| report.clone());
		report
	}

	/// Every report received so far, in arrival order.
	pub fn reports(&self) -> Vec<Report> {
		self.sheet.reports.lock().clone()
	}
}
