//! Minimal actor runtime.
//!
//! Actors are independent units of state that communicate only through
//! asynchronous messages. Each actor is bound at spawn time to one execution
//! lane:
//!
//! * [`LaneKind::Serial`]: a dedicated thread drains an unbounded FIFO mailbox.
//!   Messages are handled one at a time, in the order `tell` accepted them.
//! * [`LaneKind::Parallel`]: every message runs as its own job on the runtime's
//!   blocking pool. No ordering or mutual exclusion between messages.
//!
//! The handler of an actor's next message is a first-class [`Behavior`]. A
//! behavior may replace itself through [`ActorContext::become_behavior`]; the
//! replacement applies from the next dispatched message on.
//!
//! ```no_run
//! use strand_actor::{Actor, ActorSpec, ActorSystem, Behavior};
//!
//! let system = ActorSystem::new();
//! let echo = system
//! 	.spawn(ActorSpec::new(
//! 		"echo",
//! 		Behavior::new(|ctx, msg: String, sender| {
//! 			ctx.reply(&sender, msg);
//! 		}),
//! 	))
//! 	.expect("lane thread starts");
//! echo.tell("hello".to_string(), None);
//! echo.shutdown();
//! ```
//!
//! Telling a shut down actor is not an error: the message is counted as
//! dropped and discarded. A panic inside a behavior is a programming fault.
//! It is reported through [`ActorRef::exit`] (kind [`ActorExitKind::Panicked`]
//! with the panic message) and an `actor.behavior.panicked` error event, and
//! the actor is shut down. It is never turned into a reply message.

mod actor;
mod behavior;
mod cell;
mod config;
mod context;
mod dispatch;
mod error;
mod exit;
mod lane;
mod mailbox;
mod registry;
mod spawn;
mod spec;
mod system;

pub use actor::{Actor, ActorRef, Sender};
pub use behavior::Behavior;
pub use cell::ActorStats;
pub use config::RuntimeConfig;
pub use context::ActorContext;
pub use error::{ConfigError, SpawnError};
pub use exit::{ActorExit, ActorExitKind};
pub use lane::LaneKind;
pub use registry::ActorRecord;
pub use spec::ActorSpec;
pub use system::ActorSystem;
