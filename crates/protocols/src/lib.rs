//! In-process protocols built on `strand-actor`.
//!
//! * [`scatter_gather`]: a manager feeds a worker pool one task at a time and
//!   delivers the ordered aggregate (or an explicit failure) to a client.
//! * [`ping_pong`]: two serial players volley a counter up to a limit and
//!   report the final value to a referee exactly once.

pub mod ping_pong;
pub mod scatter_gather;

pub use ping_pong::{Rally, Referee, Report};
pub use scatter_gather::{Client, GatherError, Manager, Outcome, Task, slow_fibonacci};
