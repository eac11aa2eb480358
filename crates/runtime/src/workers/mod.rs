//! Background tasks that keep the match moving.
//!
//! [`SimulationWorker`] exclusively owns the engine; [`ticker`] feeds it
//! periodic ticks so delayed effects land without player input.

mod simulation;
pub(crate) mod ticker;

pub use simulation::{Command, SimulationWorker};
