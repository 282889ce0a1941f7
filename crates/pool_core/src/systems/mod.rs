//! Replay systems. Each reacts to the [crate::clock::CurrentEvent] inserted
//! by the runner.

pub mod dropoff;
pub mod pickup;
