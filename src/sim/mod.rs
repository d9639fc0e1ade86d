//! Simulation layer: the map and the per-frame session state machine.

pub mod map;
pub mod session;
