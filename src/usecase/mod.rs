//! Usecase layer: solve orchestration, batch runs + events.

pub mod batch;
pub mod event;
pub mod solve;
pub mod stats;
