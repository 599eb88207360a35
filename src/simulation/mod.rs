//! The period-stepping engine that drives a [`crate::chain::SupplyChain`]
//! through time under a chosen control/release strategy pair.

pub mod engine;

pub use engine::Simulator;
