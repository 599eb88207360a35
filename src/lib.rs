//! Multi-echelon supply-chain simulation core.
//!
//! The period-stepping engine ([`simulation::Simulator`]) drives a
//! [`chain::SupplyChain`] of [`model::Node`]s through a sequence of discrete
//! periods under a pluggable control/release [`strategy`] pair, emitting a
//! [`metrics::MetricRecord`] stream. `io` holds sink/fixture helpers that sit
//! outside the simulation core proper.

pub mod chain;
pub mod error;
pub mod io;
pub mod metrics;
pub mod model;
pub mod simulation;
pub mod strategy;
