//! Demand-schedule fixtures and metric-stream sinks. Neither is part of the
//! simulation core; both are ordinary consumers of its public types.

pub mod demand;
pub mod reporting;
