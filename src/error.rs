//! Error types shared across the crate.

use thiserror::Error;

/// Everything that can go wrong building or running a [`crate::chain::SupplyChain`].
///
/// Configuration errors are returned from construction; state errors are
/// returned from [`crate::simulation::Simulator::run`] and name the offending
/// node and phase so a caller can correlate them with the metric stream.
#[derive(Debug, Error)]
pub enum SupplyChainError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("edge references unknown node: {0}")]
    UnknownEdgeEndpoint(String),

    #[error("cycle detected in bill-of-materials graph")]
    CycleDetected,

    #[error("invalid multiplicity {number} on edge {source} -> {destination}: must be >= 1")]
    InvalidMultiplicity {
        source: String,
        destination: String,
        number: i64,
    },

    #[error(
        "node {node} attempted to release {attempted} units of {sku} but only had {available} on hand (phase: {phase})"
    )]
    OverRelease {
        node: String,
        sku: String,
        attempted: i64,
        available: i64,
        phase: &'static str,
    },

    #[error("node {node} has negative stock for sku {sku} ({quantity}) after phase {phase}")]
    NegativeStock {
        node: String,
        sku: String,
        quantity: i64,
        phase: &'static str,
    },

    #[error("invariant violated at node {node} during phase {phase}: {detail}")]
    Invariant {
        node: String,
        phase: &'static str,
        detail: String,
    },

    #[error("sales/lead-time provider error: {0}")]
    Provider(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("metrics sink I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization error")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),
}
