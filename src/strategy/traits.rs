//! The four interfaces a caller can plug into the simulator.

use crate::error::SupplyChainError;
use crate::model::{Node, QuantityMap};

/// Per-period demand lookup for one node. Consumed exactly once per period;
/// implementations that wrap a fixed schedule should drain it destructively
/// so that a chain cannot accidentally be replayed against the same demand.
pub trait SalesProvider: Send {
    fn pop(&mut self, period: u32) -> Result<Vec<i64>, SupplyChainError>;
}

/// Per-period lead-time lookup applied to orders placed this period.
pub trait LeadTimeProvider: Send {
    fn get(&mut self, period: u32) -> Result<u32, SupplyChainError>;
}

/// Decides how much a node should order from its supplier(s) this period.
///
/// The returned map carries exactly one entry, keyed by `node.sku`. The
/// simulator is responsible for decomposing that quantity onto the node's
/// parents according to BOM multiplicity.
///
/// `feasible` is `inventory_assemblies_feasible(node)` as computed by the
/// simulator for the current period. The trait itself has no graph access,
/// so the caller supplies the one number a control policy needs from the
/// wider chain.
pub trait ControlStrategy: Send {
    fn get_orders(&mut self, node: &Node, feasible: i64, period: u32) -> QuantityMap;
}

/// Decides how to allocate a node's on-hand stock of its own SKU across
/// downstream children with outstanding orders.
///
/// Constraints the implementation must uphold: `sum(releases) <=
/// node.stock[node.sku]` and `releases[c] <= node.orders[c]` for every child
/// `c`.
pub trait ReleaseStrategy: Send {
    fn get_releases(&mut self, node: &Node) -> QuantityMap;
}
