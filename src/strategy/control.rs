//! Control strategies: decide how much a node should order from its
//! supplier(s) this period.

use crate::model::{Node, QuantityMap};

use super::traits::ControlStrategy;

/// The default RSQ (periodic review R, reorder level s, batch size Q) policy.
///
/// Orders a multiple of `order_quantity` large enough to bring the feasible
/// position back up to `reorder_level`, but only on review periods.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsqControl;

impl ControlStrategy for RsqControl {
    fn get_orders(&mut self, node: &Node, feasible: i64, period: u32) -> QuantityMap {
        let policy = &node.policy;
        let review_time = policy.review_time.max(1);
        let mut quantity = 0;

        if (period as i64) % review_time == 0 && feasible < policy.reorder_level {
            let gap = policy.reorder_level - feasible;
            if policy.order_quantity > 0 {
                let batches = (gap + policy.order_quantity - 1) / policy.order_quantity;
                quantity = batches * policy.order_quantity;
            }
        }

        let mut orders = QuantityMap::new();
        orders.set(node.sku.clone(), quantity);
        orders
    }
}

/// Orders exactly the feasibility gap every period, with no batching and no
/// review-period gating. A secondary [`ControlStrategy`] kept alongside
/// [`RsqControl`] to exercise the trait as a genuine seam; not used by
/// default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveControl;

impl ControlStrategy for NaiveControl {
    fn get_orders(&mut self, node: &Node, feasible: i64, _period: u32) -> QuantityMap {
        let gap = (node.policy.reorder_level - feasible).max(0);
        let mut orders = QuantityMap::new();
        orders.set(node.sku.clone(), gap);
        orders
    }
}
