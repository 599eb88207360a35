//! In-transit receipt queue for a single node.

use std::collections::VecDeque;

use super::quantity::QuantityMap;
use super::sku::Sku;

/// A single in-transit shipment: `quantity` units of `sku`, arriving once
/// `eta` (a remaining-periods counter, not an absolute period) reaches zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub sku: Sku,
    pub eta: u32,
    pub quantity: i64,
}

impl Receipt {
    pub fn new(sku: impl Into<Sku>, eta: u32, quantity: i64) -> Self {
        Self {
            sku: sku.into(),
            eta,
            quantity,
        }
    }
}

/// The ordered queue of receipts en route to one node.
///
/// A node's pipeline is polymorphic in SKU: most entries carry the node's
/// own SKU (inbound finished-goods supply), but a node that stores BOM
/// components may also receive component receipts here.
#[derive(Debug, Clone, Default)]
pub struct Pipeline(VecDeque<Receipt>);

impl Pipeline {
    pub fn new() -> Self {
        Self(VecDeque::new())
    }

    pub fn add(&mut self, receipt: Receipt) {
        self.0.push_back(receipt);
    }

    /// Removes and returns every receipt whose `eta` has reached zero,
    /// preserving their relative (insertion) order.
    pub fn pop_matured(&mut self) -> Vec<Receipt> {
        let mut matured = Vec::new();
        let mut remaining = VecDeque::with_capacity(self.0.len());
        for receipt in self.0.drain(..) {
            if receipt.eta == 0 {
                matured.push(receipt);
            } else {
                remaining.push_back(receipt);
            }
        }
        self.0 = remaining;
        matured
    }

    /// Decrements `eta` on every remaining receipt by one period.
    pub fn age(&mut self) {
        for receipt in self.0.iter_mut() {
            receipt.eta = receipt.eta.saturating_sub(1);
        }
    }

    /// Total in-transit quantity per SKU, across every receipt still aging.
    pub fn sum_by_sku(&self) -> QuantityMap {
        let mut totals = QuantityMap::new();
        for receipt in &self.0 {
            totals.add_to(receipt.sku.clone(), receipt.quantity);
        }
        totals
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
