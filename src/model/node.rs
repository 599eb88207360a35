//! A single SKU location: on-hand stock, backorders, downstream orders, an
//! in-transit pipeline, and the providers/policy parameters that drive it.

use crate::error::SupplyChainError;
use crate::metrics::{MetricEvent, MetricRecord};
use crate::strategy::{ConstantLeadTime, LeadTimeProvider, NoSales, SalesProvider};

use super::pipeline::Pipeline;
use super::quantity::QuantityMap;
use super::sku::Sku;

/// The recognized keys of a node's policy data, extracted into a typed
/// record rather than carried as a free-form string-keyed dict. `RsqControl`
/// reads `order_quantity`, `reorder_level`, `review_time`; `safety_stock` is
/// accepted (and can be read by custom strategies) but unused by RSQ itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyParams {
    pub order_quantity: i64,
    pub reorder_level: i64,
    pub review_time: i64,
    pub safety_stock: i64,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            order_quantity: 0,
            reorder_level: 0,
            review_time: 1,
            safety_stock: 0,
        }
    }
}

/// A single node in the supply chain graph.
///
/// Constructed with [`Node::new`] and the `with_*` builder methods; `llc` is
/// assigned by [`crate::chain::SupplyChain`] at construction and is not
/// meant to be set directly.
pub struct Node {
    pub sku: Sku,
    pub policy: PolicyParams,
    pub stock: QuantityMap,
    pub backorders: i64,
    pub orders: QuantityMap,
    pub pipeline: Pipeline,
    /// Extra BOM parent edges declared on the node itself. Merged with
    /// `SupplyChain`-level edges at construction; on conflict for the same
    /// (parent, child) pair, the node's own entry wins.
    pub predecessors: Vec<(Sku, u32)>,
    pub sales: Box<dyn SalesProvider>,
    pub lead_time: Box<dyn LeadTimeProvider>,
    pub(crate) llc: u32,
}

impl Node {
    pub fn new(sku: impl Into<Sku>) -> Self {
        Self {
            sku: sku.into(),
            policy: PolicyParams::default(),
            stock: QuantityMap::new(),
            backorders: 0,
            orders: QuantityMap::new(),
            pipeline: Pipeline::new(),
            predecessors: Vec::new(),
            sales: Box::new(NoSales),
            lead_time: Box::new(ConstantLeadTime::default()),
            llc: 0,
        }
    }

    pub fn with_stock(mut self, sku: impl Into<Sku>, quantity: i64) -> Self {
        self.stock.set(sku, quantity);
        self
    }

    pub fn with_policy(mut self, policy: PolicyParams) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_predecessor(mut self, parent: impl Into<Sku>, number: u32) -> Self {
        self.predecessors.push((parent.into(), number));
        self
    }

    pub fn with_sales(mut self, sales: impl SalesProvider + 'static) -> Self {
        self.sales = Box::new(sales);
        self
    }

    pub fn with_lead_time(mut self, lead_time: impl LeadTimeProvider + 'static) -> Self {
        self.lead_time = Box::new(lead_time);
        self
    }

    /// The low-level code assigned by the chain at construction.
    pub fn llc(&self) -> u32 {
        self.llc
    }

    /// Pops this period's demand events and serves them from on-hand stock
    /// of the node's own SKU, clearing any carried-over backorders first.
    pub fn satisfy_sales(&mut self, period: u32) -> Result<Vec<MetricRecord>, SupplyChainError> {
        let mut records = Vec::new();

        if self.backorders > 0 {
            let on_hand = self.stock.get(&self.sku);
            let served = self.backorders.min(on_hand);
            if served > 0 {
                self.stock.add_to(self.sku.clone(), -served);
                self.backorders -= served;
                records.push(MetricRecord::new(
                    period,
                    &self.sku,
                    MetricEvent::SalesSatisfied,
                    served,
                ));
            }
        }

        for demand in self.sales.pop(period)? {
            let on_hand = self.stock.get(&self.sku);
            let served = demand.min(on_hand);
            let remainder = demand - served;

            if served > 0 {
                self.stock.add_to(self.sku.clone(), -served);
                records.push(MetricRecord::new(
                    period,
                    &self.sku,
                    MetricEvent::SalesSatisfied,
                    served,
                ));
            }
            if remainder > 0 {
                self.backorders += remainder;
                records.push(MetricRecord::new(
                    period,
                    &self.sku,
                    MetricEvent::SalesBackordered,
                    remainder,
                ));
            }
        }

        Ok(records)
    }

    /// Pops every matured receipt off the pipeline and credits its SKU.
    pub fn accept_receipts(&mut self, period: u32) -> Vec<MetricRecord> {
        self.pipeline
            .pop_matured()
            .into_iter()
            .map(|receipt| {
                self.stock.add_to(receipt.sku.clone(), receipt.quantity);
                MetricRecord::new(period, &self.sku, MetricEvent::Receipt, receipt.quantity)
                    .with_sku(&receipt.sku)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::ScriptedSales;

    #[test]
    fn satisfy_sales_clears_backorders_before_new_demand() {
        let mut node = Node::new("A")
            .with_stock("A", 10)
            .with_sales(ScriptedSales::from_flat([3]));
        node.backorders = 3;

        let records = node.satisfy_sales(2).unwrap();

        assert_eq!(node.stock.get(&"A".into()), 4);
        assert_eq!(node.backorders, 0);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event, "sales-satisfied");
        assert_eq!(records[0].quantity, 3);
        assert_eq!(records[1].event, "sales-satisfied");
        assert_eq!(records[1].quantity, 3);
    }

    #[test]
    fn satisfy_sales_backorders_the_shortfall() {
        let mut node = Node::new("A")
            .with_stock("A", 0)
            .with_sales(ScriptedSales::from_flat([3]));

        let records = node.satisfy_sales(1).unwrap();

        assert_eq!(node.backorders, 3);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event, "sales-backordered");
        assert_eq!(records[0].quantity, 3);
    }

    #[test]
    fn accept_receipts_credits_the_receipt_sku() {
        use super::super::pipeline::Receipt;

        let mut node = Node::new("A");
        node.pipeline.add(Receipt::new("A", 0, 5));
        node.pipeline.add(Receipt::new("D", 0, 2));

        let records = node.accept_receipts(1);

        assert_eq!(node.stock.get(&"A".into()), 5);
        assert_eq!(node.stock.get(&"D".into()), 2);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.event == "receipt"));
    }
}
