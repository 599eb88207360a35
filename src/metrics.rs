//! The metric record shape emitted by the simulator, and the sink-facing
//! `Serialize` type used to persist it (see [`crate::io::reporting`]).

use serde::Serialize;

use crate::model::sku::Sku;

/// The five kinds of event the simulator can emit in a single period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricEvent {
    SalesSatisfied,
    SalesBackordered,
    Receipt,
    Release,
    Order,
}

impl MetricEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricEvent::SalesSatisfied => "sales-satisfied",
            MetricEvent::SalesBackordered => "sales-backordered",
            MetricEvent::Receipt => "receipt",
            MetricEvent::Release => "release",
            MetricEvent::Order => "order",
        }
    }
}

/// One line of the metric stream: `{period, node, event, quantity, sku}`.
///
/// `sku` is only populated for `receipt` and `release` events, where it may
/// differ from the owning node's own SKU (component receipts, BOM releases).
#[derive(Debug, Clone, Serialize)]
pub struct MetricRecord {
    pub period: u32,
    pub node: String,
    pub event: String,
    pub quantity: i64,
    pub sku: Option<String>,
}

impl MetricRecord {
    pub fn new(period: u32, node: &Sku, event: MetricEvent, quantity: i64) -> Self {
        Self {
            period,
            node: node.to_string(),
            event: event.as_str().to_string(),
            quantity,
            sku: None,
        }
    }

    pub fn with_sku(mut self, sku: &Sku) -> Self {
        self.sku = Some(sku.to_string());
        self
    }
}
