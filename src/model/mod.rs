//! Leaf data types of the simulation: SKU identifiers, quantity maps,
//! in-transit pipelines, and the stocking node that ties them together.

pub mod node;
pub mod pipeline;
pub mod quantity;
pub mod sku;

pub use node::{Node, PolicyParams};
pub use pipeline::{Pipeline, Receipt};
pub use quantity::QuantityMap;
pub use sku::Sku;
