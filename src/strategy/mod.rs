//! Pluggable control (replenishment) and release (shipment) strategies,
//! plus the per-period sales/lead-time providers a node consults.
//!
//! Each concern is a small trait with a single required method. The default
//! pair used by [`crate::simulation::Simulator`] is [`control::RsqControl`]
//! and [`release::FractionalRelease`]; [`control::NaiveControl`] and
//! [`release::EvenSplitRelease`] exist alongside them to demonstrate (and
//! exercise in tests) that the traits are a genuine seam, not a single
//! hardwired implementation.

pub mod control;
pub mod providers;
pub mod release;
pub mod traits;

pub use control::{NaiveControl, RsqControl};
pub use providers::{ConstantLeadTime, NoSales, ScriptedLeadTime, ScriptedSales};
pub use release::{EvenSplitRelease, FractionalRelease};
pub use traits::{ControlStrategy, LeadTimeProvider, ReleaseStrategy, SalesProvider};
