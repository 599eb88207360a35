//! Concrete [`SalesProvider`] / [`LeadTimeProvider`] implementations.
//!
//! These are deliberately simple: the simulator treats demand and lead time
//! as caller-supplied sequences, with no stochastic sampling inside the
//! core, so the providers here are either constants or pre-baked schedules
//! the caller hands in.

use std::collections::VecDeque;

use super::traits::{LeadTimeProvider, SalesProvider};
use crate::error::SupplyChainError;

/// A node with no exogenous demand of its own (e.g. a pure assembly/root
/// node with only downstream orders to satisfy). The default for nodes that
/// don't set one explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSales;

impl SalesProvider for NoSales {
    fn pop(&mut self, _period: u32) -> Result<Vec<i64>, SupplyChainError> {
        Ok(Vec::new())
    }
}

/// A fixed, pre-built demand schedule consumed one period at a time.
///
/// Each `pop` drains the front of the schedule, so replaying the same
/// provider against a fresh chain yields no further demand after the first
/// exhaustive run.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSales {
    schedule: VecDeque<Vec<i64>>,
}

impl ScriptedSales {
    pub fn new(schedule: impl IntoIterator<Item = Vec<i64>>) -> Self {
        Self {
            schedule: schedule.into_iter().collect(),
        }
    }

    /// Convenience constructor for the common case of one demand event per
    /// period (a flat quantity schedule rather than a list of events).
    pub fn from_flat(schedule: impl IntoIterator<Item = i64>) -> Self {
        Self::new(schedule.into_iter().map(|q| vec![q]))
    }
}

impl SalesProvider for ScriptedSales {
    fn pop(&mut self, _period: u32) -> Result<Vec<i64>, SupplyChainError> {
        Ok(self.schedule.pop_front().unwrap_or_default())
    }
}

/// A constant lead time applied to every order, regardless of period.
#[derive(Debug, Clone, Copy)]
pub struct ConstantLeadTime(pub u32);

impl Default for ConstantLeadTime {
    fn default() -> Self {
        ConstantLeadTime(0)
    }
}

impl LeadTimeProvider for ConstantLeadTime {
    fn get(&mut self, _period: u32) -> Result<u32, SupplyChainError> {
        Ok(self.0)
    }
}

/// A pre-built, per-period lead-time schedule; holds the last value once
/// exhausted rather than falling back to zero, since a disappearing lane is
/// rarely what a caller intends.
#[derive(Debug, Clone)]
pub struct ScriptedLeadTime {
    schedule: VecDeque<u32>,
    last: u32,
}

impl ScriptedLeadTime {
    pub fn new(schedule: impl IntoIterator<Item = u32>) -> Self {
        let schedule: VecDeque<u32> = schedule.into_iter().collect();
        let last = schedule.front().copied().unwrap_or(0);
        Self { schedule, last }
    }
}

impl LeadTimeProvider for ScriptedLeadTime {
    fn get(&mut self, _period: u32) -> Result<u32, SupplyChainError> {
        match self.schedule.pop_front() {
            Some(v) => {
                self.last = v;
                Ok(v)
            }
            None => Ok(self.last),
        }
    }
}
