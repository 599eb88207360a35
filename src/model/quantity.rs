//! Quantity map: SKU -> integer quantity, with the small bit of arithmetic
//! the strategies need (sum, scalar multiply, elementwise add/subtract).

use std::ops::{Add, Mul, Sub};

use indexmap::IndexMap;

use super::sku::Sku;

/// A mapping from SKU to integer quantity.
///
/// Absent keys are semantically zero; `items()` iterates in insertion order
/// so that callers who need a deterministic traversal (tie-breaks, metric
/// emission order) don't have to sort first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityMap(IndexMap<Sku, i64>);

impl QuantityMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn get(&self, sku: &Sku) -> i64 {
        self.0.get(sku).copied().unwrap_or(0)
    }

    pub fn set(&mut self, sku: impl Into<Sku>, quantity: i64) {
        self.0.insert(sku.into(), quantity);
    }

    /// Adds `delta` to the entry for `sku` (creating it at 0 first if absent).
    /// `delta` may be negative; callers that must preserve the non-negative
    /// invariant are responsible for clamping.
    pub fn add_to(&mut self, sku: impl Into<Sku>, delta: i64) {
        let entry = self.0.entry(sku.into()).or_insert(0);
        *entry += delta;
    }

    pub fn sum(&self) -> i64 {
        self.0.values().sum()
    }

    pub fn items(&self) -> impl Iterator<Item = (&Sku, &i64)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty() || self.0.values().all(|&v| v == 0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Add for &QuantityMap {
    type Output = QuantityMap;

    fn add(self, rhs: &QuantityMap) -> QuantityMap {
        let mut out = self.clone();
        for (sku, qty) in rhs.items() {
            out.add_to(sku.clone(), *qty);
        }
        out
    }
}

impl Sub for &QuantityMap {
    type Output = QuantityMap;

    /// Elementwise subtraction, clamped at zero per entry: the map has no
    /// notion of a negative quantity.
    fn sub(self, rhs: &QuantityMap) -> QuantityMap {
        let mut out = self.clone();
        for (sku, qty) in rhs.items() {
            out.add_to(sku.clone(), -*qty);
        }
        for value in out.0.values_mut() {
            if *value < 0 {
                *value = 0;
            }
        }
        out
    }
}

impl Mul<i64> for &QuantityMap {
    type Output = QuantityMap;

    fn mul(self, scalar: i64) -> QuantityMap {
        let mut out = QuantityMap::new();
        for (sku, qty) in self.items() {
            out.set(sku.clone(), qty * scalar);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_defaults_to_zero() {
        let q = QuantityMap::new();
        assert_eq!(q.get(&"X".into()), 0);
    }

    #[test]
    fn add_to_accumulates() {
        let mut q = QuantityMap::new();
        q.add_to("X", 3);
        q.add_to("X", 4);
        assert_eq!(q.get(&"X".into()), 7);
    }

    #[test]
    fn elementwise_add_and_sub() {
        let mut a = QuantityMap::new();
        a.set("X", 10);
        a.set("Y", 5);
        let mut b = QuantityMap::new();
        b.set("X", 3);
        b.set("Z", 2);

        let sum = &a + &b;
        assert_eq!(sum.get(&"X".into()), 13);
        assert_eq!(sum.get(&"Y".into()), 5);
        assert_eq!(sum.get(&"Z".into()), 2);

        let diff = &a - &b;
        assert_eq!(diff.get(&"X".into()), 7);
        assert_eq!(diff.get(&"Y".into()), 5);
        // Z only exists on the rhs; subtracting from an absent (zero) entry clamps at 0.
        assert_eq!(diff.get(&"Z".into()), 0);
    }

    #[test]
    fn scalar_multiply() {
        let mut a = QuantityMap::new();
        a.set("X", 4);
        let scaled = &a * 3;
        assert_eq!(scaled.get(&"X".into()), 12);
    }

    #[test]
    fn sum_totals_all_entries() {
        let mut a = QuantityMap::new();
        a.set("X", 4);
        a.set("Y", 6);
        assert_eq!(a.sum(), 10);
    }

    #[test]
    fn items_preserve_insertion_order() {
        let mut a = QuantityMap::new();
        a.set("B", 1);
        a.set("A", 1);
        a.set("C", 1);
        let order: Vec<&str> = a.items().map(|(sku, _)| sku.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }
}
