//! The supply-chain graph: nodes keyed by SKU, BOM edges labeled by integer
//! multiplicity, and the derived structure (low-level codes, traversal
//! orders, feasibility) that the simulator drives every period.
//!
//! Internally this is an index-based adjacency list, not a pointer graph:
//! `nodes` holds the mutable per-node state, while `parents`/`children` hold
//! `(usize, u32)` edges over dense node indices. SKU strings only appear at
//! the boundary (`index`, and on `Node` itself); traversal never re-hashes a
//! string. This lets the simulator hold a `&mut Node` for the node being
//! stepped and a `&[(usize, u32)]` borrow of the (immutable) topology at the
//! same time, since they are disjoint fields of `SupplyChain`.

use std::collections::HashMap;

use crate::error::SupplyChainError;
use crate::model::{Node, Sku};

/// A bill-of-materials arc: `number` units of `source` are consumed to
/// assemble one unit of `destination`. `source` is the upstream supplier
/// (component/parent), `destination` the downstream consumer (assembly/child).
#[derive(Debug, Clone)]
pub struct Edge {
    pub source: Sku,
    pub destination: Sku,
    pub number: u32,
}

impl Edge {
    pub fn new(source: impl Into<Sku>, destination: impl Into<Sku>, number: u32) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            number,
        }
    }
}

/// The directed acyclic graph of SKU dependencies plus the per-node state
/// cells it indexes.
///
/// Constructed once via [`SupplyChain::new`]; low-level codes and traversal
/// orders are derived at construction and never recomputed. Per-period
/// mutation (stock, backorders, orders, pipelines) happens in place on
/// `nodes` via the index returned by [`SupplyChain::index_of`].
pub struct SupplyChain {
    pub nodes: Vec<Node>,
    index: HashMap<Sku, usize>,
    /// `parents[idx]` = component suppliers of node `idx`, as `(parent_idx, multiplicity)`.
    parents: Vec<Vec<(usize, u32)>>,
    /// `children[idx]` = downstream consumers of node `idx`, as `(child_idx, multiplicity)`.
    children: Vec<Vec<(usize, u32)>>,
    llc: Vec<u32>,
    /// Node indices ordered by ascending llc (roots/suppliers first), ties
    /// broken by insertion order.
    ascending_order: Vec<usize>,
    /// Node indices ordered by descending llc (children first), ties broken
    /// by insertion order.
    descending_order: Vec<usize>,
}

impl SupplyChain {
    /// Builds the chain: indexes nodes, merges `edges` with each node's own
    /// `predecessors` (node-declared predecessors win on conflict), detects
    /// cycles, and assigns low-level codes.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, SupplyChainError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            if index.insert(node.sku.clone(), idx).is_some() {
                return Err(SupplyChainError::DuplicateNode(node.sku.to_string()));
            }
        }

        // (child_idx, parent_idx) -> multiplicity, node predecessors win.
        let mut merged: HashMap<(usize, usize), u32> = HashMap::new();
        let mut merge_order: Vec<(usize, usize)> = Vec::new();

        for (child_idx, node) in nodes.iter().enumerate() {
            for (parent_sku, number) in &node.predecessors {
                let parent_idx = *index
                    .get(parent_sku)
                    .ok_or_else(|| SupplyChainError::UnknownEdgeEndpoint(parent_sku.to_string()))?;
                if *number == 0 {
                    return Err(SupplyChainError::InvalidMultiplicity {
                        source: parent_sku.to_string(),
                        destination: node.sku.to_string(),
                        number: 0,
                    });
                }
                let key = (child_idx, parent_idx);
                if !merged.contains_key(&key) {
                    merge_order.push(key);
                }
                merged.insert(key, *number);
            }
        }

        for edge in &edges {
            let parent_idx = index
                .get(&edge.source)
                .copied()
                .ok_or_else(|| SupplyChainError::UnknownEdgeEndpoint(edge.source.to_string()))?;
            let child_idx = index
                .get(&edge.destination)
                .copied()
                .ok_or_else(|| SupplyChainError::UnknownEdgeEndpoint(edge.destination.to_string()))?;
            if edge.number == 0 {
                return Err(SupplyChainError::InvalidMultiplicity {
                    source: edge.source.to_string(),
                    destination: edge.destination.to_string(),
                    number: 0,
                });
            }
            let key = (child_idx, parent_idx);
            // SupplyChain-level edges never override a node's own predecessors.
            if !merged.contains_key(&key) {
                merge_order.push(key);
                merged.insert(key, edge.number);
            }
        }

        let mut parents: Vec<Vec<(usize, u32)>> = vec![Vec::new(); nodes.len()];
        let mut children: Vec<Vec<(usize, u32)>> = vec![Vec::new(); nodes.len()];
        for (child_idx, parent_idx) in merge_order {
            let number = merged[&(child_idx, parent_idx)];
            parents[child_idx].push((parent_idx, number));
            children[parent_idx].push((child_idx, number));
        }

        let llc = compute_llc(&parents, &children)?;

        let mut ascending_order: Vec<usize> = (0..nodes.len()).collect();
        ascending_order.sort_by_key(|&idx| (llc[idx], idx));
        let mut descending_order: Vec<usize> = (0..nodes.len()).collect();
        descending_order.sort_by_key(|&idx| (std::cmp::Reverse(llc[idx]), idx));

        Ok(Self {
            nodes,
            index,
            parents,
            children,
            llc,
            ascending_order,
            descending_order,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, sku: &Sku) -> Option<usize> {
        self.index.get(sku).copied()
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn llc_of(&self, idx: usize) -> u32 {
        self.llc[idx]
    }

    /// Node indices ordered by ascending llc (suppliers before children),
    /// ties broken by insertion order: the release-phase order.
    pub fn ascending_order(&self) -> &[usize] {
        &self.ascending_order
    }

    /// Node indices ordered by descending llc (children before suppliers),
    /// ties broken by insertion order: the order-phase order.
    pub fn descending_order(&self) -> &[usize] {
        &self.descending_order
    }

    pub fn parents_of(&self, idx: usize) -> &[(usize, u32)] {
        &self.parents[idx]
    }

    pub fn children_of(&self, idx: usize) -> &[(usize, u32)] {
        &self.children[idx]
    }

    /// `(parent_sku, multiplicity)` for every component of the SKU at `idx`.
    pub fn bom(&self, idx: usize) -> impl Iterator<Item = (Sku, u32)> + '_ {
        self.parents[idx]
            .iter()
            .map(move |&(p_idx, number)| (self.nodes[p_idx].sku.clone(), number))
    }

    /// The integer number of assemblies of each node's own SKU that could be
    /// produced from current on-hand position, accounting for the full BOM.
    /// Computed in one forward pass over ascending llc.
    ///
    /// `available_units_of_p_at(node)` is `node.stock[p]`, the component
    /// stock physically held at `node`, and deliberately does *not* also add
    /// `feasible(p)`: `p` is a distinct node, possibly several transit hops
    /// (and a pipeline lead time) away, and crediting its own producible
    /// capacity as already available at `node` would let a well-stocked
    /// supplier mask every downstream node's shortage, permanently
    /// suppressing its reorder trigger.
    pub fn feasibility(&self) -> Vec<i64> {
        let mut feasible = vec![0i64; self.nodes.len()];
        for &idx in &self.ascending_order {
            let node = &self.nodes[idx];
            let own_sku = &node.sku;
            let stock_position = node.stock.get(own_sku) + node.pipeline.sum_by_sku().get(own_sku);

            let component_term = self.parents[idx]
                .iter()
                .map(|&(parent_idx, multiplicity)| {
                    let parent_sku = &self.nodes[parent_idx].sku;
                    let available = node.stock.get(parent_sku);
                    available.div_euclid(multiplicity as i64)
                })
                .min();

            let total = match component_term {
                Some(bound) => stock_position + bound,
                None => stock_position,
            };
            feasible[idx] = total.max(0);
        }
        feasible
    }

    /// Converts component stock held at `idx` into finished stock of its own
    /// SKU, per the BOM multiplicities, capped at `target` additional units
    /// and at whatever the component stock actually supports. Components are
    /// consumed in the same ratio `feasibility` uses to bound them; a node
    /// with no parents has nothing to assemble and is a no-op.
    ///
    /// Stock stays denormalized between calls: leftover component stock that
    /// doesn't clear a full multiplicity is left in place for a later period.
    pub fn assemble(&mut self, idx: usize, target: i64) {
        if target <= 0 {
            return;
        }
        let parents = self.parents[idx].clone();
        if parents.is_empty() {
            return;
        }

        let capacity = parents
            .iter()
            .map(|&(parent_idx, multiplicity)| {
                let parent_sku = self.nodes[parent_idx].sku.clone();
                self.nodes[idx].stock.get(&parent_sku).div_euclid(multiplicity as i64)
            })
            .min()
            .unwrap_or(0);

        let assembled = target.min(capacity).max(0);
        if assembled == 0 {
            return;
        }

        for (parent_idx, multiplicity) in &parents {
            let parent_sku = self.nodes[*parent_idx].sku.clone();
            self.nodes[idx].stock.add_to(parent_sku, -(assembled * *multiplicity as i64));
        }
        let own_sku = self.nodes[idx].sku.clone();
        self.nodes[idx].stock.add_to(own_sku, assembled);
    }
}

/// Kahn's-algorithm-style layering: roots (nodes with no parents) start at
/// llc 0; a node's llc is the max over its parents of `parent.llc + 1`,
/// computed once every parent has been visited.
fn compute_llc(
    parents: &[Vec<(usize, u32)>],
    children: &[Vec<(usize, u32)>],
) -> Result<Vec<u32>, SupplyChainError> {
    let n = parents.len();
    let mut llc = vec![0u32; n];
    let mut remaining: Vec<usize> = parents.iter().map(|p| p.len()).collect();
    let mut queue: std::collections::VecDeque<usize> = (0..n).filter(|&i| remaining[i] == 0).collect();
    let mut visited = 0usize;

    while let Some(idx) = queue.pop_front() {
        visited += 1;
        for &(child_idx, _multiplicity) in &children[idx] {
            llc[child_idx] = llc[child_idx].max(llc[idx] + 1);
            remaining[child_idx] -= 1;
            if remaining[child_idx] == 0 {
                queue.push_back(child_idx);
            }
        }
    }

    if visited != n {
        return Err(SupplyChainError::CycleDetected);
    }
    Ok(llc)
}
