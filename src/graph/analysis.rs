//! Graph analyses over the adjacency tables
//!
//! Read-only traversals used by validation and by the step scheduler.
//! All of them operate on the two reciprocal adjacency tables owned by
//! the pipeline and never touch the nodes themselves.
//!
//! # Algorithm Notes
//!
//! - Topological order is reversed DFS post-order rather than Kahn's
//!   algorithm: the scheduler's observable polling order is defined by
//!   the DFS-stack order, and the DFS form also terminates untroubled on
//!   the unvalidated (possibly cyclic) graphs `step` may legally receive.
//! - Cycle detection is the classical three-color DFS: a back edge into a
//!   node still on the recursion stack is a cycle. Self-loops count.
//! - Connectivity is the weak pipeline sense: every node must be forward-
//!   or backward-reachable from the smallest live id. This is not
//!   rotation-invariant, which is fine for source-to-sink DAGs; proper
//!   direction is covered by the source/sink validity rules.

use crate::core::NodeId;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Forward adjacency: consumers fed by each node, at most once each
pub(crate) type Outgoing = BTreeMap<NodeId, BTreeSet<NodeId>>;

/// Backward adjacency: producer filling each input slot of each node
pub(crate) type Incoming = BTreeMap<NodeId, BTreeMap<usize, NodeId>>;

/// Forward DFS from `node`, appending post-order
fn post_order(
    node: NodeId,
    outgoing: &Outgoing,
    visited: &mut HashSet<NodeId>,
    order: &mut Vec<NodeId>,
) {
    visited.insert(node);
    if let Some(next) = outgoing.get(&node) {
        for &v in next {
            if !visited.contains(&v) {
                post_order(v, outgoing, visited, order);
            }
        }
    }
    order.push(node);
}

/// Backward reachability from `node` over the producers filling its slots
fn reach_backward(node: NodeId, incoming: &Incoming, visited: &mut HashSet<NodeId>) {
    visited.insert(node);
    if let Some(slots) = incoming.get(&node) {
        for &src in slots.values() {
            if !visited.contains(&src) {
                reach_backward(src, incoming, visited);
            }
        }
    }
}

/// Returns true if every node is forward- or backward-reachable from the
/// smallest live id
pub(crate) fn is_connected(outgoing: &Outgoing, incoming: &Incoming) -> bool {
    let Some(&root) = outgoing.keys().next() else {
        return true;
    };

    let mut forward = HashSet::new();
    let mut order = Vec::new();
    post_order(root, outgoing, &mut forward, &mut order);

    let mut backward = HashSet::new();
    reach_backward(root, incoming, &mut backward);

    outgoing
        .keys()
        .all(|id| forward.contains(id) || backward.contains(id))
}

fn dfs_has_cycle(
    node: NodeId,
    outgoing: &Outgoing,
    visited: &mut HashSet<NodeId>,
    on_stack: &mut HashSet<NodeId>,
) -> bool {
    if on_stack.contains(&node) {
        return true;
    }
    if visited.contains(&node) {
        return false;
    }
    visited.insert(node);
    on_stack.insert(node);

    if let Some(next) = outgoing.get(&node) {
        for &v in next {
            if dfs_has_cycle(v, outgoing, visited, on_stack) {
                return true;
            }
        }
    }

    on_stack.remove(&node);
    false
}

/// Detects whether the forward adjacency contains a cycle
pub(crate) fn has_cycle(outgoing: &Outgoing) -> bool {
    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();

    for &id in outgoing.keys() {
        if dfs_has_cycle(id, outgoing, &mut visited, &mut on_stack) {
            return true;
        }
    }

    false
}

/// Returns every node in a topological order (sources before consumers)
///
/// Roots are taken in ascending id order; the result is the reversed
/// concatenated post-order. Valid as a topological order only when the
/// graph is acyclic; still terminates and covers every node otherwise.
pub(crate) fn topological_order(outgoing: &Outgoing) -> Vec<NodeId> {
    let mut visited = HashSet::new();
    let mut order = Vec::with_capacity(outgoing.len());

    for &id in outgoing.keys() {
        if !visited.contains(&id) {
            post_order(id, outgoing, &mut visited, &mut order);
        }
    }

    order.reverse();
    order
}
