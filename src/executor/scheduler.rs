//! Single-tick step scheduler
//!
//! One tick walks every node in topological order and polls each one at
//! most once. A node that comes up `Empty` or `Closed` paints its entire
//! forward reachability closure with that outcome for the remainder of
//! the tick, so downstream consumers are never polled against stale or
//! absent inputs. `Closed` is sticky within a tick: a node already
//! painted closed is not downgraded to empty by a second ancestor.
//!
//! The poll map is cleared at the top of every tick. Closedness is
//! re-derived each time from the nodes that self-report `Closed`, never
//! cached across ticks - which is what lets a pipeline resume after a
//! closed source is erased and replaced.

use crate::core::{NodeId, Poll};
use crate::graph::analysis::{self, Outgoing};
use crate::graph::Pipeline;
use std::collections::HashMap;
use tracing::{debug, trace};

impl Pipeline {
    /// Advances the pipeline one tick
    ///
    /// Returns `true` once every sink is closed - no further steps will
    /// do useful work. Within the tick, every node is polled at most
    /// once, a node is polled only after all of its producers, and a node
    /// downstream of an `Empty` or `Closed` outcome is not polled at all.
    ///
    /// Defined behavior only on pipelines for which
    /// [`is_valid`](Pipeline::is_valid) holds; `step` itself never fails
    /// and does not validate.
    pub fn step(&mut self) -> bool {
        let order = analysis::topological_order(&self.outgoing);
        self.poll_states.clear();

        for id in order {
            if matches!(self.poll_states.get(&id), Some(Poll::Empty | Poll::Closed)) {
                trace!(node = %id, "skipped this tick");
                continue;
            }
            let Some(record) = self.nodes.get_mut(&id) else {
                continue;
            };
            let result = record.node.poll_next();
            trace!(node = %id, name = record.node.name(), result = ?result, "polled");

            self.poll_states.insert(id, result);
            if result != Poll::Ready {
                paint_downstream(id, result, &mut self.poll_states, &self.outgoing);
            }
        }

        let exhausted = self
            .nodes
            .iter()
            .filter(|(_, record)| record.is_sink)
            .all(|(id, _)| matches!(self.poll_states.get(id), Some(Poll::Closed)));
        debug!(exhausted, "tick complete");
        exhausted
    }

    /// Steps the pipeline until every sink is closed
    ///
    /// Terminates only when every source eventually reports `Closed`;
    /// callers wanting bounded execution should iterate
    /// [`step`](Pipeline::step) themselves.
    pub fn run(&mut self) {
        while !self.step() {}
    }
}

/// Paints the forward reachability closure of `from` with `status`
///
/// `Closed` dominates `Empty`; `Empty` overwrites anything but `Closed`.
/// A node whose recorded state already dominates the paint is skipped
/// together with its subtree - the subtree was painted to at least that
/// state when the node itself was, so the walk stays linear.
fn paint_downstream(
    from: NodeId,
    status: Poll,
    poll_states: &mut HashMap<NodeId, Poll>,
    outgoing: &Outgoing,
) {
    let mut worklist: Vec<NodeId> = outgoing
        .get(&from)
        .map(|next| next.iter().copied().collect())
        .unwrap_or_default();

    while let Some(node) = worklist.pop() {
        match poll_states.get(&node) {
            Some(Poll::Closed) => continue,
            Some(&existing) if existing == status => continue,
            _ => {}
        }
        poll_states.insert(node, status);
        if let Some(next) = outgoing.get(&node) {
            worklist.extend(next.iter().copied());
        }
    }
}
