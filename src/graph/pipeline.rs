//! Pipeline - typed dataflow graph store
//!
//! The store owns every node and keeps two reciprocal adjacency tables:
//!
//! - `outgoing`: for each node, the set of consumers it feeds (at most
//!   once each, however many slots it fills)
//! - `incoming`: for each node, which producer currently fills each of
//!   its input slots
//!
//! Both directions are hot - the step scheduler walks `outgoing`, the
//! connectivity and dependency queries need both - so the store maintains
//! the two tables directly and keeps them consistent inside every
//! mutation rather than deriving one from the other.
//!
//! Type checking is nominal: a connection is admitted only when the
//! producer's output token equals the slot's input token, and the tokens
//! are cached at node creation so the check never re-enters user code.

use super::analysis::{self, Incoming, Outgoing};
use crate::core::{ErrorKind, Node, NodeId, Poll, Result};
use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use tracing::debug;

/// A stored node together with its cached type identity
pub(crate) struct NodeRecord {
    /// The user-supplied node object, exclusively owned by the pipeline
    pub(crate) node: Box<dyn Node>,
    /// Input type tokens, one per slot
    pub(crate) input_types: Vec<TypeId>,
    /// Output type token; `None` for sinks
    pub(crate) output_type: Option<TypeId>,
    /// Derived: the input list is empty
    pub(crate) is_source: bool,
    /// Derived: the output token is `None`
    pub(crate) is_sink: bool,
}

/// A typed dataflow pipeline
///
/// Nodes are created into the pipeline, wired slot by slot with
/// [`connect`](Pipeline::connect), validated with
/// [`is_valid`](Pipeline::is_valid), and driven with
/// [`step`](Pipeline::step) / [`run`](Pipeline::run).
///
/// The pipeline exclusively owns its nodes: erasing an id destroys the
/// node, and dropping the pipeline destroys them all. The type is
/// move-only - it is not `Clone`, since cloning would have to duplicate
/// owning handles to opaque user nodes - and moving transfers the whole
/// store, id counter and tick-local poll state included.
///
/// # Example
///
/// ```
/// use rheo::{Node, Pipeline, Poll, Output, SourceView};
/// use std::any::TypeId;
///
/// struct One(Output<i64>);
///
/// impl Node for One {
///     fn name(&self) -> &str {
///         "one"
///     }
///     fn input_types(&self) -> Vec<TypeId> {
///         Vec::new()
///     }
///     fn output_type(&self) -> Option<TypeId> {
///         Some(TypeId::of::<i64>())
///     }
///     fn poll_next(&mut self) -> Poll {
///         self.0.set(1);
///         Poll::Ready
///     }
///     fn source_view(&self) -> Option<SourceView> {
///         Some(self.0.view())
///     }
/// }
///
/// let mut pipeline = Pipeline::new();
/// let source = pipeline.create_node(One(Output::new(0)));
/// assert!(pipeline.get_node(source).is_some());
/// assert_eq!(pipeline.node_count(), 1);
/// ```
#[derive(Default)]
pub struct Pipeline {
    pub(crate) nodes: BTreeMap<NodeId, NodeRecord>,
    pub(crate) outgoing: Outgoing,
    pub(crate) incoming: Incoming,
    /// Tick-local poll outcomes; cleared at the start of every step
    pub(crate) poll_states: HashMap<NodeId, Poll>,
    next_id: u64,
}

impl Pipeline {
    /// Creates a new empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the pipeline has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` names a live node
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterates over live node ids in ascending order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Adds a node to the pipeline and returns its id
    ///
    /// The node's type tokens and its source/sink classification are
    /// cached here and never re-read. Ids are monotone per pipeline and
    /// never reused after an erase.
    pub fn create_node<N: Node>(&mut self, node: N) -> NodeId {
        self.next_id += 1;
        let id = NodeId::new(self.next_id);

        let input_types = node.input_types();
        let output_type = node.output_type();
        let record = NodeRecord {
            is_source: input_types.is_empty(),
            is_sink: output_type.is_none(),
            input_types,
            output_type,
            node: Box::new(node),
        };
        debug!(node = %id, name = record.node.name(), "created node");

        self.nodes.insert(id, record);
        self.outgoing.insert(id, BTreeSet::new());
        self.incoming.insert(id, BTreeMap::new());
        id
    }

    /// Removes a node and every edge touching it
    ///
    /// Consumers that were fed by the erased node are notified through
    /// [`Node::unbind`] for each cleared slot. The node object is
    /// destroyed; its id is never handed out again.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidNodeId`] if `id` is unknown - erasing twice
    /// fails.
    pub fn erase_node(&mut self, id: NodeId) -> Result<()> {
        if !self.nodes.contains_key(&id) {
            return Err(ErrorKind::InvalidNodeId.into());
        }

        let producers: Vec<NodeId> = self.incoming[&id].values().copied().collect();
        for src in producers {
            self.disconnect(src, id)?;
        }

        let consumers: Vec<NodeId> = self.outgoing[&id].iter().copied().collect();
        for dst in consumers {
            self.disconnect(id, dst)?;
        }

        let record = self.nodes.remove(&id);
        self.outgoing.remove(&id);
        self.incoming.remove(&id);
        if let Some(record) = record {
            debug!(node = %id, name = record.node.name(), "erased node");
        }
        Ok(())
    }

    /// Borrows a node, or `None` if `id` is unknown
    ///
    /// Use `downcast_ref` on the result to recover the concrete node
    /// type.
    pub fn get_node(&self, id: NodeId) -> Option<&dyn Node> {
        self.nodes.get(&id).map(|record| record.node.as_ref())
    }

    /// Mutably borrows a node, or `None` if `id` is unknown
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut dyn Node> {
        self.nodes.get_mut(&id).map(|record| record.node.as_mut())
    }

    /// Connects `src`'s output to input slot `slot` of `dst`
    ///
    /// On success the edge is recorded in both adjacency tables and the
    /// destination node receives the producer's view through
    /// [`Node::bind`], exactly once.
    ///
    /// # Errors
    ///
    /// Checked in this order, and the first failure wins even when
    /// several conditions hold at once:
    ///
    /// 1. [`ErrorKind::InvalidNodeId`] - either id is unknown
    /// 2. [`ErrorKind::SlotAlreadyUsed`] - the slot is already filled
    /// 3. [`ErrorKind::NoSuchSlot`] - `slot` is out of range for `dst`
    /// 4. [`ErrorKind::ConnectionTypeMismatch`] - output token differs
    ///    from the slot's input token
    ///
    /// A failed connect leaves the pipeline unchanged.
    pub fn connect(&mut self, src: NodeId, dst: NodeId, slot: usize) -> Result<()> {
        if !self.nodes.contains_key(&src) || !self.nodes.contains_key(&dst) {
            return Err(ErrorKind::InvalidNodeId.into());
        }
        if self.incoming[&dst].contains_key(&slot) {
            return Err(ErrorKind::SlotAlreadyUsed.into());
        }
        let input_types = &self.nodes[&dst].input_types;
        if slot >= input_types.len() {
            return Err(ErrorKind::NoSuchSlot.into());
        }
        if Some(input_types[slot]) != self.nodes[&src].output_type {
            return Err(ErrorKind::ConnectionTypeMismatch.into());
        }

        // Hand the producer's view to the consumer before recording the
        // edge. The view is a cloned handle, so src == dst is fine.
        let view = self.nodes[&src].node.source_view();
        if let Some(view) = view {
            if let Some(record) = self.nodes.get_mut(&dst) {
                record.node.bind(view, slot);
            }
        }

        if let Some(slots) = self.incoming.get_mut(&dst) {
            slots.insert(slot, src);
        }
        if let Some(next) = self.outgoing.get_mut(&src) {
            next.insert(dst);
        }
        debug!(src = %src, dst = %dst, slot, "connected");
        Ok(())
    }

    /// Removes every edge from `src` to `dst`
    ///
    /// Clears each slot of `dst` currently fed by `src` (there may be
    /// several) and notifies `dst` through [`Node::unbind`] for each.
    /// Silently a no-op when the two nodes are not connected.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidNodeId`] if either id is unknown.
    pub fn disconnect(&mut self, src: NodeId, dst: NodeId) -> Result<()> {
        if !self.nodes.contains_key(&src) || !self.nodes.contains_key(&dst) {
            return Err(ErrorKind::InvalidNodeId.into());
        }

        let removed = self
            .outgoing
            .get_mut(&src)
            .map_or(false, |next| next.remove(&dst));
        if !removed {
            return Ok(());
        }

        let cleared: Vec<usize> = self.incoming[&dst]
            .iter()
            .filter(|(_, &producer)| producer == src)
            .map(|(&slot, _)| slot)
            .collect();
        if let Some(slots) = self.incoming.get_mut(&dst) {
            for slot in &cleared {
                slots.remove(slot);
            }
        }
        if let Some(record) = self.nodes.get_mut(&dst) {
            for &slot in &cleared {
                record.node.unbind(slot);
            }
        }

        debug!(src = %src, dst = %dst, slots = cleared.len(), "disconnected");
        Ok(())
    }

    /// Returns every `(consumer, slot)` currently fed by `src`
    ///
    /// The order is an implementation detail; callers that need a
    /// specific order should sort the result.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidNodeId`] if `src` is unknown.
    pub fn get_dependencies(&self, src: NodeId) -> Result<Vec<(NodeId, usize)>> {
        if !self.nodes.contains_key(&src) {
            return Err(ErrorKind::InvalidNodeId.into());
        }

        let mut dependencies = Vec::new();
        for &dst in &self.outgoing[&src] {
            for (&slot, &producer) in &self.incoming[&dst] {
                if producer == src {
                    dependencies.push((dst, slot));
                }
            }
        }
        Ok(dependencies)
    }

    /// Returns true if the pipeline is a runnable dataflow
    ///
    /// All of the following must hold:
    ///
    /// - every input slot of every node is filled
    /// - every non-sink node feeds at least one consumer
    /// - there is at least one source and at least one sink
    /// - the graph is one weakly connected component
    /// - the graph is acyclic
    ///
    /// An empty pipeline is invalid. `step` does not check this
    /// predicate; validating first is the caller's duty.
    pub fn is_valid(&self) -> bool {
        let mut has_source = false;
        let mut has_sink = false;
        for (id, record) in &self.nodes {
            if self.incoming[id].len() != record.input_types.len() {
                return false;
            }
            if !record.is_sink && self.outgoing[id].is_empty() {
                return false;
            }
            has_source |= record.is_source;
            has_sink |= record.is_sink;
        }
        has_source
            && has_sink
            && analysis::is_connected(&self.outgoing, &self.incoming)
            && !analysis::has_cycle(&self.outgoing)
    }
}

/// Renders the pipeline in a DOT-like form
///
/// Node lines come first in ascending id order, then a blank line, then
/// one edge line per filled slot sorted by `(src, dst)` - a producer
/// feeding two slots of the same consumer yields two identical lines.
impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph G {{")?;
        for (id, record) in &self.nodes {
            writeln!(f, "  \"{} {}\"", id, record.node.name())?;
        }

        let mut edges: Vec<(NodeId, NodeId)> = Vec::new();
        for (&dst, slots) in &self.incoming {
            for &src in slots.values() {
                edges.push((src, dst));
            }
        }
        edges.sort_unstable();

        writeln!(f)?;
        for (src, dst) in edges {
            writeln!(
                f,
                "  \"{} {}\" -> \"{} {}\"",
                src,
                self.nodes[&src].node.name(),
                dst,
                self.nodes[&dst].node.name()
            )?;
        }
        writeln!(f, "}}")
    }
}
