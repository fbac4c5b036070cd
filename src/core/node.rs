//! Node identity and the node capability trait
//!
//! A pipeline stores heterogeneous user-supplied nodes behind one
//! object-safe trait. Each concrete node type declares its type identity
//! (input tokens per slot, output token) at construction time; the store
//! caches those tokens and never inspects the node's payload again.
//!
//! # Design Decision
//!
//! Type identity is `std::any::TypeId` — nominal and comparable, never
//! structural. A sink is a node whose output token is `None`; a source is
//! a node whose input list is empty. Both classifications are derived,
//! not declared.

use super::poll::Poll;
use super::value::SourceView;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::fmt;

/// Unique identifier for a node within one pipeline
///
/// Identifiers are allocated from a per-pipeline monotone counter and are
/// never reused after an erase. They order and hash by the underlying
/// integer, so adjacency tables keyed by id iterate in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Capability interface every pipeline node satisfies
///
/// User code implements this for concrete producers, components, and
/// sinks; the pipeline owns the node and drives it exclusively through
/// this trait. The `Any` supertrait lets hosts recover the concrete type
/// from [`get_node`](crate::Pipeline::get_node) via `downcast_ref`.
///
/// # Contract
///
/// - `input_types` and `output_type` must be stable for the node's
///   lifetime; the store caches them at creation.
/// - `bind` is invoked exactly once per successful connect targeting a
///   slot, `unbind` once per disconnect clearing it.
/// - After a `Ready` poll, the node's output cell holds the new value.
/// - Nodes must not retain references to the pipeline or to peers beyond
///   the view handed to `bind`, and must not mutate the graph during a
///   step.
pub trait Node: Any {
    /// Display name used in diagnostics and graph rendering
    fn name(&self) -> &str;

    /// Input type tokens, one per slot, in slot order; empty for sources
    fn input_types(&self) -> Vec<TypeId>;

    /// Output type token; `None` marks a sink
    fn output_type(&self) -> Option<TypeId>;

    /// Advances the node one tick
    fn poll_next(&mut self) -> Poll;

    /// Receives the producer view when `slot` is connected
    ///
    /// Sources keep the default no-op; consumers downcast the view and
    /// cache the typed handle for value reads during later polls.
    fn bind(&mut self, source: SourceView, slot: usize) {
        let _ = (source, slot);
    }

    /// Notifies that the producer filling `slot` was disconnected
    ///
    /// Consumers drop the handle cached by [`bind`](Node::bind) here.
    fn unbind(&mut self, slot: usize) {
        let _ = slot;
    }

    /// Type-erased handle to this node's output cell; `None` for sinks
    fn source_view(&self) -> Option<SourceView> {
        None
    }
}

impl dyn Node {
    /// Borrows the node as its concrete type
    pub fn downcast_ref<N: Node>(&self) -> Option<&N> {
        (self as &dyn Any).downcast_ref::<N>()
    }

    /// Mutably borrows the node as its concrete type
    pub fn downcast_mut<N: Node>(&mut self) -> Option<&mut N> {
        (self as &mut dyn Any).downcast_mut::<N>()
    }
}
