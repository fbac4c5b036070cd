//! Rheo: Typed Dataflow Pipelines for Rust
//!
//! `rheo` (ῥέω, Greek for "to flow") builds and executes typed dataflow
//! pipelines: directed graphs whose nodes produce, transform, or consume
//! values, and whose edges carry typed data from a producer's output to a
//! numbered input slot of a consumer.
//!
//! # Features
//!
//! - **Typed connections**: every edge is checked nominally against the
//!   tokens each node declares; mismatches fail at `connect` time
//! - **Incremental construction**: nodes and edges can be added and
//!   removed freely between runs; erasing a node cascades through every
//!   edge touching it
//! - **Structural validation**: `is_valid` checks full fan-in, no
//!   dangling producers, source/sink presence, weak connectivity, and
//!   acyclicity
//! - **Polling execution**: `step` walks the graph one cooperative tick
//!   at a time, short-circuiting everything downstream of a node with
//!   nothing to give
//!
//! # Quick Start
//!
//! ```ignore
//! use rheo::prelude::*;
//! use std::any::TypeId;
//!
//! struct Counter { value: i64, out: Output<i64> }
//!
//! impl Node for Counter {
//!     fn name(&self) -> &str { "counter" }
//!     fn input_types(&self) -> Vec<TypeId> { Vec::new() }
//!     fn output_type(&self) -> Option<TypeId> { Some(TypeId::of::<i64>()) }
//!     fn poll_next(&mut self) -> Poll {
//!         if self.value >= 3 { return Poll::Closed; }
//!         self.value += 1;
//!         self.out.set(self.value);
//!         Poll::Ready
//!     }
//!     fn source_view(&self) -> Option<SourceView> { Some(self.out.view()) }
//! }
//!
//! struct Printer { input: Option<ValueRef<i64>> }
//!
//! impl Node for Printer {
//!     fn name(&self) -> &str { "printer" }
//!     fn input_types(&self) -> Vec<TypeId> { vec![TypeId::of::<i64>()] }
//!     fn output_type(&self) -> Option<TypeId> { None }
//!     fn poll_next(&mut self) -> Poll {
//!         match &self.input {
//!             Some(input) => { println!("{}", input.get()); Poll::Ready }
//!             None => Poll::Empty,
//!         }
//!     }
//!     fn bind(&mut self, source: SourceView, _slot: usize) {
//!         self.input = source.downcast::<i64>();
//!     }
//!     fn unbind(&mut self, _slot: usize) { self.input = None; }
//! }
//!
//! let mut pipeline = Pipeline::new();
//! let counter = pipeline.create_node(Counter { value: 0, out: Output::new(0) });
//! let printer = pipeline.create_node(Printer { input: None });
//! pipeline.connect(counter, printer, 0)?;
//! assert!(pipeline.is_valid());
//! pipeline.run(); // prints 1, 2, 3
//! ```
//!
//! # Module Organization
//!
//! Each module hides one set of design decisions:
//!
//! - [`core`]: node identity, the [`Node`] contract, poll outcomes, the
//!   value-view transport, and the error type
//! - [`graph`]: the pipeline store and its structural analyses (hides the
//!   graph representation)
//! - `executor`: the step scheduler (hides the propagation strategy)
//!
//! # Execution Model
//!
//! Strictly single-threaded and cooperative: `step` runs to completion
//! without suspension, nodes are polled at most once per tick, and a node
//! is polled only after all of its producers. There is no cancellation
//! and no timeout; bounded execution means iterating `step` yourself.

pub mod core;
mod executor;
pub mod graph;

// Re-export commonly used types for convenience
pub use crate::core::{
    ErrorKind, Node, NodeId, Output, PipelineError, Poll, Result, SourceView, ValueRef,
};
pub use crate::graph::Pipeline;

/// Prelude module for convenient glob imports
///
/// # Example
///
/// ```
/// use rheo::prelude::*;
/// ```
pub mod prelude {
    // The store and the node contract - used by every host program
    pub use crate::core::{Node, NodeId, Poll};
    pub use crate::graph::Pipeline;

    // Value transport between connected nodes
    pub use crate::core::{Output, SourceView, ValueRef};

    // Error handling
    pub use crate::core::{ErrorKind, PipelineError};
}
