//! Typed dataflow graph store and analyses
//!
//! This module provides the [`Pipeline`] store - the mutable container
//! owning every node and the two reciprocal adjacency tables - together
//! with the read-only analyses over it (reachability, weak connectivity,
//! cycle detection, topological order) that back the validity predicate
//! and the step scheduler.
//!
//! # Design Principles
//!
//! The module hides the graph representation; callers see only the
//! abstract operations: `create_node`, `connect`, `disconnect`,
//! `erase_node`, `get_dependencies`, `is_valid`, and rendering via
//! `Display`.

pub(crate) mod analysis;
mod pipeline;

pub use pipeline::Pipeline;
