//! Core types for the pipeline engine
//!
//! This module provides the fundamental building blocks shared by the
//! graph store and the step scheduler:
//!
//! # Domain Model
//! - [`NodeId`]: per-pipeline monotone node handle
//! - [`Node`]: the capability trait every user node implements
//! - [`Poll`]: the three-state outcome of advancing a node one tick
//!
//! # Value Transport
//! - [`Output`]: the shared cell a producer writes its latest value into
//! - [`ValueRef`]: a consumer's typed read handle onto that cell
//! - [`SourceView`]: the type-erased view handed to consumers at bind time
//!
//! # Error Handling
//! - [`PipelineError`] / [`ErrorKind`]: the single error type with its
//!   closed set of four kinds
//! - [`Result<T>`]: alias for results using `PipelineError`

mod error;
mod node;
mod poll;
mod value;

pub use error::{ErrorKind, PipelineError, Result};
pub use node::{Node, NodeId};
pub use poll::Poll;
pub use value::{Output, SourceView, ValueRef};
