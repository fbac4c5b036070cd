//! Value transport between connected nodes
//!
//! The pipeline moves no data itself. A producer owns an [`Output<T>`]
//! cell holding its most recent value; when a connection is made, the
//! consumer receives a type-erased [`SourceView`] of that cell and
//! downcasts it to a [`ValueRef<T>`] read handle using the output type it
//! expects. Each poll reads the producer's latest value through the
//! handle; values are never queued, so a slow consumer simply skips over
//! whatever the producer overwrote in between.
//!
//! # Design
//!
//! The cells are `Rc<RefCell<T>>`. Execution is strictly single-threaded
//! and cooperative, so interior mutability without atomics is the honest
//! representation; a pipeline holding these handles is deliberately not
//! `Send`. The `Rc` also means a consumer's cached handle can never
//! dangle: erasing the producer keeps the cell alive until the last
//! handle is dropped (consumers are asked to drop theirs via
//! [`Node::unbind`](crate::core::Node::unbind)).

use std::any::Any;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// The owning side of a producer's output cell
///
/// Producers store a value with [`set`](Output::set) when a poll comes up
/// `Ready`, and expose the cell to the pipeline through
/// [`view`](Output::view).
#[derive(Debug)]
pub struct Output<T> {
    cell: Rc<RefCell<T>>,
}

impl<T: 'static> Output<T> {
    /// Creates an output cell holding `initial`
    ///
    /// The initial value is what consumers observe before the first
    /// `Ready` poll.
    pub fn new(initial: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(initial)),
        }
    }

    /// Replaces the current value
    pub fn set(&self, value: T) {
        *self.cell.borrow_mut() = value;
    }

    /// Borrows the current value
    pub fn get(&self) -> Ref<'_, T> {
        self.cell.borrow()
    }

    /// Returns a type-erased view of this cell for handing to consumers
    pub fn view(&self) -> SourceView {
        SourceView {
            inner: Box::new(ValueRef {
                cell: Rc::clone(&self.cell),
            }),
        }
    }
}

impl<T: Default + 'static> Default for Output<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A read handle onto a producer's output cell
///
/// Obtained by downcasting a [`SourceView`] inside
/// [`Node::bind`](crate::core::Node::bind). Cloning the handle clones the
/// reference, not the value.
#[derive(Debug)]
pub struct ValueRef<T> {
    cell: Rc<RefCell<T>>,
}

impl<T> ValueRef<T> {
    /// Borrows the producer's most recent value
    pub fn get(&self) -> Ref<'_, T> {
        self.cell.borrow()
    }
}

impl<T> Clone for ValueRef<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

/// Type-erased view of a producer's output, passed to [`Node::bind`]
///
/// The consumer recovers the typed handle with the output type it was
/// declared to accept; a mismatched downcast yields `None`. Connections
/// are type-checked before `bind` is invoked, so a `None` here means the
/// consumer asked for a type it never declared.
///
/// [`Node::bind`]: crate::core::Node::bind
pub struct SourceView {
    inner: Box<dyn Any>,
}

impl SourceView {
    /// Recovers the typed read handle
    pub fn downcast<T: 'static>(self) -> Option<ValueRef<T>> {
        self.inner.downcast::<ValueRef<T>>().ok().map(|v| *v)
    }
}

impl std::fmt::Debug for SourceView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceView").finish_non_exhaustive()
    }
}
