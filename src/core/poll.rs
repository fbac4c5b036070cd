//! Poll outcome type
//!
//! A node advances one tick at a time; every advance reports one of three
//! outcomes. `Closed` is terminal for the node itself: a well-behaved node
//! keeps answering `Closed` on every later poll.

use serde::{Deserialize, Serialize};

/// Outcome of polling a node for its next value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Poll {
    /// A new value is available; the node's output now reflects it
    Ready,
    /// No value this tick, but there may be one later
    Empty,
    /// No value this tick, and there never will be again
    Closed,
}

impl Poll {
    /// Returns true if this outcome is terminal
    pub fn is_closed(self) -> bool {
        matches!(self, Poll::Closed)
    }
}
