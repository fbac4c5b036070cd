//! Execution engine for pipelines
//!
//! Everything here surfaces as inherent methods on
//! [`Pipeline`](crate::Pipeline): [`step`](crate::Pipeline::step) drives
//! one cooperative tick, [`run`](crate::Pipeline::run) ticks until every
//! sink is closed. Execution is strictly single-threaded - `step` runs to
//! completion with no suspension point, and node polls are expected to do
//! bounded work and return promptly.

mod scheduler;
