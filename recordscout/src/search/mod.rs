//! This module implements the concurrent fan-out/fan-in engine and its
//! sequential baseline.
//!
//! # Fan-out
//!
//! For N records the concurrent executor launches exactly N units of work onto
//! a bounded Rayon pool. Each unit evaluates one record with a
//! [`RecordMatcher`], which pays a fixed simulated processing cost before
//! applying its predicate:
//!
//! ```rust,ignore
//! for record in records {
//!     pool.spawn(move || report(matcher.evaluate(&record)));
//! }
//! ```
//!
//! # Fan-in
//!
//! Two aggregation policies merge the outcomes:
//!
//! 1. **First match** (lookup by id): outcomes arrive over a channel; the first
//!    match is returned immediately and a [`CancellationToken`] tells units that
//!    have not started yet to skip their work.
//! 2. **All matches** (search): matching units push into a mutex-guarded
//!    accumulator and a Rayon scope acts as the completion barrier. The result
//!    order is whatever order the units took the lock in.
//!
//! # Sequential baseline
//!
//! [`SequentialExecutor`] applies the same matcher to each record in input order
//! on the calling thread. Its results are ordered and its latency is the sum of
//! all unit delays, which makes it the reference point for timing comparisons.
pub mod cancel;
pub mod engine;
pub mod executor;
pub mod matcher;
pub mod processor;
pub mod sequential;

pub use cancel::CancellationToken;
pub use engine::{parse_id, RecordEngine};
pub use executor::{ConcurrentExecutor, Executor};
pub use matcher::{Predicate, RecordMatcher};
pub use processor::BatchProcessor;
pub use sequential::SequentialExecutor;
