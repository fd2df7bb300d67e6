//! # lens-retrieval
//!
//! Turns subject entities into search queries ([`plan_queries`]) and runs
//! them with bounded parallelism ([`RetrievalFanout`]), registering every
//! hit in a shared [`lens_grounding::SourceRegistry`].

mod error;
pub mod fanout;
pub mod planner;

pub use error::RetrievalError;
pub use fanout::{FanoutSettings, FanoutSummary, RetrievalFanout};
pub use planner::plan_queries;
