//! Hunt core: the location catalog and the unlock gate.
//!
//! The registry is built once at startup from configuration and never
//! mutated. The evaluator recomputes unlock status from each request's
//! submitted password; nothing is remembered between requests.

pub mod catalog;
mod evaluator;
mod registry;

pub use evaluator::UnlockEvaluator;
pub use registry::Registry;
