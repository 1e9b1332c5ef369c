//! Application services
//!
//! Concrete service implementations that drive domain traversals.
//! Services depend on I/O boundary traits (Prompter, EffectSink)
//! but are themselves concrete structs, not traits.

mod decision;

pub use decision::{DecisionService, RunOutcome, ServiceOracle, TrailEntry};
