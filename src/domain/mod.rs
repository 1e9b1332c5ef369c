//! Domain layer: decision tree model and traversal
//!
//! This layer is independent of external concerns (no terminal, no RNG, no config loading).

pub mod builder;
pub mod condition;
pub mod error;
pub mod sample;
pub mod tree;

pub use builder::TreeBuilder;
pub use condition::{Condition, Oracle, Predicate, ScriptedOracle};
pub use error::{DomainError, DomainResult};
pub use sample::{combat_tree, SampleMode};
pub use tree::{
    ActionNode, ActionRef, DecisionNode, DecisionTree, EffectSink, Node, NodeId, Step, Walk,
};
