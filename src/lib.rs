//! Binary decision trees for game-AI style decisions.
//!
//! A [`DecisionTree`](domain::DecisionTree) holds decision nodes (a condition
//! plus a yes and a no branch) and action nodes (terminal effects). Walking the
//! tree evaluates one condition per level until it reaches an action, or an
//! unset branch, which yields no decision.
//!
//! Conditions that need the outside world are answered by an
//! [`Oracle`](domain::Oracle) passed in by the caller:
//!
//! ```
//! use dtree::domain::{combat_tree, SampleMode, ScriptedOracle};
//!
//! let tree = combat_tree(SampleMode::Interactive).unwrap();
//! let action = tree.decide(&mut ScriptedOracle::from_keys("N Y")).unwrap();
//! assert_eq!(action.map(|a| a.text()), Some("A1. Seek out enemies."));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
