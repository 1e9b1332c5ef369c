//! Branch conditions evaluated at decision nodes.
//!
//! A [`Condition`] is the strategy part of a decision node. Conditions that need
//! the outside world (randomness, a human at a keyboard) go through an
//! [`Oracle`] supplied by the caller, so the walk itself performs no I/O.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied source of branch answers.
pub trait Oracle {
    type Error;

    /// Uniformly distributed boolean.
    fn coin_flip(&mut self) -> Result<bool, Self::Error>;

    /// Ask a yes/no question. `true` selects the yes branch.
    fn ask(&mut self, question: &str) -> Result<bool, Self::Error>;
}

/// Boolean test evaluated without oracle involvement, e.g. a game sensor.
pub type Predicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// How a decision node picks its branch.
#[derive(Clone)]
pub enum Condition {
    /// Uniform random choice.
    Random,
    /// Interactive question.
    Ask(String),
    /// Constant answer.
    Fixed(bool),
    /// Arbitrary test with a display label.
    Predicate { label: String, test: Predicate },
}

impl Condition {
    pub fn ask(question: impl Into<String>) -> Self {
        Self::Ask(question.into())
    }

    pub fn predicate<F>(label: impl Into<String>, test: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::Predicate {
            label: label.into(),
            test: Arc::new(test),
        }
    }

    /// Evaluate the condition; `true` selects the yes branch.
    pub fn evaluate<O: Oracle + ?Sized>(&self, oracle: &mut O) -> Result<bool, O::Error> {
        match self {
            Condition::Random => oracle.coin_flip(),
            Condition::Ask(question) => oracle.ask(question),
            Condition::Fixed(answer) => Ok(*answer),
            Condition::Predicate { test, .. } => Ok(test()),
        }
    }

    /// Whether repeated evaluation with the same oracle answers can differ.
    pub fn is_random(&self) -> bool {
        matches!(self, Condition::Random)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Random => f.write_str("Random"),
            Condition::Ask(question) => f.debug_tuple("Ask").field(question).finish(),
            Condition::Fixed(answer) => f.debug_tuple("Fixed").field(answer).finish(),
            Condition::Predicate { label, .. } => {
                f.debug_struct("Predicate").field("label", label).finish_non_exhaustive()
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Random => f.write_str("(random)"),
            Condition::Ask(question) => f.write_str(question),
            Condition::Fixed(true) => f.write_str("(always yes)"),
            Condition::Fixed(false) => f.write_str("(always no)"),
            Condition::Predicate { label, .. } => f.write_str(label),
        }
    }
}

/// Oracle replaying pre-recorded answers.
///
/// Random draws and questions consume the same queue. An exhausted script
/// answers "no", the same way a closed input stream does.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOracle {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedOracle {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Build from key presses, e.g. `"NYY"`; `y`/`Y` is yes, anything else no.
    pub fn from_keys(keys: &str) -> Self {
        Self::new(
            keys.chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.eq_ignore_ascii_case(&'y')),
        )
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self) -> bool {
        self.answers.pop_front().unwrap_or(false)
    }
}

impl Oracle for ScriptedOracle {
    type Error = Infallible;

    fn coin_flip(&mut self) -> Result<bool, Self::Error> {
        Ok(self.next_answer())
    }

    fn ask(&mut self, question: &str) -> Result<bool, Self::Error> {
        self.asked.push(question.to_string());
        Ok(self.next_answer())
    }
}
