//! Sample combat tree: seven questions, five actions.
//!
//! ```text
//! Q1 enemies visible?  yes -> Q3  no -> Q2
//! Q2 health okay?      yes -> A1  no -> A2
//! Q3 enemy close?      yes -> Q4  no -> Q5
//! Q4 enemy dangerous?  yes -> Q6  no -> A3
//! Q5 health okay?      yes -> A3  no -> A4
//! Q6 in cover?         yes -> A3  no -> Q7
//! Q7 cover nearby?     yes -> A5  no -> A3
//! ```

use crate::domain::condition::Condition;
use crate::domain::error::DomainResult;
use crate::domain::tree::DecisionTree;
use crate::domain::TreeBuilder;

pub const QUESTIONS: [&str; 7] = [
    "Q1. Can you see any enemies? (Yes->Q3, No->Q2)",
    "Q2. Is your health okay? (Yes->A1, No->A2)",
    "Q3. Is the enemy close by? (Yes->Q4, No->Q5)",
    "Q4. Is the enemy dangerous? (Yes->Q6, No->A3)",
    "Q5. Is your health okay? (Yes->A3, No->A4)",
    "Q6. Are you in cover? (Yes->A3, No->Q7)",
    "Q7. Is there cover nearby? (Yes->A5, No->A3)",
];

pub const ACTIONS: [&str; 5] = [
    "A1. Seek out enemies.",
    "A2. Seek out health packs.",
    "A3. Attack enemy.",
    "A4. Run away from enemy.",
    "A5. Head for cover.",
];

/// How the sample tree's decisions are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleMode {
    /// Each decision asks its question.
    #[default]
    Interactive,
    /// Each decision flips a coin.
    Random,
}

impl SampleMode {
    fn condition(self, question: &str) -> Condition {
        match self {
            SampleMode::Interactive => Condition::ask(question),
            SampleMode::Random => Condition::Random,
        }
    }
}

pub fn combat_tree(mode: SampleMode) -> DomainResult<DecisionTree> {
    let mut builder = TreeBuilder::new();
    let q: Vec<_> = QUESTIONS
        .iter()
        .map(|question| builder.add_decision(mode.condition(question)))
        .collect();
    let a: Vec<_> = ACTIONS.iter().map(|text| builder.add_action(*text)).collect();

    // (decision, yes, no)
    let wiring = [
        (q[0], q[2], q[1]),
        (q[1], a[0], a[1]),
        (q[2], q[3], q[4]),
        (q[3], q[5], a[2]),
        (q[4], a[2], a[3]),
        (q[5], a[2], q[6]),
        (q[6], a[4], a[2]),
    ];
    for (decision, yes, no) in wiring {
        builder.yes(decision, yes)?;
        builder.no(decision, no)?;
    }

    builder.build()
}
