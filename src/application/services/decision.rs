//! Decision service
//!
//! Walks a decision tree once, answering random decisions from a seedable RNG
//! and interactive ones through a [`Prompter`], then performs the chosen action.

use std::sync::Arc;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{DecisionTree, EffectSink, Node, Oracle};
use crate::infrastructure::traits::Prompter;

/// One answered question of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailEntry {
    pub question: String,
    pub answer: bool,
}

/// Result of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Text of the performed action; `None` when the walk hit an unset branch
    pub action: Option<String>,
    /// Decisions evaluated on the way, root first
    pub trail: Vec<TrailEntry>,
}

/// `true` when `key` matches the affirmative character, ignoring case.
pub fn is_affirmative(key: char, affirmative: char) -> bool {
    key.to_lowercase().eq(affirmative.to_lowercase())
}

/// Oracle backed by a prompter and a random source.
pub struct ServiceOracle<'a> {
    prompter: &'a dyn Prompter,
    rng: &'a mut dyn RngCore,
    affirmative: char,
    prompt_suffix: &'a str,
    strict: bool,
}

impl<'a> ServiceOracle<'a> {
    pub fn new(
        settings: &'a Settings,
        prompter: &'a dyn Prompter,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            prompter,
            rng,
            affirmative: settings.affirmative,
            prompt_suffix: &settings.prompt_suffix,
            strict: settings.strict_input,
        }
    }
}

impl Oracle for ServiceOracle<'_> {
    type Error = ApplicationError;

    fn coin_flip(&mut self) -> ApplicationResult<bool> {
        let answer: bool = self.rng.gen();
        debug!(answer, "coin flip");
        Ok(answer)
    }

    fn ask(&mut self, question: &str) -> ApplicationResult<bool> {
        let prompt = format!("{}{}", question, self.prompt_suffix);
        match self.prompter.prompt(&prompt).with_question_context(question) {
            Ok(Some(key)) => {
                let answer = is_affirmative(key, self.affirmative);
                debug!(?key, answer, "answer read");
                Ok(answer)
            }
            Ok(None) if self.strict => Err(ApplicationError::InputClosed {
                question: question.to_string(),
            }),
            Ok(None) => {
                warn!(question, "input closed, answering no");
                Ok(false)
            }
            Err(e @ ApplicationError::Input { .. }) if !self.strict => {
                warn!(question, error = %e, "cannot read answer, answering no");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

/// Service running one decision per call.
pub struct DecisionService {
    settings: Arc<Settings>,
    prompter: Arc<dyn Prompter>,
    rng: ChaCha8Rng,
}

impl DecisionService {
    /// Create a decision service; random decisions are seeded from settings or OS entropy.
    pub fn new(settings: Arc<Settings>, prompter: Arc<dyn Prompter>) -> Self {
        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            settings,
            prompter,
            rng,
        }
    }

    /// Walk `tree` from its root and perform the chosen action exactly once.
    #[instrument(level = "debug", skip_all)]
    pub fn run<S: EffectSink + ?Sized>(
        &mut self,
        tree: &DecisionTree,
        sink: &mut S,
    ) -> ApplicationResult<RunOutcome> {
        let mut oracle =
            ServiceOracle::new(&self.settings, self.prompter.as_ref(), &mut self.rng);
        let walk = tree.walk(tree.root(), &mut oracle)?;

        let trail = walk
            .steps
            .iter()
            .map(|step| TrailEntry {
                question: tree
                    .node(step.node)
                    .map(Node::label)
                    .unwrap_or_default(),
                answer: step.answer,
            })
            .collect();

        let action = match walk.action {
            Some(action) => {
                info!(action = action.text(), "performing action");
                action.act(sink).with_action_context(action.text())?;
                Some(action.text().to_string())
            }
            None => {
                info!("no decision, nothing to perform");
                None
            }
        };

        Ok(RunOutcome { action, trail })
    }
}
