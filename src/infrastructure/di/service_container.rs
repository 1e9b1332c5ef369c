//! Service container for dependency injection
//!
//! Wires up services with their dependencies.

use std::sync::Arc;

use crate::application::services::DecisionService;
use crate::config::Settings;
use crate::infrastructure::traits::{Prompter, TerminalPrompter};

/// Container holding settings and I/O boundaries shared by services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Source of interactive answers
    pub prompter: Arc<dyn Prompter>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let prompter = Arc::new(TerminalPrompter::new(settings.input_mode));
        Self::with_deps(settings, prompter)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, prompter: Arc<dyn Prompter>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, prompter }
    }

    /// Fresh decision service; each gets its own RNG.
    pub fn decision_service(&self) -> DecisionService {
        DecisionService::new(Arc::clone(&self.settings), Arc::clone(&self.prompter))
    }
}
