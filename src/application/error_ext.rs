//! Error conversion helpers for terminal I/O
//!
//! Provides extension traits for cleaner error handling with context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Attribute an I/O error to the question being answered.
    ///
    /// Interrupts (Ctrl+C in raw mode) become [`ApplicationError::Interrupted`].
    fn with_question_context(self, question: &str) -> ApplicationResult<T>;

    /// Attribute an I/O error to the action being performed.
    fn with_action_context(self, text: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_question_context(self, question: &str) -> ApplicationResult<T> {
        self.map_err(|e| match e.kind() {
            io::ErrorKind::Interrupted => ApplicationError::Interrupted,
            _ => ApplicationError::Input {
                question: question.to_string(),
                source: e,
            },
        })
    }

    fn with_action_context(self, text: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Effect {
            context: text.to_string(),
            source: e,
        })
    }
}
