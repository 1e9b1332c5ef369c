//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add I/O context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("failed to read answer to: {question}")]
    Input {
        question: String,
        #[source]
        source: std::io::Error,
    },

    #[error("input closed before answering: {question}")]
    InputClosed { question: String },

    #[error("interrupted")]
    Interrupted,

    #[error("failed to perform action: {context}")]
    Effect {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
