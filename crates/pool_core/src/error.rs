//! Error types for the dispatch pipeline.
//!
//! Scheduler errors are internal invariant violations; input errors come from
//! the loader. Neither is retried: any failure aborts the run.

/// Errors raised by [crate::clock::EventScheduler].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    /// Extract or peek on a scheduler holding zero events.
    #[error("event scheduler is empty")]
    Empty,
}

/// Malformed or insufficient input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The token stream ended before `expected` could be read.
    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: &'static str },

    /// A token could not be parsed as the number `field` requires.
    #[error("invalid value {token:?} for {field}")]
    InvalidNumber { field: &'static str, token: String },

    /// Parameters parsed but are outside their valid range.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for a dispatch run.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Input(#[from] InputError),
}
