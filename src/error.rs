//! Error types for the to-do list manager.

use std::fmt;

/// The task-list operations that pick a task by its 1-based number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Complete,
    Delete,
}

impl Operation {
    /// Verb phrase used in prompts ("Select a task to ...").
    pub fn verb(self) -> &'static str {
        match self {
            Self::Complete => "mark as completed",
            Self::Delete => "delete",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Complete => "marked as completed",
            Self::Delete => "deleted",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Errors raised by the task manager and the interactive loop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Complete or delete was requested while the list is empty.
    #[error("No tasks to {0}. Task list is empty.")]
    EmptyList(Operation),

    /// Task number outside `1..=count`.
    #[error("Invalid task number. No task {}.", .operation.past_tense())]
    InvalidTaskNumber {
        /// The operation that was rejected.
        operation: Operation,
        /// The number that was entered (0 when the input was not a number).
        number: usize,
        /// How many tasks were listed.
        count: usize,
    },

    /// Unrecognised main-menu selection.
    #[error("Invalid choice! Please enter a number between 0 and 6.")]
    InvalidMenuChoice(String),

    /// Unrecognised view-filter selection.
    #[error("Invalid choice!")]
    InvalidFilterChoice(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading from the terminal prompt failed.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Bad user input is reported and the menu redisplayed. Everything else
    /// ends the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptyList(_)
                | Self::InvalidTaskNumber { .. }
                | Self::InvalidMenuChoice(_)
                | Self::InvalidFilterChoice(_)
        )
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
