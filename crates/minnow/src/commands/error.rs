//! Dispatch error taxonomy.
//!
//! Every variant is non-fatal: the shell renders it as a single status line
//! and keeps running. The only way out of the process is a successful QUIT.

use thiserror::Error;

/// Domain failure raised by a command handler itself, e.g. trying to part
/// the home buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Why an input line failed before or during its handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No registered command name starts with the typed fragment.
    #[error("command {fragment:?} doesn't exist")]
    UnknownCommand { fragment: String },

    /// Two or more registered names share the typed prefix. Candidates are
    /// in name order so the message is stable run-to-run.
    #[error("ambiguous command {fragment:?} (could mean {})", .candidates.join(" or "))]
    AmbiguousCommand {
        fragment: String,
        candidates: Vec<String>,
    },

    /// Fewer arguments than the command's minimum arity.
    #[error("usage: {name} {usage}")]
    TooFewArguments {
        name: &'static str,
        usage: &'static str,
    },

    /// The command may not run while the home buffer is active.
    #[error("command {name:?} cannot be executed from home")]
    HomeNotAllowed { name: &'static str },

    /// The handler ran and failed on its own terms.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}
