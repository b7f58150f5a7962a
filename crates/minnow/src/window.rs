//! Display-side collaborator interface.
//!
//! Command handlers never render anything themselves; they append lines to
//! named buffers through this trait and the window implementation owns
//! storage, the active-buffer notion, and shutdown.

use chrono::{DateTime, Local};

/// Name of the pseudo-buffer not bound to any channel or query.
pub const HOME: &str = "home";

/// One displayed line in a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub at: DateTime<Local>,
    pub head: String,
    pub body: String,
}

impl Line {
    pub fn new(head: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            at: Local::now(),
            head: head.into(),
            body: body.into(),
        }
    }

    /// A headless line, used for help and continuation text.
    pub fn body_only(body: impl Into<String>) -> Self {
        Self::new("", body)
    }
}

pub trait Window {
    /// Name of the currently active buffer.
    fn current_buffer(&self) -> &str;

    /// Append a line to the named buffer. Lines addressed to a buffer the
    /// window doesn't know are dropped.
    fn add_line(&mut self, buffer: &str, line: Line);

    /// Switch to the first buffer whose name contains `pattern`. Returns
    /// whether any buffer matched.
    fn jump_buffer(&mut self, pattern: &str) -> bool;

    /// Ask the application to shut down once the current dispatch returns.
    fn exit(&mut self);
}
