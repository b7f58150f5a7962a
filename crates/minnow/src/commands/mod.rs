//! Command system for `/command` input lines.
//!
//! One raw line becomes a validated handler invocation in five stages:
//! - Parsing: command fragment and argument tail (parse.rs)
//! - Resolution: unambiguous prefix lookup in the registry (registry.rs, exec.rs)
//! - Splitting: positional fields, last field keeps the rest (parse.rs)
//! - Validation: arity first, then home-buffer permission (exec.rs)
//! - Execution: the handler behind the resolved descriptor (exec.rs)
//!
//! Every stage failure is a `DispatchError`, rendered by the shell as one
//! status line; nothing here terminates the process.

mod error;
mod exec;
mod parse;
mod registry;

pub use exec::{handle_input, CommandContext};
pub use registry::Registry;

// Re-exports for external use (kept for future API stability)
#[allow(unused_imports)]
pub use error::{DispatchError, HandlerError};
#[allow(unused_imports)]
pub use parse::{parse_command, split_args, ParsedLine};
#[allow(unused_imports)]
pub use registry::{CommandDescriptor, CommandKind};
