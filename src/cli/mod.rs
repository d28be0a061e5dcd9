// CLI module
// Public interface for command-line interface

mod args;
mod prompter;
mod run;

pub use args::Args;
pub use prompter::{Prompter, TerminalPrompter};
pub use run::{execute, select_role};
