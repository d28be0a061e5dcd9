// Interactive I/O seam
//
// The session never touches stdin/stdout directly; it talks to a Prompter.
// `TerminalPrompter` is the real terminal, `testing::ScriptedPrompter` the
// test double.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::errors::CrewError;

pub trait Prompter {
    /// Show a line of output to the user
    fn say(&mut self, message: &str);

    /// Show `prompt` and read one line of input (without the trailing newline)
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// Line-edited terminal input via rustyline
pub struct TerminalPrompter {
    editor: DefaultEditor,
}

impl TerminalPrompter {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()?;
        Ok(Self { editor })
    }
}

impl Prompter for TerminalPrompter {
    fn say(&mut self, message: &str) {
        println!("{}", message);
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        // rustyline redraws only the last line of a prompt; print the rest first
        let (preamble, line_prompt) = match prompt.rsplit_once('\n') {
            Some((head, tail)) => (Some(head), tail),
            None => (None, prompt),
        };
        if let Some(head) = preamble {
            println!("{}", head);
        }

        match self.editor.readline(line_prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                Err(CrewError::InputClosed.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
