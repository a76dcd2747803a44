//! Line input for the shell

use anyhow::{anyhow, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;

/// Where the shell reads its lines from
pub trait LineSource {
    /// Show `prompt` and read one line. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Remember a line the user may want to recall later
    fn add_history(&mut self, _line: &str) {}
}

/// Interactive terminal input backed by rustyline
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> rustyline::Result<Self> {
        Ok(EditorSource {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(err) => Err(anyhow!("Error reading input: {}", err)),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

/// Pre-recorded lines, used for tests and piped input
#[derive(Debug, Default)]
pub struct ScriptedSource {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedSource {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Every prompt shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
