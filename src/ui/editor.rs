//! Line editor wrapper: prompt, persistent history and confirmation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Editor};
use tracing::{debug, warn};

use crate::security::{is_affirmative, Confirmer};

use super::prompt::warning_line;
use super::{Prompt, ShellHelper};

const CONFIRM_PROMPT: &str = "Do you want to proceed? [y/N] ";

/// One read from the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C at the prompt: drop the line and prompt again.
    Interrupted,
    /// Ctrl-D or closed stdin: leave the shell.
    Eof,
}

pub struct LineEditor {
    editor: Editor<ShellHelper, DefaultHistory>,
    history_path: Option<PathBuf>,
}

impl LineEditor {
    pub fn new(helper: ShellHelper, history_path: Option<PathBuf>) -> Result<Self> {
        let config = rustyline::Config::builder()
            .auto_add_history(false)
            .completion_type(CompletionType::List)
            .build();
        let mut editor: Editor<ShellHelper, DefaultHistory> =
            Editor::with_config(config).context("failed to initialise line editor")?;
        editor.set_helper(Some(helper));

        if let Some(path) = &history_path {
            // A missing file just means a first run.
            if let Err(e) = editor.load_history(path) {
                debug!("no history loaded from {}: {}", path.display(), e);
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }

    pub fn read_line(&mut self, prompt: &Prompt) -> Result<Input> {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_prompt(prompt.clone());
        }

        match self.editor.readline(prompt.plain()) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(e) => Err(e).context("failed to read from terminal"),
        }
    }

    pub fn remember(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            warn!("failed to add history entry: {}", e);
        }
    }

    pub fn save_history(&mut self) -> Result<()> {
        let Some(path) = &self.history_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        self.editor
            .save_history(path)
            .with_context(|| format!("failed to save history to {}", path.display()))
    }
}

impl Confirmer for LineEditor {
    fn confirm(&mut self, explanation: &str) -> bool {
        eprintln!("{}", warning_line(explanation));
        match self.editor.readline(CONFIRM_PROMPT) {
            Ok(answer) => is_affirmative(&answer),
            Err(e) => {
                debug!("confirmation aborted: {}", e);
                false
            }
        }
    }
}
