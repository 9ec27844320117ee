//! Completion, history hints and prompt colouring for the line editor.

use std::borrow::Cow::{self, Borrowed, Owned};

use crossterm::style::Stylize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use super::Prompt;

pub struct ShellHelper {
    words: Vec<String>,
    hinter: HistoryHinter,
    prompt: Prompt,
}

impl ShellHelper {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            hinter: HistoryHinter::new(),
            prompt: Prompt::default(),
        }
    }

    pub fn set_prompt(&mut self, prompt: Prompt) {
        self.prompt = prompt;
    }

    /// Case-insensitive prefix match of the word under the cursor.
    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let before = &line[..pos];
        let start = before
            .rfind(char::is_whitespace)
            .map(|idx| idx + before[idx..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        let word = before[start..].to_lowercase();

        let matches = self
            .words
            .iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&word))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect();
        (start, matches)
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ShellHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        // Only the shell prompt is coloured; the confirmation prompt is not.
        if default && prompt == self.prompt.plain() {
            Borrowed(self.prompt.styled())
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.dark_grey().to_string())
    }
}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}
