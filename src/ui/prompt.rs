//! Prompt and warning rendering.

use crossterm::style::Stylize;

/// The shell prompt, e.g. `architect@kael-os:~/src>$ `.
///
/// The plain form is what the editor measures; the styled form is what gets
/// painted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    plain: String,
    styled: String,
}

const SIGIL: &str = ">$ ";

impl Prompt {
    pub fn render(identity: &str, path: &str) -> Self {
        Self {
            plain: format!("{identity}:{path}{SIGIL}"),
            styled: format!(
                "{}:{}{}",
                identity.green().bold(),
                path.blue().bold(),
                SIGIL.yellow().bold()
            ),
        }
    }

    pub fn plain(&self) -> &str {
        &self.plain
    }

    pub fn styled(&self) -> &str {
        &self.styled
    }
}

/// Line printed to stderr when the advisory model flags a command.
pub fn warning_line(explanation: &str) -> String {
    format!("{} {}", "Kael's Warning:".yellow(), explanation)
}
