//! The interactive read-normalize-review-execute loop.
//!
//! Each pass reads one line, expands aliases, hands the result to the safety
//! gate and reports how the cycle ended. Nothing short of `exit`, end of
//! input or a broken terminal leaves the loop.

use std::ops::ControlFlow;

use anyhow::Result;
use tracing::{info, warn};

use crate::ai::{AdvisoryClient, Advisor};
use crate::config::Config;
use crate::context::CurrentDir;
use crate::security::{CycleOutcome, SafetyGate};
use crate::shell::{AliasTable, Dispatcher, Interrupts, ShellDispatcher};
use crate::ui::{Input, LineEditor, Prompt, ShellHelper};

pub struct App<A, D> {
    gate: SafetyGate<A, D>,
    aliases: AliasTable,
    editor: LineEditor,
    identity: String,
}

impl App<AdvisoryClient, ShellDispatcher> {
    /// Wire up the real advisory client, `sh` dispatcher and terminal editor.
    pub fn from_config(config: &Config) -> Result<Self> {
        let advisor = if config.advisory.enabled {
            Some(AdvisoryClient::new(
                config.advisory.url.clone(),
                config.advisory.model.clone(),
                config.advisory.timeout(),
            )?)
        } else {
            None
        };

        let cwd = match CurrentDir::capture() {
            Some(cwd) => cwd,
            None => {
                warn!("could not read working directory, starting at /");
                CurrentDir::new("/", None)
            }
        };

        let gate = SafetyGate::new(
            advisor,
            ShellDispatcher::new(config.shell.interpreter.clone()),
            config.advisory.on_unavailable,
            cwd,
            Interrupts::install()?,
        );
        let editor = LineEditor::new(
            ShellHelper::new(config.shell.completions.clone()),
            Some(config.shell.history_path()),
        )?;

        Ok(Self::new(gate, config.alias_table(), editor, config.shell.identity.clone()))
    }
}

impl<A: Advisor, D: Dispatcher> App<A, D> {
    pub fn new(gate: SafetyGate<A, D>, aliases: AliasTable, editor: LineEditor, identity: String) -> Self {
        Self {
            gate,
            aliases,
            editor,
            identity,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!(
            review = self.gate.review_enabled(),
            aliases = self.aliases.len(),
            "shell started"
        );

        loop {
            let prompt = Prompt::render(&self.identity, &self.gate.cwd().display());
            let line = match self.editor.read_line(&prompt)? {
                Input::Line(line) => line,
                Input::Interrupted => continue,
                Input::Eof => break,
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.editor.remember(line);

            let command = self.aliases.normalize(line);
            let outcome = self.gate.execute(&command, &mut self.editor).await;
            if report(&outcome).is_break() {
                break;
            }
        }

        if let Err(e) = self.editor.save_history() {
            warn!("{:#}", e);
            eprintln!("kaelic-shell: {:#}", e);
        }
        info!("shell exiting");
        Ok(())
    }
}

/// Tell the user how a cycle ended; `Break` ends the loop.
fn report(outcome: &CycleOutcome) -> ControlFlow<()> {
    match outcome {
        CycleOutcome::Exit => return ControlFlow::Break(()),
        CycleOutcome::BuiltinFailed(e) => eprintln!("kaelic-shell: {}", e),
        CycleOutcome::DispatchFailed(e) => eprintln!("kaelic-shell: failed to run command: {}", e),
        CycleOutcome::Blocked(reason) => eprintln!("kaelic-shell: command not run: {}", reason),
        // The cursor is still on the line where ^C was echoed.
        CycleOutcome::Interrupted => eprintln!(),
        CycleOutcome::Empty
        | CycleOutcome::ChangedDirectory(_)
        | CycleOutcome::Executed(_)
        | CycleOutcome::Declined => {}
    }
    ControlFlow::Continue(())
}
