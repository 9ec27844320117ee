//! Command execution gating with advisory verdict enforcement.
//!
//! `SafetyGate::execute` is the single entrypoint for running a normalized
//! command. One call is one cycle:
//!
//! ```text
//! Idle -> (BuiltinHandled | ReviewPending)
//!      -> (Executing | AwaitingConfirmation -> (Executing | Declined))
//!      -> Idle
//! ```
//!
//! The string that is reviewed is the string that is dispatched; nothing is
//! re-normalized in between.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use tracing::{debug, info, warn};

use crate::ai::Advisor;
use crate::context::CurrentDir;
use crate::shell::{change_directory, Builtin, BuiltinError, Dispatcher, Interrupts};

use super::{Confirmer, Review, UnavailablePolicy, Verdict};

/// What the gate decided to do with a reviewed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionDecision {
    /// Reviewed as safe, or unreviewed under the fail-open policy.
    Execute,
    /// The advisor warned; `reason` is its explanation, shown before asking.
    RequireConfirmation { reason: String },
    /// No verdict could be obtained and the fail-closed policy refuses to
    /// run unreviewed commands.
    Deny { reason: String },
}

/// Map a review onto a decision under the given unavailability policy.
///
/// # Examples
/// ```
/// use kaelic_shell::security::{Review, UnavailablePolicy, Verdict};
/// use kaelic_shell::security::executor::{gate_command, ExecutionDecision};
///
/// let safe = Review::Verdict(Verdict::Safe);
/// assert_eq!(gate_command(&safe, UnavailablePolicy::Allow), ExecutionDecision::Execute);
///
/// // Fail open by default.
/// let down = Review::Unavailable("connection refused".into());
/// assert_eq!(gate_command(&down, UnavailablePolicy::Allow), ExecutionDecision::Execute);
/// assert!(matches!(
///     gate_command(&down, UnavailablePolicy::Block),
///     ExecutionDecision::Deny { .. }
/// ));
/// ```
pub fn gate_command(review: &Review, policy: UnavailablePolicy) -> ExecutionDecision {
    match review {
        Review::Verdict(Verdict::Safe) => ExecutionDecision::Execute,
        Review::Verdict(Verdict::Warning(reason)) => ExecutionDecision::RequireConfirmation {
            reason: reason.clone(),
        },
        Review::Unavailable(reason) => match policy {
            UnavailablePolicy::Allow => ExecutionDecision::Execute,
            UnavailablePolicy::Block => ExecutionDecision::Deny {
                reason: format!("advisory service unavailable: {reason}"),
            },
        },
    }
}

/// How a single command cycle ended.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Nothing to do: the normalized command was empty.
    Empty,
    /// `exit` was entered.
    Exit,
    /// `cd` moved the working directory.
    ChangedDirectory(PathBuf),
    /// A built-in failed; the working directory is unchanged.
    BuiltinFailed(BuiltinError),
    /// The command ran; carries the child's own status.
    Executed(ExitStatus),
    /// The interpreter could not be started.
    DispatchFailed(io::Error),
    /// The user did not confirm a warned command.
    Declined,
    /// Fail-closed policy refused an unreviewed command.
    Blocked(String),
    /// Ctrl-C during the advisory wait.
    Interrupted,
}

pub struct SafetyGate<A, D> {
    /// `None` when review is disabled.
    advisor: Option<A>,
    dispatcher: D,
    policy: UnavailablePolicy,
    cwd: CurrentDir,
    interrupts: Interrupts,
}

impl<A: Advisor, D: Dispatcher> SafetyGate<A, D> {
    pub fn new(
        advisor: Option<A>,
        dispatcher: D,
        policy: UnavailablePolicy,
        cwd: CurrentDir,
        interrupts: Interrupts,
    ) -> Self {
        Self {
            advisor,
            dispatcher,
            policy,
            cwd,
            interrupts,
        }
    }

    pub fn cwd(&self) -> &CurrentDir {
        &self.cwd
    }

    pub fn review_enabled(&self) -> bool {
        self.advisor.is_some()
    }

    /// Run one command cycle for an already normalized command.
    pub async fn execute(&mut self, command: &str, confirmer: &mut impl Confirmer) -> CycleOutcome {
        let command = command.trim();
        if command.is_empty() {
            return CycleOutcome::Empty;
        }

        if let Some(builtin) = Builtin::parse(command) {
            return self.run_builtin(builtin);
        }

        let Some(review) = self.review(command).await else {
            info!("review of {:?} interrupted", command);
            return CycleOutcome::Interrupted;
        };

        match gate_command(&review, self.policy) {
            ExecutionDecision::Execute => self.dispatch(command).await,
            ExecutionDecision::RequireConfirmation { reason } => {
                if confirmer.confirm(&reason) {
                    info!("user confirmed warned command {:?}", command);
                    self.dispatch(command).await
                } else {
                    info!("user declined warned command {:?}", command);
                    CycleOutcome::Declined
                }
            }
            ExecutionDecision::Deny { reason } => {
                warn!("blocked {:?}: {}", command, reason);
                CycleOutcome::Blocked(reason)
            }
        }
    }

    fn run_builtin(&mut self, builtin: Builtin<'_>) -> CycleOutcome {
        match builtin {
            Builtin::Exit => CycleOutcome::Exit,
            Builtin::Cd(target) => match change_directory(&mut self.cwd, target) {
                Ok(path) => {
                    debug!("cd -> {}", path.display());
                    CycleOutcome::ChangedDirectory(path)
                }
                Err(e) => {
                    debug!("cd failed: {}", e);
                    CycleOutcome::BuiltinFailed(e)
                }
            },
        }
    }

    /// `None` means the wait was interrupted.
    async fn review(&mut self, command: &str) -> Option<Review> {
        let Some(advisor) = self.advisor.as_ref() else {
            debug!("review disabled, skipping");
            return Some(Review::Verdict(Verdict::Safe));
        };

        // A Ctrl-C meant for the previous child may still be queued.
        let stale = self.interrupts.drain().await;
        if stale > 0 {
            debug!(stale, "discarded interrupts from an earlier cycle");
        }

        tokio::select! {
            review = advisor.review(command) => {
                debug!(?review, "review finished");
                Some(review)
            }
            () = self.interrupts.recv() => None,
        }
    }

    async fn dispatch(&mut self, command: &str) -> CycleOutcome {
        match self
            .dispatcher
            .dispatch(command, self.cwd.path(), &mut self.interrupts)
            .await
        {
            Ok(status) => {
                debug!("{:?} exited with {}", command, status);
                CycleOutcome::Executed(status)
            }
            Err(e) => {
                warn!("failed to dispatch {:?}: {}", command, e);
                CycleOutcome::DispatchFailed(e)
            }
        }
    }
}
