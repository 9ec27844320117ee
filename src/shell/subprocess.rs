//! Handing approved commands to the system interpreter.
//!
//! The command is passed as a single line to `sh -c`, so pipes, redirection
//! and globs behave exactly as typed. Standard streams are inherited, which
//! keeps editors and pagers working.

use std::future::Future;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::debug;

use super::signal::Interrupts;

/// Interpreter used when the config does not name one.
pub const DEFAULT_INTERPRETER: &str = "/bin/sh";

/// Runs a normalized command line to completion.
pub trait Dispatcher {
    fn dispatch(
        &mut self,
        command: &str,
        cwd: &Path,
        interrupts: &mut Interrupts,
    ) -> impl Future<Output = io::Result<ExitStatus>>;
}

/// Spawns `<interpreter> -c <command>` with inherited stdio.
#[derive(Clone, Debug)]
pub struct ShellDispatcher {
    interpreter: String,
}

impl Default for ShellDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER)
    }
}

impl ShellDispatcher {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl Dispatcher for ShellDispatcher {
    async fn dispatch(
        &mut self,
        command: &str,
        cwd: &Path,
        interrupts: &mut Interrupts,
    ) -> io::Result<ExitStatus> {
        let mut child = Command::new(&self.interpreter)
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        // The terminal already delivers Ctrl-C to the child since it shares
        // our process group. Swallow our copy and keep waiting.
        loop {
            tokio::select! {
                status = child.wait() => return status,
                () = interrupts.recv() => debug!("interrupt while child running"),
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exit_status_is_surfaced() {
        let mut dispatcher = ShellDispatcher::default();
        let mut interrupts = Interrupts::disabled();
        let cwd = std::env::temp_dir();

        let ok = dispatcher.dispatch("true", &cwd, &mut interrupts).await.unwrap();
        assert!(ok.success());

        let failed = dispatcher.dispatch("exit 3", &cwd, &mut interrupts).await.unwrap();
        assert_eq!(failed.code(), Some(3));
    }

    #[tokio::test]
    async fn test_runs_in_tracked_directory_with_shell_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let mut dispatcher = ShellDispatcher::default();
        let mut interrupts = Interrupts::disabled();

        let status = dispatcher
            .dispatch("echo one | tr a-z A-Z > out.txt", dir.path(), &mut interrupts)
            .await
            .unwrap();
        assert!(status.success());

        let written = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
        assert_eq!(written.trim(), "ONE");
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_an_error() {
        let mut dispatcher = ShellDispatcher::new("/nonexistent/kaelic-interpreter");
        let mut interrupts = Interrupts::disabled();

        let result = dispatcher
            .dispatch("true", &std::env::temp_dir(), &mut interrupts)
            .await;
        assert!(result.is_err());
    }
}
