//! Ctrl-C handling for the command cycle.
//!
//! Installing the listener replaces the default SIGINT disposition, so an
//! interrupt no longer kills the shell. The cycle selects on `recv` to
//! abandon an advisory wait, or to ignore the interrupt while a child that
//! received the same signal winds down.
//!
//! Interrupts are buffered until received. The cycle calls `drain` before a
//! review so that a Ctrl-C aimed at an earlier child cannot cancel it.

use std::io;
use std::time::Duration;

use tokio::sync::mpsc;

pub struct Interrupts {
    source: Source,
}

enum Source {
    #[cfg(unix)]
    Signal(tokio::signal::unix::Signal),
    #[cfg(not(unix))]
    CtrlC,
    Channel(mpsc::UnboundedReceiver<()>),
    Disabled,
}

impl Interrupts {
    /// Start listening for SIGINT.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        let inner = signal(SignalKind::interrupt())?;
        Ok(Self {
            source: Source::Signal(inner),
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self { source: Source::CtrlC })
    }

    /// A source that never fires. Used when no signal handler is wanted.
    pub fn disabled() -> Self {
        Self {
            source: Source::Disabled,
        }
    }

    /// A source fed by hand: every `()` sent counts as one Ctrl-C.
    pub fn channel() -> (mpsc::UnboundedSender<()>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { source: Source::Channel(rx) })
    }

    /// Resolve on the next interrupt.
    pub async fn recv(&mut self) {
        let delivered = match &mut self.source {
            #[cfg(unix)]
            Source::Signal(signal) => signal.recv().await.is_some(),
            #[cfg(not(unix))]
            Source::CtrlC => tokio::signal::ctrl_c().await.is_ok(),
            Source::Channel(rx) => rx.recv().await.is_some(),
            Source::Disabled => false,
        };
        if !delivered {
            std::future::pending::<()>().await;
        }
    }

    /// Discard interrupts that are already pending. Returns how many.
    pub async fn drain(&mut self) -> usize {
        // Let the signal driver publish anything it has read.
        tokio::task::yield_now().await;

        let mut drained = 0;
        while tokio::time::timeout(Duration::ZERO, self.recv()).await.is_ok() {
            drained += 1;
        }
        drained
    }
}

impl std::fmt::Debug for Interrupts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interrupts").finish_non_exhaustive()
    }
}
