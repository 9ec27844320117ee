//! kaelic-shell - an interactive shell with an AI safety review in front of
//! every command
//!
//! This library provides the core functionality for kaelic-shell, including:
//! - Alias expansion of the typed line into the command that will run
//! - The advisory client that asks a local model for a `SAFE`/`WARNING:` verdict
//! - The safety gate that turns the verdict into run, confirm or decline
//! - Process dispatch through `sh -c` and the `cd`/`exit` built-ins
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use kaelic_shell::ai::{AdvisoryClient, Advisor};
//! use kaelic_shell::shell::AliasTable;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let aliases = AliasTable::with_defaults();
//!     let command = aliases.normalize("update now");
//!     assert_eq!(command, "paru now");
//!
//!     let advisor = AdvisoryClient::new(
//!         "http://localhost:11434/api/generate",
//!         "phi3:mini",
//!         Duration::from_secs(3),
//!     )?;
//!
//!     // Never fails: an unreachable service yields `Review::Unavailable`.
//!     let review = advisor.review(&command).await;
//!     println!("{review:?}");
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod app;
pub mod cli;
pub mod config;
pub mod context;
pub mod security;
pub mod shell;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use app::App;
pub use config::Config;
pub use security::{CycleOutcome, Review, SafetyGate, Verdict};
pub use shell::AliasTable;
