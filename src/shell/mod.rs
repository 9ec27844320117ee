//! Shell-side plumbing: alias expansion, built-ins, signals and process
//! dispatch.

pub mod alias;
pub mod builtin;
pub mod signal;
mod subprocess;

pub use alias::AliasTable;
pub use builtin::{change_directory, Builtin, BuiltinError};
pub use signal::Interrupts;
pub use subprocess::{Dispatcher, ShellDispatcher, DEFAULT_INTERPRETER};
