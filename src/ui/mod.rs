//! Terminal front end of the shell.
//!
//! Line editing, history and completion are delegated to `rustyline`; this
//! module only renders the prompt and wires the editor into the gate's
//! confirmation step.

pub mod editor;
pub mod helper;
pub mod prompt;

pub use editor::{Input, LineEditor};
pub use helper::ShellHelper;
pub use prompt::Prompt;
