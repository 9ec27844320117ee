//! Session state carried between command cycles.
//!
//! Apart from the alias table, the working directory is the only state a
//! command cycle leaves behind for the next one.

mod cwd;

pub use cwd::CurrentDir;
