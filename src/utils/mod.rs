//! Utility modules for common functionality.
//!
//! Currently this is only the logging setup; log output goes to a file so it
//! never interleaves with the interactive prompt.

pub mod logger;
