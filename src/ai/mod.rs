//! AI module for the pre-execution safety review.
//!
//! This module talks to the local advisory model, builds the review prompt
//! and decodes the model's reply into a verdict.

pub mod client;
pub mod parser;
pub mod prompt;

pub use client::{AdvisoryClient, Advisor};
pub use parser::decode_verdict;
