//! Decoding the advisory model's reply.
//!
//! The contract with the model is two literal shapes: the single word
//! `SAFE`, or `WARNING:` followed by a short reason. Everything that matches
//! neither is left for the caller to treat as "no verdict".

use crate::security::Verdict;

const SAFE_TOKEN: &str = "SAFE";
const WARNING_PREFIX: &str = "WARNING:";

/// Decode a raw reply into a verdict, or `None` when it has neither shape.
pub fn decode_verdict(reply: &str) -> Option<Verdict> {
    let reply = reply.trim();

    if reply == SAFE_TOKEN {
        return Some(Verdict::Safe);
    }

    reply
        .strip_prefix(WARNING_PREFIX)
        .map(|reason| Verdict::Warning(reason.trim().to_string()))
}
