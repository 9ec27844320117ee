//! Interactive confirmation for commands the advisory model warned about.

/// Presents a warning and asks whether to run the command anyway.
pub trait Confirmer {
    /// Show `explanation` on the error stream and read a yes/no answer.
    /// Anything that is not an explicit yes, including a read failure, is a
    /// decline.
    fn confirm(&mut self, explanation: &str) -> bool;
}

/// Only a lone `y`, in either case, counts as consent.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
