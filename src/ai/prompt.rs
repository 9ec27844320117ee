//! Prompt template for the pre-execution review.

/// Fixed instructions sent ahead of every reviewed command.
pub const REVIEW_INSTRUCTIONS: &str = "You are the Command Seer, an expert on Linux commands. \
Analyze the following user command for potential errors, typos, or dangerous operations (like 'rm -rf /'). \
If the command appears safe and correct, your entire response must be ONLY the word 'SAFE'. \
If you see a potential problem, your response must start with 'WARNING:' followed by a very brief, one-sentence explanation. ";

/// Build the review prompt for one normalized command.
pub fn build_review_prompt(command: &str) -> String {
    format!("{REVIEW_INSTRUCTIONS}Command: {command}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_command_verbatim() {
        let prompt = build_review_prompt("rm -rf ~/tmp/* | tee 'log file'");
        assert!(prompt.starts_with("You are the Command Seer"));
        assert!(prompt.ends_with("Command: rm -rf ~/tmp/* | tee 'log file'"));
    }

    #[test]
    fn test_prompt_states_reply_contract() {
        let prompt = build_review_prompt("ls");
        assert!(prompt.contains("ONLY the word 'SAFE'"));
        assert!(prompt.contains("start with 'WARNING:'"));
    }
}
