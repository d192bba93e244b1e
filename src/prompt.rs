//! Prompt construction for the command-interpretation query.

/// Instruction preamble that constrains the model to the three allowed replies.
const COMMAND_PROMPT: &str = "You are a precise command interpreter for a digital actuator. \
When given an input, respond with EXACTLY one of these commands: \
'turn on', 'turn off', or 'no command'. \
Do not include any extra words, punctuation, or explanations.";

/// Builds the fully constrained prompt for a single question.
///
/// The question is appended verbatim. No escaping happens here: the outbound
/// payload is serialized structurally, so quotes or backslashes in the
/// question cannot corrupt the request body.
pub fn build_prompt(question: &str) -> String {
    format!("{} Input: {}", COMMAND_PROMPT, question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_preamble_and_ends_with_question() {
        let question = "is anyone home?";
        let prompt = build_prompt(question);
        assert!(prompt.starts_with(COMMAND_PROMPT));
        assert!(prompt.ends_with(question));
    }

    #[test]
    fn test_prompt_accepts_empty_question() {
        let prompt = build_prompt("");
        assert!(prompt.starts_with(COMMAND_PROMPT));
        assert!(prompt.ends_with("Input: "));
    }

    #[test]
    fn test_prompt_keeps_question_verbatim() {
        let question = r#"say "turn on" \ now"#;
        assert!(build_prompt(question).ends_with(question));
    }
}
