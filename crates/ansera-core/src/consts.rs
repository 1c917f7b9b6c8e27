// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared pipeline constants.
//!
//! The sentinel is a stable, externally-observable literal: the recorder
//! computes the `unanswered` flag by comparing against it, and downstream
//! consumers may match on it as well. Change it and every coverage report
//! built on robot-message records changes meaning.

/// The reserved answer emitted when no matching content exists for a query.
pub const UNMATCHED_ANSWER: &str = "No matching answer was found";

/// Default system prompt for the customer-service robot when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"Role: senior customer-service expert.
Task: answer the visitor's question helpfully, thoroughly, and politely, using only the provided context.
Rules:
1. Answer from the search results and chat history only; do not invent content.
2. De-escalate and reassure the customer where appropriate.
3. If the context is incomplete and the question cannot be answered from it, reply exactly: "No matching answer was found". Do not guess."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt_embeds_the_sentinel() {
        // The model is instructed to emit the exact sentinel, so the literal
        // inside the prompt must stay in sync with UNMATCHED_ANSWER.
        assert!(DEFAULT_SYSTEM_PROMPT.contains(UNMATCHED_ANSWER));
    }
}
