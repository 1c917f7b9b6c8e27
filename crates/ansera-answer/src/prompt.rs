// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grounded prompt composition.
//!
//! Prompt text is a pure function of its inputs: same system prompt, query,
//! history, and context always produce byte-identical output. Section order
//! and labels are fixed so prompt-sensitive regressions show up as plain
//! string diffs in tests.

use ansera_core::PromptMessage;

/// Upper bound on retrieved-context characters included in a prompt.
///
/// Providers enforce their own token limits; this cap keeps prompt size
/// predictable before the request ever leaves the process. Context beyond the
/// budget is dropped from the tail, keeping the highest-ranked snippets.
pub const MAX_CONTEXT_CHARS: usize = 16 * 1024;

/// Separator between snippets when retrieval results are joined, both inside
/// prompts and on the direct-search answer path.
pub const SNIPPET_SEPARATOR: &str = "\n";

/// Joins retrieved snippets into one context block.
pub fn join_context(context: &[String]) -> String {
    context.join(SNIPPET_SEPARATOR)
}

/// Composes the grounded user prompt for a knowledge-base-backed answer.
///
/// Layout, in fixed order: the system prompt template, the visitor query, the
/// chat history, and the retrieved context under literal section labels. The
/// context block is capped at [`MAX_CONTEXT_CHARS`].
pub fn build_kb_prompt(system_prompt: &str, query: &str, history: &str, context: &str) -> String {
    format!(
        "{system_prompt}\n\nUser query: {query}\n\nChat history: {history}\n\nSearch results: {}",
        truncate_context(context)
    )
}

/// Converts a (system, user) prompt pair into the provider message sequence.
pub fn to_prompt_messages(system_prompt: &str, user_prompt: &str) -> Vec<PromptMessage> {
    vec![
        PromptMessage::system(system_prompt),
        PromptMessage::user(user_prompt),
    ]
}

fn truncate_context(context: &str) -> &str {
    if context.chars().count() <= MAX_CONTEXT_CHARS {
        return context;
    }
    let end = context
        .char_indices()
        .nth(MAX_CONTEXT_CHARS)
        .map_or(context.len(), |(i, _)| i);
    &context[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansera_core::PromptRole;

    #[test]
    fn prompt_contains_all_sections_in_order() {
        let prompt = build_kb_prompt(
            "You are a support robot.",
            "refund policy",
            "visitor: hello",
            "Refunds within 30 days",
        );

        let system = prompt.find("You are a support robot.").unwrap();
        let query = prompt.find("User query: refund policy").unwrap();
        let history = prompt.find("Chat history: visitor: hello").unwrap();
        let results = prompt.find("Search results: Refunds within 30 days").unwrap();
        assert!(system < query && query < history && history < results);
    }

    #[test]
    fn prompt_is_deterministic() {
        let build = || build_kb_prompt("sys", "q", "h", "ctx");
        assert_eq!(build(), build());
    }

    #[test]
    fn oversized_context_is_tail_truncated() {
        let context = "x".repeat(MAX_CONTEXT_CHARS + 100);
        let prompt = build_kb_prompt("sys", "q", "", &context);
        let kept = prompt.split("Search results: ").nth(1).unwrap();
        assert_eq!(kept.chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // Multi-byte chars must not be split mid-encoding.
        let context = "é".repeat(MAX_CONTEXT_CHARS + 10);
        let prompt = build_kb_prompt("sys", "q", "", &context);
        let kept = prompt.split("Search results: ").nth(1).unwrap();
        assert_eq!(kept.chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn context_at_the_budget_is_kept_verbatim() {
        let context = "x".repeat(MAX_CONTEXT_CHARS);
        let prompt = build_kb_prompt("sys", "q", "", &context);
        assert!(prompt.ends_with(&context));
    }

    #[test]
    fn join_context_uses_the_snippet_separator() {
        let joined = join_context(&["a".to_string(), "b".to_string()]);
        assert_eq!(joined, "a\nb");
        assert_eq!(join_context(&[]), "");
    }

    #[test]
    fn provider_sequence_is_system_then_user() {
        let messages = to_prompt_messages("sys", "user");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, PromptRole::System);
        assert_eq!(messages[0].content, "sys");
        assert_eq!(messages[1].role, PromptRole::User);
        assert_eq!(messages[1].content, "user");
    }
}
