// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer routing policy.
//!
//! Replaces the nested llm-enabled / kb-attached / context-empty conditionals
//! with an explicit decision table. Each branch is named and independently
//! testable; callers match on the decision and never re-derive the routing
//! logic.

use tracing::debug;

use ansera_core::{AnseraError, RobotConfig, SearchProvider};

/// The routing outcome for one visitor query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerDecision {
    /// No usable content exists for this query: deliver the sentinel.
    Unmatched,
    /// Language model disabled but search produced snippets: the joined
    /// snippets are the answer, no generation happens.
    DirectSearch { context: Vec<String> },
    /// Language model and knowledge base both active and search produced
    /// snippets: build a grounded prompt and generate.
    Grounded { context: Vec<String> },
    /// Language model active with no knowledge base attached: generate from
    /// the configured system prompt alone.
    Ungrounded,
}

/// Decides how to answer `query` under `config`.
///
/// The knowledge base is consulted at most once, and only when it is both
/// attached and enabled. An empty retrieval result short-circuits to
/// [`AnswerDecision::Unmatched`] so the generation provider is never invoked
/// for queries with no grounding content.
///
/// # Errors
///
/// Returns [`AnseraError::InvalidInput`] for a blank query before any I/O,
/// and propagates search-provider failures.
pub async fn decide(
    query: &str,
    config: &RobotConfig,
    search: &dyn SearchProvider,
) -> Result<AnswerDecision, AnseraError> {
    if query.trim().is_empty() {
        return Err(AnseraError::InvalidInput(
            "query must not be empty".to_string(),
        ));
    }

    if !config.kb_active() {
        let decision = if config.llm_enabled {
            AnswerDecision::Ungrounded
        } else {
            AnswerDecision::Unmatched
        };
        debug!(llm_enabled = config.llm_enabled, ?decision, "no knowledge base");
        return Ok(decision);
    }

    // kb_active() guarantees a non-empty uid.
    let kb_uid = config.kb_uid.as_deref().unwrap_or_default();
    let context = search.search_text(query, kb_uid).await?;
    debug!(kb_uid, snippets = context.len(), "knowledge base searched");

    if context.is_empty() {
        return Ok(AnswerDecision::Unmatched);
    }

    if config.llm_enabled {
        Ok(AnswerDecision::Grounded { context })
    } else {
        Ok(AnswerDecision::DirectSearch { context })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansera_core::DEFAULT_SYSTEM_PROMPT;
    use ansera_test_utils::MockSearch;

    fn config(llm_enabled: bool, kb_uid: Option<&str>, kb_enabled: bool) -> RobotConfig {
        RobotConfig {
            llm_enabled,
            kb_uid: kb_uid.map(str::to_string),
            kb_enabled,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    #[tokio::test]
    async fn blank_query_is_rejected_before_any_search() {
        let search = MockSearch::new();
        let err = decide("   ", &config(true, Some("kb-1"), true), &search)
            .await
            .unwrap_err();
        assert!(matches!(err, AnseraError::InvalidInput(_)));
        assert_eq!(search.calls(), 0);
    }

    #[tokio::test]
    async fn empty_retrieval_short_circuits_to_unmatched() {
        let search = MockSearch::new();
        let decision = decide("asdkfj", &config(true, Some("kb-1"), true), &search)
            .await
            .unwrap();
        assert_eq!(decision, AnswerDecision::Unmatched);
        assert_eq!(search.calls(), 1);
    }

    #[tokio::test]
    async fn grounded_generation_when_llm_and_kb_both_active() {
        let search = MockSearch::with_results(vec![vec!["Refunds within 30 days".into()]]);
        let decision = decide("refund policy", &config(true, Some("kb-1"), true), &search)
            .await
            .unwrap();
        assert_eq!(
            decision,
            AnswerDecision::Grounded {
                context: vec!["Refunds within 30 days".to_string()],
            }
        );
        assert_eq!(
            search.last_query().await,
            Some(("refund policy".to_string(), "kb-1".to_string()))
        );
    }

    #[tokio::test]
    async fn llm_disabled_returns_snippets_directly() {
        let search = MockSearch::with_results(vec![vec!["a".into(), "b".into()]]);
        let decision = decide("q", &config(false, Some("kb-1"), true), &search)
            .await
            .unwrap();
        assert_eq!(
            decision,
            AnswerDecision::DirectSearch {
                context: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn llm_disabled_without_kb_is_unmatched_without_search() {
        let search = MockSearch::with_results(vec![vec!["unused".into()]]);
        let decision = decide("q", &config(false, None, false), &search)
            .await
            .unwrap();
        assert_eq!(decision, AnswerDecision::Unmatched);
        assert_eq!(search.calls(), 0);
    }

    #[tokio::test]
    async fn llm_enabled_without_kb_is_ungrounded_without_search() {
        let search = MockSearch::with_results(vec![vec!["unused".into()]]);
        let decision = decide("q", &config(true, None, false), &search)
            .await
            .unwrap();
        assert_eq!(decision, AnswerDecision::Ungrounded);
        assert_eq!(search.calls(), 0);
    }

    #[tokio::test]
    async fn disabled_kb_is_treated_as_unattached() {
        let search = MockSearch::with_results(vec![vec!["unused".into()]]);
        let decision = decide("q", &config(true, Some("kb-1"), false), &search)
            .await
            .unwrap();
        assert_eq!(decision, AnswerDecision::Ungrounded);
        assert_eq!(search.calls(), 0);
    }

    #[tokio::test]
    async fn search_failures_propagate() {
        // An exhausted MockSearch never errors, so use a one-off failing impl.
        struct FailingSearch;

        #[async_trait::async_trait]
        impl SearchProvider for FailingSearch {
            async fn search_text(
                &self,
                _query: &str,
                _kb_uid: &str,
            ) -> Result<Vec<String>, AnseraError> {
                Err(AnseraError::Search {
                    message: "index unavailable".to_string(),
                    source: None,
                })
            }
        }

        let err = decide("q", &config(true, Some("kb-1"), true), &FailingSearch)
            .await
            .unwrap_err();
        assert!(matches!(err, AnseraError::Search { .. }));
    }
}
