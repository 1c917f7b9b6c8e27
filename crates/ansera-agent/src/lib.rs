// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer engine for the Ansera pipeline.
//!
//! The [`AnswerEngine`] runs one visitor query end to end: route it through
//! the answer policy, generate or fall back, deliver the reply over the live
//! channel, and record it against the durable queues. One logical task per
//! query; channels are never shared between concurrent answers.

use std::sync::Arc;

use tracing::{info, warn};

use ansera_answer::policy::{self, AnswerDecision};
use ansera_answer::prompt;
use ansera_answer::recorder::PersistenceRecorder;
use ansera_core::{
    Actor, AnseraError, ChatMessage, CompletionProvider, MessageKind, MessageSink,
    PromptMessage, RobotConfig, RobotRecordSink, SearchProvider, SenderKind, StreamChannel,
    UidGenerator, UNMATCHED_ANSWER,
};
use ansera_stream::dispatcher;

/// Orchestrates the query-to-answer pipeline against pluggable collaborators.
pub struct AnswerEngine {
    search: Arc<dyn SearchProvider>,
    provider: Arc<dyn CompletionProvider>,
    uids: Arc<dyn UidGenerator>,
    recorder: PersistenceRecorder<Arc<dyn MessageSink>, Arc<dyn RobotRecordSink>>,
    /// Identity stamped on every outbound reply.
    robot: Actor,
}

impl AnswerEngine {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        provider: Arc<dyn CompletionProvider>,
        uids: Arc<dyn UidGenerator>,
        persist_sink: Arc<dyn MessageSink>,
        record_sink: Arc<dyn RobotRecordSink>,
        robot: Actor,
    ) -> Self {
        Self {
            search,
            provider,
            uids,
            recorder: PersistenceRecorder::new(persist_sink, record_sink),
            robot,
        }
    }

    /// Answers one visitor query over `channel`.
    ///
    /// The sequence is validate, decide, generate where the decision calls
    /// for it, dispatch, record. Dropping the returned future before dispatch
    /// emits nothing and records nothing. Retrieval and generation failures
    /// terminate the channel and propagate; they are not retried inline.
    ///
    /// # Errors
    ///
    /// [`AnseraError::InvalidInput`] for a blank query (the channel is left
    /// untouched); otherwise whatever the search provider, completion
    /// provider, or channel transport surfaced.
    pub async fn answer(
        &self,
        query: &ChatMessage,
        history: &str,
        config: &RobotConfig,
        channel: &mut dyn StreamChannel,
    ) -> Result<(), AnseraError> {
        let decision = match policy::decide(&query.content, config, self.search.as_ref()).await
        {
            Ok(decision) => decision,
            Err(e @ AnseraError::InvalidInput(_)) => return Err(e),
            Err(e) => {
                warn!(query_uid = %query.uid, error = %e, "retrieval failed");
                channel.fail(&e).await;
                return Err(e);
            }
        };

        let content = match decision {
            AnswerDecision::Unmatched => UNMATCHED_ANSWER.to_string(),
            AnswerDecision::DirectSearch { context } => prompt::join_context(&context),
            AnswerDecision::Grounded { context } => {
                let grounded = prompt::build_kb_prompt(
                    &config.system_prompt,
                    &query.content,
                    history,
                    &prompt::join_context(&context),
                );
                // The grounded prompt becomes the system message; the raw
                // query rides along as the user turn.
                let messages = prompt::to_prompt_messages(&grounded, &query.content);
                self.generate(query, channel, messages).await?
            }
            AnswerDecision::Ungrounded => {
                let messages =
                    prompt::to_prompt_messages(&config.system_prompt, &query.content);
                self.generate(query, channel, messages).await?
            }
        };

        let reply = self.build_reply(query, content);
        dispatcher::dispatch(&reply, channel).await?;
        self.recorder.record(query, &reply).await;

        info!(
            query_uid = %query.uid,
            reply_uid = %reply.uid,
            unanswered = reply.content == UNMATCHED_ANSWER,
            "query answered"
        );
        Ok(())
    }

    async fn generate(
        &self,
        query: &ChatMessage,
        channel: &mut dyn StreamChannel,
        messages: Vec<PromptMessage>,
    ) -> Result<String, AnseraError> {
        match self.provider.complete(&messages).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(query_uid = %query.uid, error = %e, "generation failed");
                channel.fail(&e).await;
                Err(e)
            }
        }
    }

    fn build_reply(&self, query: &ChatMessage, content: String) -> ChatMessage {
        ChatMessage {
            uid: self.uids.get_uid(),
            kind: MessageKind::Text,
            content,
            sender: SenderKind::Robot,
            thread: query.thread.clone(),
            actor: self.robot.clone(),
            org_uid: query.org_uid.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
