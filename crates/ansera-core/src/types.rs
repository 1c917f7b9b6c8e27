// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Ansera workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::consts::UNMATCHED_ANSWER;
use crate::error::AnseraError;

/// Message payload kind. Only text flows through the answer pipeline today.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Text,
}

/// Sender classification carried on every chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SenderKind {
    System,
    Robot,
    Agent,
    Visitor,
}

/// Conversation thread linkage: the routing topic and the thread's uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadInfo {
    pub uid: String,
    pub topic: String,
}

/// Identity of the party a message is attributed to (visitor, robot, agent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub uid: String,
    pub nickname: String,
}

/// A chat message on the wire: the inbound visitor query and the outbound
/// robot answer share this shape.
///
/// Created once per answer; immutable after dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message id, also used as the SSE event id.
    pub uid: String,
    pub kind: MessageKind,
    pub content: String,
    pub sender: SenderKind,
    pub thread: ThreadInfo,
    pub actor: Actor,
    pub org_uid: String,
    /// RFC3339 creation timestamp.
    pub created_at: String,
}

impl ChatMessage {
    /// Serializes the message to its wire form.
    pub fn to_json(&self) -> Result<String, AnseraError> {
        serde_json::to_string(self).map_err(|e| AnseraError::Internal(format!(
            "failed to serialize message {}: {e}",
            self.uid
        )))
    }
}

/// Robot/agent answering configuration. Read-only during answering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Whether the language-model path is enabled at all.
    pub llm_enabled: bool,
    /// Attached knowledge base, if any.
    pub kb_uid: Option<String>,
    /// Whether the attached knowledge base may be searched.
    pub kb_enabled: bool,
    /// System prompt template for the generation path.
    pub system_prompt: String,
}

impl RobotConfig {
    /// True when a knowledge base is both attached and enabled.
    pub fn kb_active(&self) -> bool {
        self.kb_enabled && self.kb_uid.as_deref().is_some_and(|uid| !uid.is_empty())
    }
}

/// Denormalized audit record written once per answered query.
///
/// Distinct from the delivered chat message; used offline to measure answer
/// coverage. Keyed by the reply message's uid, append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotMessageRecord {
    /// Equals the reply message uid so consumers can de-duplicate.
    pub uid: String,
    pub kind: MessageKind,
    pub topic: String,
    pub thread_uid: String,
    /// The visitor's question.
    pub content: String,
    /// The delivered answer.
    pub answer: String,
    /// The asking party.
    pub user: Actor,
    /// The answering robot.
    pub robot: Actor,
    /// True iff `answer` equals the sentinel literal.
    pub unanswered: bool,
    pub org_uid: String,
}

impl RobotMessageRecord {
    /// Derives the audit record from the query/reply pair.
    pub fn derive(query: &ChatMessage, reply: &ChatMessage) -> Self {
        Self {
            uid: reply.uid.clone(),
            kind: query.kind,
            topic: query.thread.topic.clone(),
            thread_uid: query.thread.uid.clone(),
            content: query.content.clone(),
            answer: reply.content.clone(),
            user: query.actor.clone(),
            robot: reply.actor.clone(),
            unanswered: reply.content == UNMATCHED_ANSWER,
            org_uid: query.org_uid.clone(),
        }
    }
}

/// Role of a prompt message sent to a completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// One message in the prompt sequence handed to a completion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}
