use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{ConversationMessage, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    Idle,
    AwaitingResponse,
}

/// Ticket for an accepted user message whose reply is still owed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub message_id: u64,
    pub text: String,
}

/// Message history and turn-taking for one mounted chat.
///
/// Messages are append-only. A user message can only be accepted while idle,
/// and every accepted one is answered by exactly one bot message through
/// [`ConversationSession::complete_turn`].
#[derive(Debug, Clone)]
pub struct ConversationSession {
    messages: Vec<ConversationMessage>,
    state: TurnState,
    next_id: u64,
    quick_replies: Vec<String>,
    quick_replies_withdrawn: bool,
}

impl ConversationSession {
    pub fn new(greeting: impl Into<String>, quick_replies: Vec<String>) -> Self {
        let mut session = Self {
            messages: Vec::new(),
            state: TurnState::Idle,
            next_id: 1,
            quick_replies,
            quick_replies_withdrawn: false,
        };
        session.push(greeting.into(), Sender::Bot);
        session
    }

    fn push(&mut self, text: String, sender: Sender) -> &ConversationMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ConversationMessage {
            id,
            text,
            sender,
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.state == TurnState::AwaitingResponse
    }

    /// Prompts offered as one-tap input. Empty once anything has been sent.
    pub fn quick_replies(&self) -> &[String] {
        if self.quick_replies_withdrawn || self.messages.len() != 1 {
            &[]
        } else {
            &self.quick_replies
        }
    }

    pub fn quick_reply(&self, index: usize) -> Option<&str> {
        self.quick_replies().get(index).map(String::as_str)
    }

    /// Accepts a user message and moves to `AwaitingResponse`.
    ///
    /// Blank text and submissions while a reply is pending are ignored.
    pub fn begin_turn(&mut self, text: &str) -> Option<PendingTurn> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring blank submission");
            return None;
        }
        if self.is_awaiting_response() {
            debug!("ignoring submission while a reply is pending");
            return None;
        }

        self.quick_replies_withdrawn = true;
        self.state = TurnState::AwaitingResponse;
        let message_id = self.push(text.to_string(), Sender::User).id;
        debug!(message_id, "user message accepted");

        Some(PendingTurn {
            message_id,
            text: text.to_string(),
        })
    }

    /// Appends the bot reply for the pending turn and returns to `Idle`.
    /// Does nothing when no turn is pending.
    pub fn complete_turn(&mut self, reply: impl Into<String>) -> Option<&ConversationMessage> {
        if !self.is_awaiting_response() {
            return None;
        }

        self.state = TurnState::Idle;
        let message = self.push(reply.into(), Sender::Bot);
        debug!(message_id = message.id, "bot reply appended");
        Some(message)
    }
}
