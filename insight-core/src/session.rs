// insight-core/src/session.rs
//
// Chat session state.
//
// A session is the ordered list of user/assistant messages plus the session
// id the relay forwards to the agent. A "turn" is one user message and the
// assistant reply (or substitute error message) that follows it.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::{debug, info};
use uuid::Uuid;

use crate::blocks::{Block, segment};

/// Prompts offered while the conversation is still empty.
pub const SUGGESTED_TAGS: [&str; 5] = [
    "Get Started",
    "Common Questions",
    "Best Practices",
    "Recommendations",
    "Help",
];

const SESSION_SUFFIX_LEN: usize = 7;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Per-session message id, monotonically increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    /// Segmented reply content. User messages are shown verbatim, so they
    /// yield no blocks.
    pub fn blocks(&self) -> Vec<Block> {
        match self.role {
            Role::Assistant => segment(&self.content),
            Role::User => Vec::new(),
        }
    }
}

/// One prior message as the agent sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

/// Everything the relay needs for one turn, captured when the user sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub message: String,
    /// Conversation before this message.
    pub history: Vec<HistoryEntry>,
    pub session_id: String,
}

#[derive(Debug)]
pub struct ChatSession {
    session_id: String,
    messages: Vec<ChatMessage>,
    next_id: u64,
    waiting: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            session_id: generate_session_id(),
            messages: Vec::with_capacity(32),
            next_id: 1,
            waiting: false,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True between `begin_turn` and `complete_turn`.
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .map(|m| HistoryEntry {
                role: m.role,
                content: m.content.clone(),
            })
            .collect()
    }

    /// Record a user message and hand back what the relay should send.
    ///
    /// Blank input, or input while a turn is already in flight, is ignored.
    pub fn begin_turn(&mut self, input: &str) -> Option<PendingTurn> {
        if input.trim().is_empty() || self.waiting {
            return None;
        }

        let history = self.history();
        self.push(Role::User, input.to_string());
        self.waiting = true;

        debug!(
            "Turn started: session={} history={}",
            self.session_id,
            history.len()
        );

        Some(PendingTurn {
            message: input.to_string(),
            history,
            session_id: self.session_id.clone(),
        })
    }

    /// Append the agent's reply, or the substitute message for a failed
    /// relay call.
    pub fn complete_turn<E: Display>(&mut self, result: Result<String, E>) -> &ChatMessage {
        let content = match result {
            Ok(output) => output,
            Err(e) => format!("I encountered an error: {}. Please try again.", e),
        };
        self.waiting = false;
        self.push(Role::Assistant, content)
    }

    /// Start over with a fresh session id and no messages.
    pub fn reset(&mut self) {
        let old = std::mem::replace(&mut self.session_id, generate_session_id());
        self.messages.clear();
        self.next_id = 1;
        self.waiting = false;
        info!("Session reset: {} -> {}", old, self.session_id);
    }

    fn push(&mut self, role: Role, content: String) -> &ChatMessage {
        let id = MessageId(self.next_id);
        self.next_id += 1;

        self.messages.push(ChatMessage {
            id,
            role,
            content,
            timestamp: Local::now(),
        });
        &self.messages[self.messages.len() - 1]
    }
}

/// `session_<unix millis>_<7 base-36 chars>`.
pub fn generate_session_id() -> String {
    let millis = Local::now().timestamp_millis();
    let suffix = base36(Uuid::new_v4().as_u128(), SESSION_SUFFIX_LEN);
    format!("session_{}_{}", millis, suffix)
}

fn base36(mut n: u128, len: usize) -> String {
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        out.push(BASE36_DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    out
}
