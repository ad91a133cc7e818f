// insight-bridge/src/app.rs
//
// Chat application state: one session, one agent backend.
//
// Input lines are parsed into `Command`s; anything that isn't a slash
// command (or is escaped with `//`) is a chat message and runs one relay
// turn.

use insight_core::ChatSession;
use insight_core::session::SUGGESTED_TAGS;
use insight_neural::AgentBackend;
use tracing::{debug, info};

use crate::renderer::render_message;

// ════════════════════════════════════════════════════════════════════
// Commands
// ════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain chat input.
    Send(String),
    /// `/new` — fresh session.
    NewSession,
    /// `/tag N` — send suggested tag N (1-based).
    Tag(usize),
    /// `/tags` — list the suggestions.
    Tags,
    /// `/help`
    Help,
    /// `/quit` or `/exit`
    Quit,
    /// Any other `/word`.
    Unknown(String),
    /// Blank line.
    Empty,
}

impl Command {
    pub fn parse(input: &str) -> Command {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Command::Empty;
        }

        // `//text` sends `/text` as chat.
        if trimmed.starts_with("//") {
            return Command::Send(trimmed[1..].to_string());
        }

        if let Some(rest) = trimmed.strip_prefix('/') {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            return match parts.first().copied() {
                Some("new") => Command::NewSession,
                Some("tags") => Command::Tags,
                Some("help") => Command::Help,
                Some("quit") | Some("exit") => Command::Quit,
                Some("tag") => match parts.get(1).and_then(|n| n.parse::<usize>().ok()) {
                    Some(n) => Command::Tag(n),
                    None => Command::Unknown(trimmed.to_string()),
                },
                _ => Command::Unknown(trimmed.to_string()),
            };
        }

        Command::Send(input.to_string())
    }

    /// Whether handling this command runs a relay turn.
    pub fn relays(&self) -> bool {
        match self {
            Command::Send(_) => true,
            Command::Tag(n) => (1..=SUGGESTED_TAGS.len()).contains(n),
            _ => false,
        }
    }
}

/// What the front end should do after handling a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteResult {
    /// Print these lines.
    Output(Vec<String>),
    /// Nothing to show.
    Ignored,
    /// Leave the loop.
    Quit,
}

// ════════════════════════════════════════════════════════════════════
// ChatApp
// ════════════════════════════════════════════════════════════════════

pub struct ChatApp<B: AgentBackend> {
    session: ChatSession,
    backend: B,
}

impl<B: AgentBackend> ChatApp<B> {
    pub fn new(backend: B) -> Self {
        Self {
            session: ChatSession::new(),
            backend,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Greeting plus the suggestion list, shown while the session is empty.
    pub fn welcome(&self) -> Vec<String> {
        let mut lines = vec![
            "How can I help?".to_string(),
            "Tip: start by asking a question or pick a suggestion with /tag N".to_string(),
        ];
        lines.extend(tag_lines());
        lines
    }

    pub async fn execute(&mut self, input: &str) -> ExecuteResult {
        match Command::parse(input) {
            Command::Empty => ExecuteResult::Ignored,
            Command::Send(message) => self.submit(&message).await,
            Command::Tag(n) => match n.checked_sub(1).and_then(|i| SUGGESTED_TAGS.get(i)) {
                Some(tag) => self.submit(tag).await,
                None => ExecuteResult::Output(vec![format!(
                    "No suggestion #{} (pick 1-{})",
                    n,
                    SUGGESTED_TAGS.len()
                )]),
            },
            Command::Tags => ExecuteResult::Output(tag_lines()),
            Command::NewSession => {
                self.session.reset();
                let mut lines = vec![format!("New session: {}", self.session.session_id())];
                lines.extend(self.welcome());
                ExecuteResult::Output(lines)
            }
            Command::Help => ExecuteResult::Output(help_lines()),
            Command::Quit => ExecuteResult::Quit,
            Command::Unknown(cmd) => {
                let mut lines = vec![format!("Unknown command: {}", cmd)];
                lines.extend(help_lines());
                ExecuteResult::Output(lines)
            }
        }
    }

    /// Run one turn: record the message, relay it, record and render the
    /// reply (or the substitute error message).
    pub async fn submit(&mut self, message: &str) -> ExecuteResult {
        let Some(turn) = self.session.begin_turn(message) else {
            return ExecuteResult::Ignored;
        };

        debug!("Submitting turn with {} prior messages", turn.history.len());
        let result = self
            .backend
            .send_message(&turn.message, &turn.history, Some(turn.session_id.as_str()))
            .await;
        if result.is_ok() {
            info!("Agent replied (session {})", turn.session_id);
        }

        let reply = self.session.complete_turn(result);
        ExecuteResult::Output(render_message(reply))
    }
}

fn tag_lines() -> Vec<String> {
    SUGGESTED_TAGS
        .iter()
        .enumerate()
        .map(|(i, tag)| format!("  [{}] {}", i + 1, tag))
        .collect()
}

fn help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  /new      start a new session".to_string(),
        "  /tag N    send suggestion N".to_string(),
        "  /tags     list suggestions".to_string(),
        "  /quit     exit".to_string(),
        "  //text    send a message starting with /".to_string(),
    ]
}
