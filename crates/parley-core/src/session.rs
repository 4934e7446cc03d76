//! Conversation session state.
//!
//! A [`Session`] owns the conversation id, the append-only transcript and two
//! independent flags: `awaiting_reply` and `last_error`. The mutation methods
//! on `Session` are the only way to change them, which keeps the state machine
//! in one place:
//!
//! - `awaiting_reply` goes up only in [`Session::append_user_message`] and comes
//!   down only in [`Session::append_bot_message`] or [`Session::record_failure`].
//! - `last_error` is set only by `record_failure` and cleared by any new attempt,
//!   any bot reply, or a reset.
//!
//! [`SessionManager`] mints new sessions from an injected [`IdSource`].

use crate::core_types::{Message, Sender, SessionId};
use crate::id_source::{IdSource, RandomIdSource};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    messages: Vec<Message>,
    next_message_id: u64,
    awaiting_reply: bool,
    last_error: Option<String>,
}

impl Session {
    fn seeded(id: SessionId, greeting: &str) -> Self {
        let mut session = Self {
            id,
            messages: Vec::new(),
            next_message_id: 1,
            awaiting_reply: false,
            last_error: None,
        };
        session.push(Sender::Bot, greeting);
        session
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Appends a user message and marks the session as waiting for a reply.
    ///
    /// Returns `None` without touching the session when `text` is blank or a
    /// reply is already pending, so at most one request is ever in flight.
    pub fn append_user_message(&mut self, text: &str) -> Option<Message> {
        if text.trim().is_empty() {
            log::debug!("Ignoring blank user message for session {}", self.id);
            return None;
        }
        if self.awaiting_reply {
            log::debug!(
                "Session {} is already awaiting a reply; dropping user message",
                self.id
            );
            return None;
        }

        let message = self.push(Sender::User, text);
        self.awaiting_reply = true;
        self.last_error = None;
        Some(message)
    }

    pub fn append_bot_message(&mut self, text: &str) -> Message {
        let message = self.push(Sender::Bot, text);
        self.awaiting_reply = false;
        self.last_error = None;
        message
    }

    /// Failed attempts leave no trace in the transcript, only in `last_error`.
    pub fn record_failure(&mut self, error_message: &str) {
        log::warn!("Session {} send failed: {}", self.id, error_message);
        self.last_error = Some(error_message.to_string());
        self.awaiting_reply = false;
    }

    fn push(&mut self, sender: Sender, text: &str) -> Message {
        let message = Message::new(self.next_message_id, sender, text);
        self.next_message_id += 1;
        self.messages.push(message.clone());
        message
    }
}

/// Creates and resets sessions.
#[derive(Clone)]
pub struct SessionManager {
    id_source: Arc<dyn IdSource>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Arc::new(RandomIdSource))
    }
}

impl SessionManager {
    pub fn new(id_source: Arc<dyn IdSource>) -> Self {
        Self { id_source }
    }

    /// New session whose history holds exactly one bot greeting.
    pub fn create_session(&self, greeting: &str) -> Session {
        let session = Session::seeded(self.id_source.next_id(), greeting);
        log::info!("Created chat session {}", session.id);
        session
    }

    /// Replaces `session` with a fresh one and returns the previous state.
    pub fn reset_session(&self, session: &mut Session, greeting: &str) -> Session {
        let fresh = self.create_session(greeting);
        log::info!("Session {} reset to {}", session.id, fresh.id);
        std::mem::replace(session, fresh)
    }
}
