//! The send-action boundary between the presentation layer and the webhook.
//!
//! A round trip is split in two synchronous halves around the network call:
//! [`Conversation::begin_send`] does the single-flight check-and-set and
//! captures the session id, [`Conversation::complete_send`] records the reply
//! or the failure. Between the two the caller may await anything, including a
//! reset; a reply whose captured id no longer matches the live session is
//! dropped so it can never leak into the new conversation.

use crate::config::ChatConfig;
use crate::core_types::{AuthResponse, ChatRequest, Message, SessionId, User};
use crate::errors::ChatError;
use crate::normalizer::ResponseNormalizer;
use crate::session::{Session, SessionManager};
use crate::transport::ChatTransport;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A user message that has been recorded and is waiting on the webhook.
#[derive(Debug, Clone)]
pub struct PendingSend {
    session_id: SessionId,
    request: ChatRequest,
    message: Message,
}

impl PendingSend {
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    pub fn message(&self) -> &Message {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank text, or a reply was already pending. Nothing changed.
    Ignored,
    Replied(Message),
    /// The banner text now stored as the session's last error.
    Failed(String),
    /// The session was reset while the request was in flight.
    Stale,
}

pub struct Conversation {
    sessions: SessionManager,
    session: Session,
    transport: Arc<dyn ChatTransport>,
    token: String,
    user: User,
    chat: ChatConfig,
}

impl Conversation {
    pub fn new(transport: Arc<dyn ChatTransport>, auth: AuthResponse, chat: ChatConfig) -> Self {
        Self::with_session_manager(transport, auth, chat, SessionManager::default())
    }

    pub fn with_session_manager(
        transport: Arc<dyn ChatTransport>,
        auth: AuthResponse,
        chat: ChatConfig,
        sessions: SessionManager,
    ) -> Self {
        let session = sessions.create_session(&chat.welcome_for(&auth.user.name));
        Self {
            sessions,
            session,
            transport,
            token: auth.token,
            user: auth.user,
            chat,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_id(&self) -> &SessionId {
        self.session.id()
    }

    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    pub fn awaiting_reply(&self) -> bool {
        self.session.awaiting_reply()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.session.last_error()
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Records the user message and returns what must be sent, or `None` if
    /// the text is blank or a reply is still pending.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingSend> {
        let message = self.session.append_user_message(text)?;
        let session_id = self.session.id().clone();
        Some(PendingSend {
            request: ChatRequest::new(message.text.clone(), &session_id),
            session_id,
            message,
        })
    }

    /// Applies the webhook outcome to the session it was sent from.
    pub fn complete_send(
        &mut self,
        pending: &PendingSend,
        outcome: Result<Value, ChatError>,
    ) -> SendOutcome {
        if pending.session_id != *self.session.id() {
            log::debug!(
                "Dropping reply for session {}; current session is {}",
                pending.session_id,
                self.session.id()
            );
            return SendOutcome::Stale;
        }

        match outcome {
            Ok(payload) => {
                let text = ResponseNormalizer::normalize(&payload);
                SendOutcome::Replied(self.session.append_bot_message(&text))
            }
            Err(err) => {
                log::error!("Failed to send message: {}", err);
                let banner = self.chat.connection_error.clone();
                self.session.record_failure(&banner);
                SendOutcome::Failed(banner)
            }
        }
    }

    /// Full round trip for a caller that owns the conversation exclusively.
    pub async fn send_user_text(&mut self, text: &str) -> SendOutcome {
        let Some(pending) = self.begin_send(text) else {
            return SendOutcome::Ignored;
        };
        let outcome = self
            .transport
            .send_chat(pending.request(), &self.token)
            .await;
        self.complete_send(&pending, outcome)
    }

    /// Full round trip on a shared conversation. The lock is released while
    /// the request is in flight so the caller can still read state or reset.
    pub async fn send_shared(conversation: &Arc<Mutex<Conversation>>, text: &str) -> SendOutcome {
        let (pending, transport, token) = {
            let mut guard = conversation.lock().await;
            let Some(pending) = guard.begin_send(text) else {
                return SendOutcome::Ignored;
            };
            (pending, guard.transport.clone(), guard.token.clone())
        };

        let outcome = transport.send_chat(pending.request(), &token).await;
        conversation.lock().await.complete_send(&pending, outcome)
    }

    /// Starts over with a new session id and the reset greeting.
    pub fn reset(&mut self) -> &Session {
        let greeting = self.chat.reset_for(&self.user.name);
        self.sessions.reset_session(&mut self.session, &greeting);
        &self.session
    }
}
