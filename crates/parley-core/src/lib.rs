//! Core library for the Parley webhook chat client.
//!
//! Parley forwards user text to a remote automation webhook and turns the
//! loosely-shaped JSON it returns into chat messages. The crate is organized
//! around a few pieces:
//!
//! - **Session state**: conversation id, append-only transcript, and the
//!   awaiting-reply and last-error flags ([`session`])
//! - **Reply normalization**: extracting display text from whatever the
//!   webhook returned ([`normalizer`])
//! - **Conversation driver**: single-flight sends and stale-reply filtering
//!   ([`conversation`])
//! - **Collaborators**: the webhook transport and the auth provider, both
//!   behind traits ([`transport`], [`auth`])
//! - **Configuration**: YAML plus environment overrides ([`config`])

pub mod auth;
pub mod config;
pub mod conversation;
pub mod core_types;
pub mod errors;
pub mod id_source;
pub mod normalizer;
pub mod session;
pub mod transport;

pub use auth::{AuthProvider, SimulatedAuthProvider};
pub use config::{ConfigLoader, ParleyConfig};
pub use conversation::{Conversation, PendingSend, SendOutcome};
pub use core_types::{AuthResponse, ChatRequest, Message, Sender, SessionId, User};
pub use errors::ChatError;
pub use id_source::{IdSource, RandomIdSource, SequentialIdSource};
pub use normalizer::ResponseNormalizer;
pub use session::{Session, SessionManager};
pub use transport::{ChatTransport, HttpChatTransport};

#[cfg(test)]
pub mod test_utils;
