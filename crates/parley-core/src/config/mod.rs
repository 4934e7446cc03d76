//! Configuration for the chat client
//!
//! Settings come from an optional YAML file, then environment variables, and
//! are validated before use. The CLI applies its own flags on top.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
