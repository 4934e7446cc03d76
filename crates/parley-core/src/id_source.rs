//! Session identifier generation.
//!
//! Sessions never mint their own ids; they ask an [`IdSource`] handed in by the
//! caller. Production code uses random v4 UUIDs, tests plug in a sequence.

use crate::core_types::SessionId;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub trait IdSource: Send + Sync {
    fn next_id(&self) -> SessionId;
}

/// 122 bits of randomness per id via UUID v4.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdSource;

impl IdSource for RandomIdSource {
    fn next_id(&self) -> SessionId {
        SessionId::new(Uuid::new_v4().to_string())
    }
}

/// Deterministic ids (`00000000-0000-0000-0000-000000000001`, ...).
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    counter: AtomicU64,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&self) -> SessionId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        SessionId::new(Uuid::from_u128(n as u128).to_string())
    }
}
