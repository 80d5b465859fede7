//! Per-stream device and session identifiers

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of the identifiers embedded in each stream URL
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Fresh random v4 UUIDs; what real runs use
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// UUID-shaped ids from a counter, for reproducible output
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Uuid::from_u128(u128::from(n)).to_string()
    }
}
