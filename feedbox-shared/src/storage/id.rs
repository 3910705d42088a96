/// Identifier generation
///
/// Every entity gets a UUID chosen by the application before insert. The
/// generator sits behind a trait so tests can make identifiers predictable.
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}

/// Random (v4) UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic IDs built from a fixed prefix and a counter
///
/// Two generators with different prefixes never collide, which lets
/// concurrent test runs share one database.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: u64,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: u64) -> Self {
        Self {
            prefix,
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Uuid::from_u64_pair(self.prefix, n)
    }
}
