//! Entity handles and their allocator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key for an entity's components. Zero is never handed out.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Entity(pub u64);

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Monotonic allocator for [`Entity`], starting at 1. Ids are never reused.
#[derive(Debug)]
pub struct EntityAllocator {
    next: u64,
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> Entity {
        let e = Entity(self.next);
        self.next = self.next.wrapping_add(1);
        e
    }
}
