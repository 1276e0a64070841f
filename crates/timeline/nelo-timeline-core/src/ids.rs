//! Timeline identities.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of one timeline core, unique within the process.
///
/// Ids are drawn from one counter shared by every context, so timelines from
/// different contexts or scenes can be layered together safely.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct TimelineId(pub u64);

impl TimelineId {
    /// A fresh id, greater than every id handed out before it.
    #[inline]
    pub fn next() -> Self {
        TimelineId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TimelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
