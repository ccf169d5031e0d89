//! Strongly-typed identifiers used across the harness.
//!
//! Downstream crates should *not* use raw integers for ids. Channel-kind ids
//! must be unique across every platform of one harness, so they are handed
//! out by an explicit [`IdGenerator`] that callers share.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

macro_rules! new_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(v: u64) -> Self {
                Self(v)
            }
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

new_id!(ChannelKindId);
new_id!(OpId);

/// Rewrite epoch stamped onto replacement operators by the optimizer.
pub type Epoch = u32;

/// Monotonic counter shared by everything that must draw from one id space.
///
/// Cloning yields another handle to the *same* counter. A fresh generator
/// starts at 0.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: Arc<AtomicU64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
        }
    }

    /// Return the current value and advance the counter.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::AcqRel)
    }

    pub fn next_channel_kind(&self) -> ChannelKindId {
        ChannelKindId::new(self.next())
    }

    pub fn next_op(&self) -> OpId {
        OpId::new(self.next())
    }

    /// Number of ids handed out so far (assuming a start of 0).
    pub fn allocated(&self) -> u64 {
        self.next.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_counter() {
        let ids = IdGenerator::new();
        let other = ids.clone();
        assert_eq!(ids.next(), 0);
        assert_eq!(other.next(), 1);
        assert_eq!(ids.next_channel_kind(), ChannelKindId::new(2));
        assert_eq!(ids.allocated(), 3);
    }

    #[test]
    fn fresh_generators_are_independent() {
        let a = IdGenerator::new();
        let b = IdGenerator::new();
        a.next();
        assert_eq!(b.next(), 0);
    }
}
