//! Channel descriptors: the nodes of the channel-conversion graph.
//!
//! A descriptor names one *kind* of data exchange between operators. It is a
//! plain `Copy` value; identity covers the class, the numeric id, and the
//! reusability flag, so two descriptors that differ only in reusability are
//! distinct nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::ChannelKindId;

/// Which family a channel kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelClass {
    /// Allocated by a synthetic platform.
    Synthetic,
    /// The durable, file-backed kind supplied by the surrounding system.
    ObjectFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    pub class: ChannelClass,
    pub id: ChannelKindId,
    pub reusable: bool,
}

impl ChannelDescriptor {
    /// Durable object-file channel used as the spanning point between
    /// synthetic platforms. Never materialized by this crate.
    pub const OBJECT_FILE: ChannelDescriptor = ChannelDescriptor {
        class: ChannelClass::ObjectFile,
        id: ChannelKindId::new(0),
        reusable: true,
    };

    pub const fn synthetic(id: ChannelKindId, reusable: bool) -> Self {
        Self {
            class: ChannelClass::Synthetic,
            id,
            reusable,
        }
    }

    pub fn is_external(&self) -> bool {
        self.class == ChannelClass::ObjectFile
    }
}

impl fmt::Display for ChannelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            ChannelClass::Synthetic => write!(
                f,
                "Synthetic channel {} [{}]",
                self.id.get(),
                if self.reusable { "r" } else { "-" }
            ),
            ChannelClass::ObjectFile => write!(f, "object file channel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn reusability_is_part_of_identity() {
        let a = ChannelDescriptor::synthetic(ChannelKindId::new(7), true);
        let b = ChannelDescriptor::synthetic(ChannelKindId::new(7), false);
        assert_ne!(a, b);
        let set: HashSet<_> = [a, b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn object_file_never_equals_a_synthetic_kind() {
        let same_id = ChannelDescriptor::synthetic(ChannelKindId::new(0), true);
        assert_ne!(ChannelDescriptor::OBJECT_FILE, same_id);
        assert!(ChannelDescriptor::OBJECT_FILE.is_external());
    }

    #[test]
    fn display_marks_reusability() {
        let r = ChannelDescriptor::synthetic(ChannelKindId::new(3), true);
        let nr = ChannelDescriptor::synthetic(ChannelKindId::new(4), false);
        assert_eq!(r.to_string(), "Synthetic channel 3 [r]");
        assert_eq!(nr.to_string(), "Synthetic channel 4 [-]");
    }
}
