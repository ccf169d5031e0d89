//! Convenient re-exports for downstream crates.

pub use crate::channel::{ChannelClass, ChannelDescriptor};
pub use crate::config::{property_key, CatalogChoice, Configuration, HarnessConfig};
pub use crate::cost::{
    CostEstimate, LoadEstimate, LoadProfile, LoadProfileToTimeConverter, LoadToTimeConverter,
    TimeEstimate, TimeToCostConverter,
};
pub use crate::error::{Error, Result};
pub use crate::id::{ChannelKindId, Epoch, IdGenerator, OpId};
pub use crate::manifest::{HarnessManifest, ManifestId};
pub use crate::plan::{InputSlot, LogicalOperator, LoopRoles, OperatorShape, OutputSlot, SlotType};
