use std::sync::Arc;

use mockplat_core::prelude::Configuration;
use mockplat_platform::Platform;

use crate::conversion::ChannelConversion;
use crate::mapping::Mapping;

/// What a plugin hands to the optimizer at registration time.
pub trait Plugin {
    fn required_platforms(&self) -> Vec<Arc<dyn Platform>>;

    fn mappings(&self) -> &[Mapping];

    fn channel_conversions(&self) -> &[ChannelConversion];

    /// Seed `configuration` with whatever defaults the plugin needs.
    fn set_properties(&self, configuration: &mut Configuration);
}
