//! The optimizer's platform contract.
//!
//! The optimizer registers platforms, asks them for their channel kinds and
//! cost converters while planning, and for an executor factory only when it
//! is about to run a plan.

use mockplat_core::prelude::{
    ChannelDescriptor, Configuration, LoadProfileToTimeConverter, Result, TimeToCostConverter,
};

/// Something that runs plan fragments on a platform.
pub trait Executor: Send {
    fn platform_name(&self) -> &str;
}

/// Creates executors on demand.
pub type ExecutorFactory = Box<dyn Fn() -> Box<dyn Executor> + Send + Sync>;

pub trait Platform: Send + Sync + 'static {
    /// Human-readable platform name (stable).
    fn name(&self) -> &str;

    /// Namespace for this platform's configuration properties.
    fn configuration_name(&self) -> &str;

    /// Every channel kind this platform can produce or consume.
    fn supported_channels(&self) -> Vec<ChannelDescriptor>;

    /// Seed platform-specific defaults into `configuration`.
    fn configure_defaults(&self, _configuration: &mut Configuration) {}

    fn create_load_profile_to_time_converter(
        &self,
        configuration: &Configuration,
    ) -> LoadProfileToTimeConverter;

    fn create_time_to_cost_converter(&self, configuration: &Configuration) -> TimeToCostConverter;

    /// Obtain the factory used to run plans on this platform.
    fn executor_factory(&self) -> Result<ExecutorFactory>;
}
