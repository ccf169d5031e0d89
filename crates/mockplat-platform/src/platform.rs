//! The synthetic platform model.

use mockplat_core::prelude::{
    ChannelDescriptor, Configuration, Error, IdGenerator, LoadProfileToTimeConverter, Result,
    TimeToCostConverter,
};

use crate::converters::CostSettings;
use crate::traits::{ExecutorFactory, Platform};

/// A platform that advertises three channel kinds and linear cost models but
/// refuses to execute.
///
/// Channel roles are fixed:
/// - inputs: reusable, non-reusable
/// - broadcasts: broadcast
/// - outputs: non-reusable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticPlatform {
    number: usize,
    name: String,
    config_name: String,
    non_reusable: ChannelDescriptor,
    reusable: ChannelDescriptor,
    broadcast: ChannelDescriptor,
    input_channels: Vec<ChannelDescriptor>,
    broadcast_channels: Vec<ChannelDescriptor>,
    output_channels: Vec<ChannelDescriptor>,
}

impl SyntheticPlatform {
    /// Create platform `number`, drawing three channel-kind ids from `ids`.
    ///
    /// Without a generator a private one starting at 0 is used, so platforms
    /// built that way share ids with each other. Pass one shared generator
    /// whenever several platforms end up in the same harness.
    pub fn new(number: usize, ids: Option<&IdGenerator>) -> Self {
        let private;
        let ids = match ids {
            Some(ids) => ids,
            None => {
                private = IdGenerator::new();
                &private
            }
        };

        let non_reusable = ChannelDescriptor::synthetic(ids.next_channel_kind(), false);
        let reusable = ChannelDescriptor::synthetic(ids.next_channel_kind(), true);
        let broadcast = ChannelDescriptor::synthetic(ids.next_channel_kind(), true);
        tracing::debug!(
            platform = number,
            non_reusable = non_reusable.id.get(),
            reusable = reusable.id.get(),
            broadcast = broadcast.id.get(),
            "allocated channel kinds"
        );

        Self {
            number,
            name: format!("Synthetic platform {}", number),
            config_name: format!("synthetic-{}", number),
            non_reusable,
            reusable,
            broadcast,
            input_channels: vec![reusable, non_reusable],
            broadcast_channels: vec![broadcast],
            output_channels: vec![non_reusable],
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn non_reusable(&self) -> ChannelDescriptor {
        self.non_reusable
    }

    pub fn reusable(&self) -> ChannelDescriptor {
        self.reusable
    }

    pub fn broadcast(&self) -> ChannelDescriptor {
        self.broadcast
    }

    pub fn input_channels(&self) -> &[ChannelDescriptor] {
        &self.input_channels
    }

    pub fn broadcast_channels(&self) -> &[ChannelDescriptor] {
        &self.broadcast_channels
    }

    pub fn output_channels(&self) -> &[ChannelDescriptor] {
        &self.output_channels
    }

    /// All three kinds: broadcast, reusable, non-reusable.
    pub fn channels(&self) -> [ChannelDescriptor; 3] {
        [self.broadcast, self.reusable, self.non_reusable]
    }

    pub fn owns(&self, channel: &ChannelDescriptor) -> bool {
        self.channels().contains(channel)
    }

    pub fn cost_settings(&self, configuration: &Configuration) -> CostSettings {
        CostSettings::resolve(&self.config_name, configuration)
    }
}

impl Platform for SyntheticPlatform {
    fn name(&self) -> &str {
        &self.name
    }

    fn configuration_name(&self) -> &str {
        &self.config_name
    }

    fn supported_channels(&self) -> Vec<ChannelDescriptor> {
        self.channels().to_vec()
    }

    fn create_load_profile_to_time_converter(
        &self,
        configuration: &Configuration,
    ) -> LoadProfileToTimeConverter {
        self.cost_settings(configuration).load_profile_to_time()
    }

    fn create_time_to_cost_converter(&self, configuration: &Configuration) -> TimeToCostConverter {
        self.cost_settings(configuration).time_to_cost()
    }

    fn executor_factory(&self) -> Result<ExecutorFactory> {
        Err(Error::UnsupportedExecution(format!(
            "{} does not support execution",
            self.name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockplat_core::config::property_key;
    use mockplat_core::cost::{LoadEstimate, LoadProfile, TimeEstimate};

    #[test]
    fn channel_roles() {
        let p = SyntheticPlatform::new(0, None);
        assert_eq!(p.input_channels(), &[p.reusable(), p.non_reusable()]);
        assert_eq!(p.broadcast_channels(), &[p.broadcast()]);
        assert_eq!(p.output_channels(), &[p.non_reusable()]);
        assert!(!p.non_reusable().reusable);
        assert!(p.reusable().reusable);
        assert!(p.broadcast().reusable);
    }

    #[test]
    fn standalone_platforms_start_their_own_counter() {
        let a = SyntheticPlatform::new(0, None);
        let b = SyntheticPlatform::new(1, None);
        assert_eq!(a.non_reusable().id, b.non_reusable().id);
        assert_eq!(a.broadcast().id.get(), 2);
    }

    #[test]
    fn default_cost_model() {
        let p = SyntheticPlatform::new(4, None);
        let cfg = Configuration::new();
        let to_time = p.create_load_profile_to_time_converter(&cfg);
        let profile = LoadProfile::new(
            LoadEstimate::exact(3_000_000.0),  // 1 ms at 3000 MHz
            LoadEstimate::exact(1_000_000.0),  // 1 MB at 100 ms/MB
            LoadEstimate::exact(50_000_000.0), // free
        );
        let t = to_time.convert(&profile);
        assert!((t.lower_ms - 101.0).abs() < 1e-9);
        assert!((t.upper_ms - 101.0).abs() < 1e-9);

        let to_cost = p.create_time_to_cost_converter(&cfg);
        let c = to_cost.convert(&TimeEstimate::new(10.0, 20.0, 1.0));
        assert_eq!((c.lower, c.upper), (10.0, 20.0));
    }

    #[test]
    fn overrides_are_read_from_the_platform_namespace() {
        let p = SyntheticPlatform::new(2, None);
        let cfg = Configuration::new()
            .with_property(property_key("synthetic-2", "cpu.cores"), "2")
            .with_property(property_key("synthetic-2", "stretch"), "2")
            .with_property(property_key("synthetic-2", "costs.fix"), "5")
            .with_property(property_key("synthetic-1", "costs.per-ms"), "100");
        let t = p
            .create_load_profile_to_time_converter(&cfg)
            .convert(&LoadProfile::new(
                LoadEstimate::exact(6_000_000.0),
                LoadEstimate::exact(0.0),
                LoadEstimate::exact(0.0),
            ));
        assert!((t.upper_ms - 2.0).abs() < 1e-9);
        let c = p
            .create_time_to_cost_converter(&cfg)
            .convert(&TimeEstimate::new(1.0, 1.0, 1.0));
        assert_eq!(c.upper, 6.0);
    }

    #[test]
    fn execution_is_refused() {
        let p = SyntheticPlatform::new(0, None);
        assert!(matches!(
            p.executor_factory(),
            Err(Error::UnsupportedExecution(_))
        ));
    }
}
