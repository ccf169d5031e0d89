//! Synthetic platform model tests

use mockplat_core::prelude::{
    property_key, ChannelDescriptor, Configuration, Error, IdGenerator, LoadEstimate, LoadProfile,
};
use mockplat_platform::{Platform, SyntheticPlatform};

fn profile(cpu: f64, disk: f64) -> LoadProfile {
    LoadProfile::new(
        LoadEstimate::exact(cpu),
        LoadEstimate::exact(disk),
        LoadEstimate::exact(0.0),
    )
}

#[test]
fn test_three_platforms_allocate_nine_distinct_kinds() {
    let ids = IdGenerator::new();
    let platforms: Vec<_> = (0..3).map(|i| SyntheticPlatform::new(i, Some(&ids))).collect();

    let all: Vec<u64> = platforms
        .iter()
        .flat_map(|p| [p.non_reusable(), p.reusable(), p.broadcast()])
        .map(|c| c.id.get())
        .collect();
    assert_eq!(all, (0..9).collect::<Vec<_>>());

    for (k, p) in platforms.iter().enumerate() {
        let base = 3 * k as u64;
        assert_eq!(p.non_reusable().id.get(), base);
        assert_eq!(p.reusable().id.get(), base + 1);
        assert_eq!(p.broadcast().id.get(), base + 2);
        assert!(!p.non_reusable().reusable);
        assert!(p.reusable().reusable);
        assert!(p.broadcast().reusable);
        assert_eq!(p.input_channels(), &[p.reusable(), p.non_reusable()]);
        assert_eq!(p.broadcast_channels(), &[p.broadcast()]);
        assert_eq!(p.output_channels(), &[p.non_reusable()]);
        assert!(!p.owns(&ChannelDescriptor::OBJECT_FILE));
    }
}

#[test]
fn test_names_follow_platform_number() {
    let p = SyntheticPlatform::new(4, None);
    assert_eq!(p.name(), "Synthetic platform 4");
    assert_eq!(p.configuration_name(), "synthetic-4");
}

#[test]
fn test_default_converters() {
    let p = SyntheticPlatform::new(0, None);
    let cfg = Configuration::new();

    let time = p
        .create_load_profile_to_time_converter(&cfg)
        .convert(&profile(3.0e6, 0.0));
    assert!((time.upper_ms - 1.0).abs() < 1e-9);

    let time = p
        .create_load_profile_to_time_converter(&cfg)
        .convert(&profile(3.0e8, 1.0e6));
    assert!((time.upper_ms - 200.0).abs() < 1e-9);

    let cost = p.create_time_to_cost_converter(&cfg).convert(&time);
    assert!((cost.upper - 200.0).abs() < 1e-9);
}

#[test]
fn test_overrides_are_namespaced_per_platform() {
    let ids = IdGenerator::new();
    let p0 = SyntheticPlatform::new(0, Some(&ids));
    let p1 = SyntheticPlatform::new(1, Some(&ids));
    let cfg = Configuration::new()
        .with_property(property_key(p0.configuration_name(), "cpu.cores"), "2")
        .with_property(property_key(p0.configuration_name(), "stretch"), "3")
        .with_property(property_key(p0.configuration_name(), "costs.fix"), "10");

    let load = profile(6.0e6, 0.0);
    let t0 = p0.create_load_profile_to_time_converter(&cfg).convert(&load);
    let t1 = p1.create_load_profile_to_time_converter(&cfg).convert(&load);
    assert!((t0.upper_ms - 3.0).abs() < 1e-9);
    assert!((t1.upper_ms - 2.0).abs() < 1e-9);

    let c0 = p0.create_time_to_cost_converter(&cfg).convert(&t0);
    let c1 = p1.create_time_to_cost_converter(&cfg).convert(&t1);
    assert!((c0.upper - 13.0).abs() < 1e-9);
    assert!((c1.upper - 2.0).abs() < 1e-9);
}

#[test]
fn test_malformed_property_falls_back_to_default() {
    let p = SyntheticPlatform::new(0, None);
    let cfg = Configuration::new().with_property("mockplat.synthetic-0.cpu.mhz", "fast");
    assert_eq!(p.cost_settings(&cfg).cpu_mhz, 3000);
}

#[test]
fn test_platform_refuses_execution() {
    let p = SyntheticPlatform::new(2, None);
    assert!(matches!(
        p.executor_factory(),
        Err(Error::UnsupportedExecution(_))
    ));
}
