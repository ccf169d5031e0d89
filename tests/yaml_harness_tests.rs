//! YAML harness description tests

use mockplat_core::prelude::{CatalogChoice, HarnessConfig};
use mockplat_harness::{parse_yaml_harness, CatalogDoc, Harness};
use mockplat_platform::Platform;

#[test]
fn test_parse_full_document() {
    let yaml = r#"
platforms: 3
density: 0.4
seed: 17
catalog:
  - { kind: map, inputs: 1, outputs: 1, broadcast: true }
  - kind: repeat
    inputs: 2
    outputs: 2
    loop:
      initialization: [0]
      body: [1]
      body_outputs: [0]
      final_outputs: [1]
      iterations: 10
properties:
  mockplat.synthetic-1.cpu.mhz: 1500
  mockplat.synthetic-1.stretch: "2.5"
"#;

    let doc = parse_yaml_harness(yaml).unwrap();
    assert!(matches!(doc.catalog, Some(CatalogDoc::Operators(ref ops)) if ops.len() == 2));

    let mut cfg = HarnessConfig::default();
    doc.apply(&mut cfg);
    assert_eq!(cfg.num_platforms, 3);
    assert_eq!(cfg.seed, Some(17));
    assert_eq!(cfg.catalog, CatalogChoice::Default);

    let ops = doc.operators().unwrap().unwrap();
    assert!(!ops[0].is_loop_head());
    assert!(ops[0].supports_broadcast_inputs);
    assert_eq!(ops[1].loop_roles().unwrap().num_expected_iterations, 10);

    let harness = Harness::new(&cfg, Some(ops))
        .unwrap()
        .with_properties(doc.configuration());
    assert_eq!(harness.mappings().len(), 6);
    assert_eq!(harness.conversions().len(), 36);

    let p1 = &harness.platforms()[1];
    let settings = p1.cost_settings(harness.properties());
    assert_eq!(settings.cpu_mhz, 1500);
    assert!((settings.stretch - 2.5).abs() < 1e-9);
    let p0 = &harness.platforms()[0];
    assert_eq!(p0.cost_settings(harness.properties()).cpu_mhz, 3000);
    assert_eq!(p0.name(), "Synthetic platform 0");
}

#[test]
fn test_catalog_default_keyword() {
    let doc = parse_yaml_harness("catalog: default\n").unwrap();
    let mut cfg = HarnessConfig {
        catalog: CatalogChoice::Omitted,
        ..HarnessConfig::default()
    };
    doc.apply(&mut cfg);
    assert_eq!(cfg.catalog, CatalogChoice::Default);
}

#[test]
fn test_invalid_yaml_is_rejected() {
    assert!(parse_yaml_harness("platforms: [1, 2").is_err());
    assert!(parse_yaml_harness("density: dense\n").is_err());
    assert!(parse_yaml_harness("catalog: everything\n").is_err());
}
