//! YAML description of a harness.
//!
//! Example:
//! ```yaml
//! platforms: 4
//! density: 0.25
//! seed: 42
//! catalog:
//!   - { kind: map, inputs: 1, outputs: 1, broadcast: true }
//!   - kind: repeat
//!     inputs: 2
//!     outputs: 2
//!     loop:
//!       initialization: [0]
//!       body: [1]
//!       body_outputs: [0]
//!       final_outputs: [1]
//!       iterations: 10
//! properties:
//!   mockplat.synthetic-0.cpu.mhz: 1500
//! ```
//!
//! Every top-level field is optional. `catalog` is `default`, `none`, or a
//! list of operator specs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mockplat_core::prelude::{
    CatalogChoice, Configuration, Error, HarnessConfig, IdGenerator, LogicalOperator, LoopRoles,
    Result,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessDoc {
    #[serde(default)]
    pub platforms: Option<usize>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub catalog: Option<CatalogDoc>,
    #[serde(default)]
    pub properties: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogDoc {
    Choice(CatalogChoice),
    Operators(Vec<OperatorSpec>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorSpec {
    pub kind: String,
    #[serde(default)]
    pub inputs: usize,
    #[serde(default)]
    pub outputs: usize,
    #[serde(default)]
    pub broadcast: bool,
    #[serde(default, rename = "loop")]
    pub loop_roles: Option<LoopSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopSpec {
    pub initialization: Vec<usize>,
    pub condition: Vec<usize>,
    pub body: Vec<usize>,
    pub body_outputs: Vec<usize>,
    pub condition_outputs: Vec<usize>,
    pub final_outputs: Vec<usize>,
    pub iterations: u32,
}

fn check_indices(kind: &str, role: &str, indices: &[usize], slots: usize) -> Result<()> {
    match indices.iter().find(|&&i| i >= slots) {
        Some(i) => Err(Error::Config(format!(
            "operator '{kind}': {role} index {i} out of range ({slots} slots)"
        ))),
        None => Ok(()),
    }
}

impl OperatorSpec {
    pub fn to_operator(&self, ids: &IdGenerator) -> Result<LogicalOperator> {
        let mut op = LogicalOperator::new(ids.next_op(), self.kind.as_str(), self.inputs, self.outputs);
        if self.broadcast {
            op = op.supporting_broadcasts();
        }
        let Some(spec) = &self.loop_roles else {
            return Ok(op);
        };

        let (ins, outs) = (self.inputs, self.outputs);
        check_indices(&self.kind, "initialization", &spec.initialization, ins)?;
        check_indices(&self.kind, "condition", &spec.condition, ins)?;
        check_indices(&self.kind, "body", &spec.body, ins)?;
        check_indices(&self.kind, "body output", &spec.body_outputs, outs)?;
        check_indices(&self.kind, "condition output", &spec.condition_outputs, outs)?;
        check_indices(&self.kind, "final output", &spec.final_outputs, outs)?;

        Ok(op.with_loop_roles(LoopRoles {
            initialization_inputs: spec.initialization.clone(),
            condition_inputs: spec.condition.clone(),
            loop_body_inputs: spec.body.clone(),
            loop_body_outputs: spec.body_outputs.clone(),
            condition_outputs: spec.condition_outputs.clone(),
            final_outputs: spec.final_outputs.clone(),
            num_expected_iterations: spec.iterations,
        }))
    }
}

impl HarnessDoc {
    /// Overwrite the fields of `cfg` that this document sets.
    pub fn apply(&self, cfg: &mut HarnessConfig) {
        if let Some(n) = self.platforms {
            cfg.num_platforms = n;
        }
        if let Some(d) = self.density {
            cfg.density = d;
        }
        if let Some(seed) = self.seed {
            cfg.seed = Some(seed);
        }
        if let Some(CatalogDoc::Choice(choice)) = self.catalog {
            cfg.catalog = choice;
        }
    }

    /// Explicit operators, if the document lists any.
    pub fn operators(&self) -> Result<Option<Vec<LogicalOperator>>> {
        match &self.catalog {
            Some(CatalogDoc::Operators(specs)) => {
                let ids = IdGenerator::new();
                specs
                    .iter()
                    .map(|s| s.to_operator(&ids))
                    .collect::<Result<Vec<_>>>()
                    .map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Scalar properties as optimizer configuration; other values are skipped.
    pub fn configuration(&self) -> Configuration {
        self.properties
            .iter()
            .filter_map(|(k, v)| {
                let value = match v {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    _ => {
                        tracing::warn!(key = %k, "ignoring non-scalar property");
                        return None;
                    }
                };
                Some((k.clone(), value))
            })
            .collect()
    }
}

/// Parse a YAML harness document.
pub fn parse_yaml_harness(yaml_src: &str) -> std::result::Result<HarnessDoc, serde_yaml::Error> {
    if yaml_src.trim().is_empty() {
        return Ok(HarnessDoc::default());
    }
    serde_yaml::from_str(yaml_src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_choice_and_fields() {
        let doc = parse_yaml_harness("platforms: 3\ndensity: 0.2\ncatalog: none\n").unwrap();
        let mut cfg = HarnessConfig::default();
        doc.apply(&mut cfg);
        assert_eq!(cfg.num_platforms, 3);
        assert_eq!(cfg.density, 0.2);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.catalog, CatalogChoice::Omitted);
        assert!(doc.operators().unwrap().is_none());
    }

    #[test]
    fn empty_document_changes_nothing() {
        let doc = parse_yaml_harness("").unwrap();
        let mut cfg = HarnessConfig::default();
        doc.apply(&mut cfg);
        assert_eq!(cfg.num_platforms, 5);
        assert!(doc.configuration().is_empty());
    }

    #[test]
    fn out_of_range_loop_role_is_rejected() {
        let src = r#"
catalog:
  - kind: bad_loop
    inputs: 1
    outputs: 1
    loop: { initialization: [0], body: [3] }
"#;
        let doc = parse_yaml_harness(src).unwrap();
        assert!(matches!(doc.operators(), Err(Error::Config(_))));
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        assert!(parse_yaml_harness("platform: 3\n").is_err());
    }

    #[test]
    fn numeric_properties_become_strings() {
        let doc = parse_yaml_harness("properties:\n  mockplat.synthetic-1.cpu.cores: 4\n").unwrap();
        let cfg = doc.configuration();
        assert_eq!(cfg.get("mockplat.synthetic-1.cpu.cores"), Some("4"));
    }
}
