//! Mappings from template operators to synthetic operators.
//!
//! A mapping matches exactly one operator object, not an operator kind or an
//! id: the catalog operator acts as a template, and the optimizer's plan
//! rewrite decides where that template appears. Ids alone are not enough,
//! since independent generators hand out overlapping ids.

use std::fmt;
use std::sync::Arc;

use mockplat_core::prelude::{Epoch, LogicalOperator, OpId, Result};
use mockplat_operators::{wrap, SyntheticOperator};
use mockplat_platform::SyntheticPlatform;

/// Singleton structural pattern, bound to one template object.
#[derive(Debug, Clone)]
pub struct OperatorPattern {
    pub name: String,
    template: Arc<LogicalOperator>,
}

impl OperatorPattern {
    pub fn singleton(name: impl Into<String>, template: &Arc<LogicalOperator>) -> Self {
        Self {
            name: name.into(),
            template: Arc::clone(template),
        }
    }

    pub fn template(&self) -> &Arc<LogicalOperator> {
        &self.template
    }

    pub fn template_id(&self) -> OpId {
        self.template.id
    }

    /// True only for the template object itself.
    pub fn matches(&self, op: &LogicalOperator) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.template), op)
    }
}

/// Creates the replacement for a matched operator in a given rewrite epoch.
pub type ReplacementFactory =
    Arc<dyn Fn(&LogicalOperator, Epoch) -> Result<SyntheticOperator> + Send + Sync>;

#[derive(Clone)]
pub struct Mapping {
    pattern: OperatorPattern,
    template_kind: String,
    replacement: ReplacementFactory,
    target_platform: Arc<SyntheticPlatform>,
}

impl Mapping {
    pub fn pattern(&self) -> &OperatorPattern {
        &self.pattern
    }

    /// Kind of the template operator this mapping was built from.
    pub fn template_kind(&self) -> &str {
        &self.template_kind
    }

    pub fn target_platform(&self) -> &Arc<SyntheticPlatform> {
        &self.target_platform
    }

    pub fn matches(&self, op: &LogicalOperator) -> bool {
        self.pattern.matches(op)
    }

    /// Replace `op` if it matches; `Ok(None)` otherwise.
    pub fn rewrite(&self, op: &LogicalOperator, epoch: Epoch) -> Result<Option<SyntheticOperator>> {
        if !self.matches(op) {
            return Ok(None);
        }
        (self.replacement)(op, epoch).map(Some)
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("pattern", &self.pattern)
            .field("template_kind", &self.template_kind)
            .field("target_platform", &self.target_platform.number())
            .finish()
    }
}

pub fn build_mapping(source: &Arc<LogicalOperator>, platform: Arc<SyntheticPlatform>) -> Mapping {
    let replacement_platform = Arc::clone(&platform);
    let replacement: ReplacementFactory = Arc::new(move |matched: &LogicalOperator, epoch: Epoch| {
        wrap(matched, Arc::clone(&replacement_platform)).map(|op| op.at(epoch))
    });
    Mapping {
        pattern: OperatorPattern::singleton("original", source),
        template_kind: source.kind.clone(),
        replacement,
        target_platform: platform,
    }
}

/// One mapping per operator, all targeting `platform`.
pub fn build_mappings_for_platform(
    operators: &[Arc<LogicalOperator>],
    platform: &Arc<SyntheticPlatform>,
) -> Vec<Mapping> {
    operators
        .iter()
        .map(|op| build_mapping(op, Arc::clone(platform)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockplat_core::prelude::IdGenerator;
    use mockplat_operators::ExecutionOperator;

    #[test]
    fn matches_only_its_template_instance() {
        let ids = IdGenerator::new();
        let platform = Arc::new(SyntheticPlatform::new(0, Some(&IdGenerator::new())));
        let template = Arc::new(LogicalOperator::new(ids.next_op(), "map", 1, 1));
        let twin = LogicalOperator::new(ids.next_op(), "map", 1, 1);
        let mapping = build_mapping(&template, platform);

        assert!(mapping.matches(&template));
        assert!(!mapping.matches(&twin));
        assert!(!mapping.matches(&(*template).clone()));
        assert!(mapping.rewrite(&twin, 0).unwrap().is_none());

        let replaced = mapping.rewrite(&template, 7).unwrap().unwrap();
        assert_eq!(replaced.epoch(), Some(7));
        assert_eq!(replaced.kind(), "map");
        assert_eq!(replaced.platform_number(), 0);
        assert!(!replaced.is_loop_head());
    }

    #[test]
    fn equal_ids_from_another_generator_do_not_match() {
        let platform = Arc::new(SyntheticPlatform::new(1, None));
        let template = Arc::new(LogicalOperator::new(IdGenerator::new().next_op(), "cartesian", 2, 1));
        let foreign = LogicalOperator::new(IdGenerator::new().next_op(), "text_file_sink", 1, 0);
        assert_eq!(template.id, foreign.id);

        let mapping = build_mapping(&template, platform);
        assert!(!mapping.matches(&foreign));
        assert!(mapping.rewrite(&foreign, 1).unwrap().is_none());
        assert_eq!(mapping.pattern().template_id(), template.id);
    }
}
