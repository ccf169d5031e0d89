//! Channel conversions: edges of the conversion graph.
//!
//! An edge stores a factory instead of an operator. The optimizer calls it
//! only for conversions that end up in a plan, and gets a fresh operator each
//! time.

use std::fmt;
use std::sync::Arc;

use mockplat_core::prelude::ChannelDescriptor;
use mockplat_operators::SyntheticOperator;
use mockplat_platform::SyntheticPlatform;
use serde::{Deserialize, Serialize};

/// Every platform contributes exactly this many deterministic conversions.
pub const DEFAULT_CONVERSIONS_PER_PLATFORM: usize = 5;

pub type OperatorFactory = Arc<dyn Fn() -> SyntheticOperator + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionOrigin {
    /// Fixed per-platform topology.
    Default,
    /// Sampled to reach a target density.
    Random,
}

#[derive(Clone)]
pub struct ChannelConversion {
    source: ChannelDescriptor,
    target: ChannelDescriptor,
    origin: ConversionOrigin,
    factory: OperatorFactory,
}

impl ChannelConversion {
    pub fn new(
        source: ChannelDescriptor,
        target: ChannelDescriptor,
        origin: ConversionOrigin,
        factory: OperatorFactory,
    ) -> Self {
        Self {
            source,
            target,
            origin,
            factory,
        }
    }

    pub fn source(&self) -> ChannelDescriptor {
        self.source
    }

    pub fn target(&self) -> ChannelDescriptor {
        self.target
    }

    pub fn pair(&self) -> (ChannelDescriptor, ChannelDescriptor) {
        (self.source, self.target)
    }

    pub fn origin(&self) -> ConversionOrigin {
        self.origin
    }

    /// Instantiate the converting operator.
    pub fn create_operator(&self) -> SyntheticOperator {
        (self.factory)()
    }
}

impl fmt::Debug for ChannelConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelConversion")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("origin", &self.origin)
            .finish()
    }
}

impl fmt::Display for ChannelConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Factory for a 1-in/1-out conversion operator on `platform` producing
/// `channel`.
pub fn pinned_factory(
    platform: &Arc<SyntheticPlatform>,
    channel: ChannelDescriptor,
    name: &'static str,
) -> OperatorFactory {
    let platform = Arc::clone(platform);
    Arc::new(move || {
        SyntheticOperator::converter(1, 1, false, Arc::clone(&platform), channel).with_name(name)
    })
}

/// The five deterministic conversions of `platform`, spanning its own kinds
/// and the `external` reference kind.
///
/// Reading from the external kind yields the non-reusable kind, but its
/// operator advertises the reusable one. That pairing is kept as is.
pub fn default_conversions(
    platform: &Arc<SyntheticPlatform>,
    external: ChannelDescriptor,
) -> Vec<ChannelConversion> {
    let non_reusable = platform.non_reusable();
    let reusable = platform.reusable();
    let broadcast = platform.broadcast();
    let edge = |source, target, pinned, name| {
        ChannelConversion::new(
            source,
            target,
            ConversionOrigin::Default,
            pinned_factory(platform, pinned, name),
        )
    };

    vec![
        edge(non_reusable, reusable, reusable, "Convert non-reusable to reusable"),
        edge(reusable, broadcast, broadcast, "Convert reusable to broadcast"),
        edge(reusable, external, external, "Write reusable to object file"),
        edge(non_reusable, external, external, "Write non-reusable to object file"),
        edge(external, non_reusable, reusable, "Read non-reusable from object file"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockplat_core::prelude::IdGenerator;
    use mockplat_operators::ExecutionOperator;

    #[test]
    fn five_edges_with_the_observed_pinning() {
        let p = Arc::new(SyntheticPlatform::new(0, Some(&IdGenerator::new())));
        let ext = ChannelDescriptor::OBJECT_FILE;
        let convs = default_conversions(&p, ext);
        assert_eq!(convs.len(), DEFAULT_CONVERSIONS_PER_PLATFORM);

        let pairs: Vec<_> = convs.iter().map(ChannelConversion::pair).collect();
        assert_eq!(
            pairs,
            vec![
                (p.non_reusable(), p.reusable()),
                (p.reusable(), p.broadcast()),
                (p.reusable(), ext),
                (p.non_reusable(), ext),
                (ext, p.non_reusable()),
            ]
        );

        let read = convs[4].create_operator();
        assert_eq!(read.output_channels(), &[p.reusable()]);
        assert_eq!(read.name(), "Read non-reusable from object file");
        assert_eq!(read.num_inputs(), 1);
        assert_eq!(read.num_outputs(), 1);
        assert!(!read.supports_broadcast_inputs());
    }

    #[test]
    fn factories_build_fresh_operators() {
        let p = Arc::new(SyntheticPlatform::new(3, None));
        let conv = &default_conversions(&p, ChannelDescriptor::OBJECT_FILE)[1];
        let a = conv.create_operator().at(1);
        let b = conv.create_operator();
        assert_eq!(a.epoch(), Some(1));
        assert_eq!(b.epoch(), None);
        assert_eq!(b.output_channels(), &[p.broadcast()]);
    }
}
