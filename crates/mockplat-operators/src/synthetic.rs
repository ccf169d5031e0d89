//! Synthetic execution operators.

use std::fmt;
use std::sync::Arc;

use mockplat_core::prelude::{
    ChannelDescriptor, Epoch, Error, InputSlot, LogicalOperator, OutputSlot, Result,
};
use mockplat_platform::SyntheticPlatform;
use serde::{Deserialize, Serialize};

use crate::traits::{ExecutionOperator, RunnableOperator};

/// Loop roles of a synthetic loop head, as indices into its own slots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoopHeadSlots {
    pub initialization_inputs: Vec<usize>,
    pub condition_inputs: Vec<usize>,
    pub loop_body_inputs: Vec<usize>,
    pub loop_body_outputs: Vec<usize>,
    pub condition_outputs: Vec<usize>,
    pub final_outputs: Vec<usize>,
    pub num_expected_iterations: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntheticShape {
    Plain,
    LoopHead(LoopHeadSlots),
}

/// Platform-bound stand-in for a logical operator or a channel conversion.
///
/// Slots are type-erased. Inputs accept the platform's input kinds (or its
/// broadcast kind, for broadcast slots); every output advertises the same
/// fixed list of kinds.
#[derive(Debug, Clone)]
pub struct SyntheticOperator {
    kind: String,
    name: Option<String>,
    platform: Arc<SyntheticPlatform>,
    inputs: Vec<InputSlot>,
    outputs: Vec<OutputSlot>,
    supports_broadcast_inputs: bool,
    output_channels: Vec<ChannelDescriptor>,
    shape: SyntheticShape,
    epoch: Option<Epoch>,
}

trait Indexed {
    fn slot_index(&self) -> usize;
}

impl Indexed for InputSlot {
    fn slot_index(&self) -> usize {
        self.index
    }
}

impl Indexed for OutputSlot {
    fn slot_index(&self) -> usize {
        self.index
    }
}

/// Map each role index of the source onto the copy at the same index.
/// Copies are built index-aligned, so a miss means the topology is corrupt.
fn translate_slots<S: Indexed>(
    role: &'static str,
    originals: &[usize],
    copies: &[S],
) -> Result<Vec<usize>> {
    originals
        .iter()
        .map(|&index| match copies.get(index) {
            Some(copy) if copy.slot_index() == index => Ok(index),
            _ => Err(Error::SlotIndexMismatch {
                role,
                index,
                slots: copies.len(),
            }),
        })
        .collect()
}

impl SyntheticOperator {
    /// Imitate `source` on `platform`. Only the regular inputs are mirrored;
    /// broadcast inputs of the source are neglected.
    pub fn imitate(source: &LogicalOperator, platform: Arc<SyntheticPlatform>) -> Self {
        let inputs = source
            .inputs
            .iter()
            .take(source.num_regular_inputs())
            .map(InputSlot::erased_copy)
            .collect();
        let outputs = source.outputs.iter().map(OutputSlot::erased_copy).collect();
        let output_channels = platform.output_channels().to_vec();

        Self {
            kind: source.kind.clone(),
            name: source.name.clone(),
            platform,
            inputs,
            outputs,
            supports_broadcast_inputs: source.supports_broadcast_inputs,
            output_channels,
            shape: SyntheticShape::Plain,
            epoch: None,
        }
    }

    /// Imitate a loop-head `source`, carrying over its six slot roles and its
    /// expected iteration count.
    pub fn imitate_loop_head(
        source: &LogicalOperator,
        platform: Arc<SyntheticPlatform>,
    ) -> Result<Self> {
        let roles = source.loop_roles().ok_or_else(|| {
            Error::Plan(format!(
                "operator {} ({}) is not a loop head",
                source.id,
                source.display_name()
            ))
        })?;

        let mut op = Self::imitate(source, platform);
        let slots = LoopHeadSlots {
            initialization_inputs: translate_slots(
                "initialization input",
                &roles.initialization_inputs,
                &op.inputs,
            )?,
            condition_inputs: translate_slots("condition input", &roles.condition_inputs, &op.inputs)?,
            loop_body_inputs: translate_slots("loop-body input", &roles.loop_body_inputs, &op.inputs)?,
            loop_body_outputs: translate_slots(
                "loop-body output",
                &roles.loop_body_outputs,
                &op.outputs,
            )?,
            condition_outputs: translate_slots(
                "condition output",
                &roles.condition_outputs,
                &op.outputs,
            )?,
            final_outputs: translate_slots("final output", &roles.final_outputs, &op.outputs)?,
            num_expected_iterations: roles.num_expected_iterations,
        };
        op.shape = SyntheticShape::LoopHead(slots);
        Ok(op)
    }

    /// Build an operator from raw slot counts that produces exactly
    /// `output_channel`. Used for conversion operators.
    pub fn converter(
        num_inputs: usize,
        num_outputs: usize,
        supports_broadcast_inputs: bool,
        platform: Arc<SyntheticPlatform>,
        output_channel: ChannelDescriptor,
    ) -> Self {
        Self {
            kind: "conversion".to_string(),
            name: None,
            platform,
            inputs: (0..num_inputs)
                .map(|i| InputSlot::new(format!("in{}", i), i))
                .collect(),
            outputs: (0..num_outputs)
                .map(|i| OutputSlot::new(format!("out{}", i), i))
                .collect(),
            supports_broadcast_inputs,
            output_channels: vec![output_channel],
            shape: SyntheticShape::Plain,
            epoch: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Stamp the rewrite epoch this operator was created in.
    pub fn at(mut self, epoch: Epoch) -> Self {
        self.epoch = Some(epoch);
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn epoch(&self) -> Option<Epoch> {
        self.epoch
    }

    pub fn platform(&self) -> &Arc<SyntheticPlatform> {
        &self.platform
    }

    pub fn inputs(&self) -> &[InputSlot] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[OutputSlot] {
        &self.outputs
    }

    pub fn supports_broadcast_inputs(&self) -> bool {
        self.supports_broadcast_inputs
    }

    pub fn output_channels(&self) -> &[ChannelDescriptor] {
        &self.output_channels
    }

    pub fn shape(&self) -> &SyntheticShape {
        &self.shape
    }

    pub fn loop_slots(&self) -> Option<&LoopHeadSlots> {
        match &self.shape {
            SyntheticShape::LoopHead(slots) => Some(slots),
            SyntheticShape::Plain => None,
        }
    }

    pub fn num_expected_iterations(&self) -> Option<u32> {
        self.loop_slots().map(|s| s.num_expected_iterations)
    }

    /// Resolve loop-role input indices to this operator's slots.
    pub fn role_inputs(&self, indices: &[usize]) -> Vec<&InputSlot> {
        indices.iter().filter_map(|&i| self.inputs.get(i)).collect()
    }

    /// Resolve loop-role output indices to this operator's slots.
    pub fn role_outputs(&self, indices: &[usize]) -> Vec<&OutputSlot> {
        indices.iter().filter_map(|&i| self.outputs.get(i)).collect()
    }
}

impl ExecutionOperator for SyntheticOperator {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }

    fn platform_number(&self) -> usize {
        self.platform.number()
    }

    fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    fn is_loop_head(&self) -> bool {
        matches!(self.shape, SyntheticShape::LoopHead(_))
    }

    fn supported_input_channels(&self, index: usize) -> Option<&[ChannelDescriptor]> {
        let slot = self.inputs.get(index)?;
        Some(if slot.broadcast {
            self.platform.broadcast_channels()
        } else {
            self.platform.input_channels()
        })
    }

    fn supported_output_channels(&self, index: usize) -> Option<&[ChannelDescriptor]> {
        self.outputs.get(index)?;
        Some(&self.output_channels)
    }

    fn create_instance(&self) -> Result<Box<dyn RunnableOperator>> {
        Err(Error::UnsupportedExecution(format!(
            "{} cannot be instantiated",
            self
        )))
    }
}

impl fmt::Display for SyntheticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Synthetic[platform {}, {}]",
            self.platform.number(),
            ExecutionOperator::name(self)
        )
    }
}
