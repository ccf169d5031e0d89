//! What the optimizer asks of an execution operator.
//!
//! During planning the optimizer only inspects slot counts and channel
//! support. `create_instance` is reserved for the execution phase.

use mockplat_core::prelude::{ChannelDescriptor, Result};

/// A runnable instance handed to an executor.
pub trait RunnableOperator: Send {
    fn run(&mut self) -> Result<()>;
}

pub trait ExecutionOperator: Send + Sync {
    /// Human-readable operator name.
    fn name(&self) -> &str;

    /// Number of the platform this operator is bound to.
    fn platform_number(&self) -> usize;

    fn num_inputs(&self) -> usize;

    fn num_outputs(&self) -> usize;

    fn is_loop_head(&self) -> bool;

    /// Channel kinds accepted by input `index`; `None` if out of range.
    fn supported_input_channels(&self, index: usize) -> Option<&[ChannelDescriptor]>;

    /// Channel kinds produced by output `index`; `None` if out of range.
    fn supported_output_channels(&self, index: usize) -> Option<&[ChannelDescriptor]>;

    fn create_instance(&self) -> Result<Box<dyn RunnableOperator>>;
}
