//! Logical operators as the optimizer presents them to the harness.
//!
//! Only the connection topology matters here: how many regular inputs and
//! outputs an operator has, which inputs are broadcasts, and (for loop heads)
//! which slots play which loop role. Payload types are carried as opaque
//! names so substitutes can erase them.

use serde::{Deserialize, Serialize};

use crate::id::OpId;

/// Element type of the data flowing through a slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlotType {
    /// Type-erased.
    #[default]
    None,
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSlot {
    pub name: String,
    pub index: usize,
    pub broadcast: bool,
    pub data_type: SlotType,
}

impl InputSlot {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            broadcast: false,
            data_type: SlotType::None,
        }
    }

    /// Same name, index, and broadcast flag; payload type dropped.
    pub fn erased_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            index: self.index,
            broadcast: self.broadcast,
            data_type: SlotType::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSlot {
    pub name: String,
    pub index: usize,
    pub data_type: SlotType,
}

impl OutputSlot {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            data_type: SlotType::None,
        }
    }

    pub fn erased_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            index: self.index,
            data_type: SlotType::None,
        }
    }
}

/// Role assignment of a loop-head operator's slots, by slot index.
///
/// Roles may overlap (one input can be both a loop-body and a condition
/// input).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoopRoles {
    pub initialization_inputs: Vec<usize>,
    pub condition_inputs: Vec<usize>,
    pub loop_body_inputs: Vec<usize>,
    pub loop_body_outputs: Vec<usize>,
    pub condition_outputs: Vec<usize>,
    pub final_outputs: Vec<usize>,
    pub num_expected_iterations: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorShape {
    Plain,
    LoopHead(LoopRoles),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalOperator {
    pub id: OpId,
    /// Stable operator kind, e.g. "map" or "do_while".
    pub kind: String,
    pub name: Option<String>,
    /// Regular inputs first, then broadcast inputs.
    pub inputs: Vec<InputSlot>,
    pub num_regular_inputs: usize,
    pub outputs: Vec<OutputSlot>,
    pub supports_broadcast_inputs: bool,
    pub shape: OperatorShape,
}

impl LogicalOperator {
    /// Plain operator with `num_inputs` regular inputs and `num_outputs`
    /// outputs named `in<i>` / `out<i>`.
    pub fn new(id: OpId, kind: impl Into<String>, num_inputs: usize, num_outputs: usize) -> Self {
        Self {
            id,
            kind: kind.into(),
            name: None,
            inputs: (0..num_inputs)
                .map(|i| InputSlot::new(format!("in{}", i), i))
                .collect(),
            num_regular_inputs: num_inputs,
            outputs: (0..num_outputs)
                .map(|i| OutputSlot::new(format!("out{}", i), i))
                .collect(),
            supports_broadcast_inputs: false,
            shape: OperatorShape::Plain,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn supporting_broadcasts(mut self) -> Self {
        self.supports_broadcast_inputs = true;
        self
    }

    pub fn with_loop_roles(mut self, roles: LoopRoles) -> Self {
        self.shape = OperatorShape::LoopHead(roles);
        self
    }

    /// Name the regular input/output slots (in order).
    pub fn with_slot_names(mut self, inputs: &[&str], outputs: &[&str]) -> Self {
        for (slot, name) in self.inputs.iter_mut().zip(inputs) {
            slot.name = (*name).to_string();
        }
        for (slot, name) in self.outputs.iter_mut().zip(outputs) {
            slot.name = (*name).to_string();
        }
        self
    }

    /// Append a broadcast input after the existing inputs.
    pub fn with_broadcast_input(mut self, name: impl Into<String>) -> Self {
        let index = self.inputs.len();
        let mut slot = InputSlot::new(name, index);
        slot.broadcast = true;
        self.inputs.push(slot);
        self
    }

    pub fn num_regular_inputs(&self) -> usize {
        self.num_regular_inputs
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_loop_head(&self) -> bool {
        matches!(self.shape, OperatorShape::LoopHead(_))
    }

    pub fn loop_roles(&self) -> Option<&LoopRoles> {
        match &self.shape {
            OperatorShape::LoopHead(roles) => Some(roles),
            OperatorShape::Plain => None,
        }
    }

    /// Explicit name if set, else the kind.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }
}
