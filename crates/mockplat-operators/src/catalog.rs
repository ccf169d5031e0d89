//! Representative logical operators, one per common operator kind.
//!
//! Mappings are generated per (catalog entry, platform), so the catalog
//! decides which parts of a real plan the optimizer can move onto synthetic
//! platforms. Payload types are irrelevant; only slot shapes matter.

use mockplat_core::prelude::{IdGenerator, LogicalOperator, LoopRoles};

/// Expected iteration count carried by the catalog's loop heads.
pub const EXPECTED_ITERATIONS: u32 = 20;

/// `(kind, regular inputs, outputs, accepts broadcasts)` for plain operators.
const PLAIN: &[(&str, usize, usize, bool)] = &[
    ("cartesian", 2, 1, false),
    ("co_group", 2, 1, false),
    ("collection_source", 0, 1, false),
    ("count", 1, 1, false),
    ("distinct", 1, 1, false),
    ("filter", 1, 1, true),
    ("flat_map", 1, 1, true),
    ("global_materialized_group", 1, 1, false),
    ("global_reduce", 1, 1, false),
    ("group_by", 1, 1, false),
    ("intersect", 2, 1, false),
    ("join", 2, 1, false),
    ("local_callback_sink", 1, 0, false),
    ("map", 1, 1, true),
    ("map_partitions", 1, 1, true),
    ("materialized_group_by", 1, 1, false),
    ("reduce_by", 1, 1, false),
    ("reduce", 1, 1, false),
    ("sample", 1, 1, true),
    ("sort", 1, 1, false),
    ("table_source", 0, 1, false),
    ("text_file_sink", 1, 0, false),
    ("text_file_source", 0, 1, false),
    ("union_all", 2, 1, false),
    ("zip_with_id", 1, 1, false),
];

pub fn do_while(ids: &IdGenerator) -> LogicalOperator {
    LogicalOperator::new(ids.next_op(), "do_while", 3, 2)
        .supporting_broadcasts()
        .with_slot_names(&["initIn", "iterIn", "convergenceIn"], &["iterOut", "finalOut"])
        .with_loop_roles(LoopRoles {
            initialization_inputs: vec![0],
            condition_inputs: vec![2],
            loop_body_inputs: vec![1, 2],
            loop_body_outputs: vec![0],
            condition_outputs: vec![],
            final_outputs: vec![1],
            num_expected_iterations: EXPECTED_ITERATIONS,
        })
}

pub fn loop_op(ids: &IdGenerator) -> LogicalOperator {
    LogicalOperator::new(ids.next_op(), "loop", 4, 3)
        .supporting_broadcasts()
        .with_slot_names(
            &["initIn", "initConvergenceIn", "iterIn", "convergenceIn"],
            &["iterOut", "finalOut", "convergenceOut"],
        )
        .with_loop_roles(LoopRoles {
            initialization_inputs: vec![0, 1],
            condition_inputs: vec![3],
            loop_body_inputs: vec![2],
            loop_body_outputs: vec![0],
            condition_outputs: vec![2],
            final_outputs: vec![1],
            num_expected_iterations: EXPECTED_ITERATIONS,
        })
}

pub fn repeat(ids: &IdGenerator) -> LogicalOperator {
    LogicalOperator::new(ids.next_op(), "repeat", 2, 2)
        .with_slot_names(&["initIn", "iterIn"], &["iterOut", "finalOut"])
        .with_loop_roles(LoopRoles {
            initialization_inputs: vec![0],
            condition_inputs: vec![],
            loop_body_inputs: vec![1],
            loop_body_outputs: vec![0],
            condition_outputs: vec![],
            final_outputs: vec![1],
            num_expected_iterations: EXPECTED_ITERATIONS,
        })
}

/// The 28 built-in template operators, ids drawn from `ids`, sorted by kind.
pub fn default_catalog(ids: &IdGenerator) -> Vec<LogicalOperator> {
    let mut ops: Vec<LogicalOperator> = PLAIN
        .iter()
        .map(|&(kind, inputs, outputs, broadcasts)| {
            let op = LogicalOperator::new(ids.next_op(), kind, inputs, outputs);
            if broadcasts {
                op.supporting_broadcasts()
            } else {
                op
            }
        })
        .collect();
    ops.push(do_while(ids));
    ops.push(loop_op(ids));
    ops.push(repeat(ids));
    ops.sort_by(|a, b| a.kind.cmp(&b.kind));
    ops
}
