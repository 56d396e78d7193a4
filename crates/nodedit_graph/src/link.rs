// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link (edge) definitions for the graph.

use crate::node::NodeId;
use std::fmt;

/// A directed link from an output slot to an input slot.
///
/// `from_*` always names the output slot the gesture started on and `to_*`
/// the input slot it was dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    /// Source node ID
    pub from_node: NodeId,
    /// Output slot index on the source node
    pub from_slot: usize,
    /// Target node ID
    pub to_node: NodeId,
    /// Input slot index on the target node
    pub to_slot: usize,
}

impl Link {
    /// Create a new link
    pub fn new(from_node: NodeId, from_slot: usize, to_node: NodeId, to_slot: usize) -> Self {
        Self {
            from_node,
            from_slot,
            to_node,
            to_slot,
        }
    }

    /// Check if this link involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from_node == node_id || self.to_node == node_id
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{}",
            self.from_node, self.from_slot, self.to_node, self.to_slot
        )
    }
}
