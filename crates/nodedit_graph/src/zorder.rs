// SPDX-License-Identifier: MIT OR Apache-2.0
//! Draw and interaction priority of nodes.
//!
//! The order runs from the node interacted with least recently (head) to the
//! one interacted with most recently (tail). The tail is drawn last and wins
//! input priority.

use crate::node::NodeId;
use indexmap::IndexSet;

/// Ordered set of node IDs, head to tail
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZOrder {
    order: IndexSet<NodeId>,
}

impl ZOrder {
    /// Create an empty order
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node at the tail. Returns false if it was already present,
    /// in which case its position is unchanged.
    pub fn append(&mut self, id: NodeId) -> bool {
        self.order.insert(id)
    }

    /// Detach a node from its current position
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.order.shift_remove(&id)
    }

    /// Move a node to the tail. Returns true if the order changed.
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        if self.is_front(id) {
            return false;
        }
        if !self.remove(id) {
            return false;
        }
        self.append(id)
    }

    /// Check whether a node is currently on top
    pub fn is_front(&self, id: NodeId) -> bool {
        self.order.last() == Some(&id)
    }

    /// Node currently on top
    pub fn front(&self) -> Option<NodeId> {
        self.order.last().copied()
    }

    /// Iterate head to tail
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// Check if a node is part of the order
    pub fn contains(&self, id: NodeId) -> bool {
        self.order.contains(&id)
    }

    /// Number of nodes in the order
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the order is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
