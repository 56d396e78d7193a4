// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link-drawing gesture.
//!
//! A press on an output slot starts a gesture, a release over an input slot of
//! another node commits it, and any other release cancels it.

use crate::link::Link;
use crate::node::NodeId;

/// State of the connection-drawing gesture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Linking {
    /// No gesture in flight
    #[default]
    Idle,
    /// Dragging from an output slot
    Dragging {
        /// Node the gesture started on
        source: NodeId,
        /// Output slot index on the source node
        slot: usize,
    },
}

impl Linking {
    /// Start a gesture from an output slot.
    ///
    /// A gesture already in flight is replaced.
    pub fn begin(&mut self, source: NodeId, slot: usize) {
        if let Self::Dragging {
            source: old_source,
            slot: old_slot,
        } = *self
        {
            tracing::debug!(from = %old_source, from_slot = old_slot, "Link gesture reassigned");
        }
        tracing::debug!(from = %source, slot, "Link gesture started");
        *self = Self::Dragging { source, slot };
    }

    /// Drop the gesture on an input slot.
    ///
    /// Returns the link to commit and goes back to idle when the target is a
    /// different node than the source. Dropping on the source node itself, or
    /// when no gesture is in flight, returns `None` and changes nothing.
    pub fn try_commit(&mut self, target: NodeId, target_slot: usize) -> Option<Link> {
        let Self::Dragging { source, slot } = *self else {
            return None;
        };
        if source == target {
            return None;
        }
        *self = Self::Idle;
        Some(Link::new(source, slot, target, target_slot))
    }

    /// Abandon the gesture. Returns true if one was in flight.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        if was_active {
            tracing::debug!("Link gesture cancelled");
        }
        *self = Self::Idle;
        was_active
    }

    /// Whether a gesture is in flight
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Output slot the current gesture started on
    pub fn source(&self) -> Option<(NodeId, usize)> {
        match *self {
            Self::Idle => None,
            Self::Dragging { source, slot } => Some((source, slot)),
        }
    }

    /// Whether the gesture started on this exact output slot
    pub fn is_source(&self, node: NodeId, slot: usize) -> bool {
        self.source() == Some((node, slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_to_other_node() {
        let mut linking = Linking::default();
        linking.begin(NodeId(0), 0);
        assert!(linking.is_active());
        assert!(linking.is_source(NodeId(0), 0));

        let link = linking.try_commit(NodeId(1), 1);
        assert_eq!(link, Some(Link::new(NodeId(0), 0, NodeId(1), 1)));
        assert_eq!(linking, Linking::Idle);
    }

    #[test]
    fn test_self_link_rejected() {
        let mut linking = Linking::default();
        linking.begin(NodeId(3), 1);
        assert_eq!(linking.try_commit(NodeId(3), 0), None);
        assert!(linking.is_active());
        assert!(linking.cancel());
        assert!(!linking.is_active());
    }

    #[test]
    fn test_commit_without_gesture() {
        let mut linking = Linking::default();
        assert_eq!(linking.try_commit(NodeId(1), 0), None);
        assert!(!linking.cancel());
    }

    #[test]
    fn test_new_press_reassigns_gesture() {
        let mut linking = Linking::default();
        linking.begin(NodeId(0), 0);
        linking.begin(NodeId(1), 2);
        assert_eq!(linking.source(), Some((NodeId(1), 2)));
        assert_eq!(
            linking.try_commit(NodeId(0), 0),
            Some(Link::new(NodeId(1), 2, NodeId(0), 0))
        );
    }
}
