// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph editor.

use crate::geometry::{slot_position, SlotSide};
use egui::{Color32, Pos2, Rect};
use std::fmt;

/// Unique identifier for a node.
///
/// Identifiers are handed out in increasing order by the graph that owns the
/// node and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Get the raw ID value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the graph
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Display name, used as the panel title
    pub name: String,
    /// Last known rectangle in graph space
    pub bounds: Rect,
    /// RGBA color, one byte per channel
    pub color: [u8; 4],
    /// Number of input slots on the left edge
    pub input_count: usize,
    /// Number of output slots on the right edge
    pub output_count: usize,
    /// Free payload carried along with the node
    pub value: f64,
}

impl Node {
    /// Create a node with a zero payload
    pub fn new(
        id: NodeId,
        name: impl Into<String>,
        bounds: Rect,
        color: [u8; 4],
        input_count: usize,
        output_count: usize,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            bounds,
            color,
            input_count,
            output_count,
            value: 0.0,
        }
    }

    /// Node color as an egui color
    pub fn color32(&self) -> Color32 {
        let [r, g, b, a] = self.color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    /// Graph-space centre of an input slot
    pub fn input_slot(&self, index: usize) -> Pos2 {
        slot_position(self.bounds, SlotSide::Input, index, self.input_count)
    }

    /// Graph-space centre of an output slot
    pub fn output_slot(&self, index: usize) -> Pos2 {
        slot_position(self.bounds, SlotSide::Output, index, self.output_count)
    }
}

/// Opaque RGB helper matching the channel layout of [`Node::color`]
pub const fn rgb(r: u8, g: u8, b: u8) -> [u8; 4] {
    [r, g, b, 255]
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn combine() -> Node {
        Node::new(
            NodeId(2),
            "Combine",
            Rect::from_min_size(pos2(400.0, 100.0), vec2(180.0, 220.0)),
            rgb(0, 0, 255),
            2,
            2,
        )
    }

    #[test]
    fn test_node_creation() {
        let node = combine();
        assert_eq!(node.value, 0.0);
        assert_eq!(node.name, "Combine");
        assert_eq!(node.color32(), Color32::from_rgb(0, 0, 255));
        assert_eq!(node.id.to_string(), "#2");
    }

    #[test]
    fn test_slot_helpers_use_bounds() {
        let node = combine();
        let first = node.input_slot(0);
        let second = node.input_slot(1);
        assert_eq!(first.x, 400.0);
        assert!(first.y < second.y);
        assert_eq!(node.output_slot(0).x, 580.0);
    }
}
