// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph store: owns the nodes, the links and the z-order over the nodes.

use crate::geometry::LayoutSpace;
use crate::link::Link;
use crate::node::{Node, NodeId};
use crate::zorder::ZOrder;
use egui::{Pos2, Rect, Vec2};
use indexmap::IndexMap;

/// A node graph
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Nodes in creation order
    nodes: IndexMap<NodeId, Node>,
    /// Links in creation order
    links: Vec<Link>,
    /// Draw/interaction priority over `nodes`
    z_order: ZOrder,
    /// Next node ID to hand out
    next_id: u32,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and put it on top of the z-order
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        bounds: Rect,
        color: [u8; 4],
        input_count: usize,
        output_count: usize,
    ) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        debug_assert!(!self.z_order.contains(id));

        let node = Node::new(id, name, bounds, color, input_count, output_count);
        tracing::debug!(node = %id, name = %node.name, input_count, output_count, "Added node");
        self.nodes.insert(id, node);
        self.z_order.append(id);
        id
    }

    /// Record a link. Endpoints are not checked; duplicates are allowed.
    /// Returns the index of the new link.
    pub fn add_link(
        &mut self,
        from_node: NodeId,
        from_slot: usize,
        to_node: NodeId,
        to_slot: usize,
    ) -> usize {
        let link = Link::new(from_node, from_slot, to_node, to_slot);
        tracing::debug!(%link, "Added link");
        self.links.push(link);
        self.links.len() - 1
    }

    /// Get a node by ID
    pub fn find_node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn find_node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all nodes from bottom to top
    pub fn nodes_in_z_order(&self) -> impl Iterator<Item = &Node> {
        self.z_order.iter().filter_map(move |id| self.nodes.get(&id))
    }

    /// Draw/interaction order
    pub fn z_order(&self) -> &ZOrder {
        &self.z_order
    }

    /// Bring a node to the top. Returns true if the order changed.
    pub fn move_to_front(&mut self, node_id: NodeId) -> bool {
        let moved = self.z_order.move_to_front(node_id);
        if moved {
            tracing::debug!(node = %node_id, "Brought node to front");
        }
        moved
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get all links
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Get links involving a node
    pub fn links_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.involves_node(node_id))
    }

    /// Topmost node whose on-screen rectangle contains `pos`
    pub fn node_at(&self, pos: Pos2, layout: &LayoutSpace, scroll: Vec2) -> Option<NodeId> {
        if self.z_order.is_empty() {
            return None;
        }
        self.z_order.iter().rev().find(|id| {
            self.nodes
                .get(id)
                .is_some_and(|n| layout.graph_to_screen(n.bounds, scroll).contains(pos))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::rgb;
    use egui::{pos2, vec2};

    fn rect(x: f32, y: f32) -> Rect {
        Rect::from_min_size(pos2(x, y), vec2(180.0, 220.0))
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut graph = Graph::new();
        let ids: Vec<_> = (0..5)
            .map(|i| graph.add_node(format!("n{i}"), rect(0.0, 0.0), rgb(0, 0, 0), 1, 1))
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ids[0], NodeId(0));
    }

    #[test]
    fn test_z_order_matches_store() {
        let mut graph = Graph::new();
        for i in 0..4 {
            graph.add_node("n", rect(i as f32 * 10.0, 0.0), rgb(0, 0, 0), 0, 1);
        }
        graph.move_to_front(NodeId(1));
        graph.move_to_front(NodeId(0));
        graph.move_to_front(NodeId(0));

        assert_eq!(graph.z_order().len(), graph.node_count());
        for node in graph.nodes() {
            assert!(graph.z_order().contains(node.id));
        }
        let order: Vec<_> = graph.nodes_in_z_order().map(|n| n.id.0).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_move_to_front_of_tail_is_noop() {
        let mut graph = Graph::new();
        graph.add_node("a", rect(0.0, 0.0), rgb(0, 0, 0), 0, 1);
        let b = graph.add_node("b", rect(0.0, 0.0), rgb(0, 0, 0), 0, 1);
        let before: Vec<_> = graph.z_order().iter().collect();
        assert!(!graph.move_to_front(b));
        let after: Vec<_> = graph.z_order().iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_demo_scenario() {
        let mut graph = Graph::new();
        graph.add_node("Source", rect(40.0, 10.0), rgb(255, 0, 0), 0, 1);
        graph.add_node("Source", rect(40.0, 260.0), rgb(0, 255, 0), 0, 1);
        graph.add_node("Combine", rect(400.0, 100.0), rgb(0, 0, 255), 2, 2);
        graph.add_link(NodeId(0), 0, NodeId(2), 0);
        graph.add_link(NodeId(1), 0, NodeId(2), 1);

        let combine = graph.find_node(NodeId(2)).expect("combine node");
        assert_eq!(combine.name, "Combine");
        assert_eq!(combine.input_count, 2);
        assert_eq!(
            graph.links(),
            &[
                Link::new(NodeId(0), 0, NodeId(2), 0),
                Link::new(NodeId(1), 0, NodeId(2), 1),
            ]
        );
        assert_eq!(graph.links_for_node(NodeId(2)).count(), 2);
        assert_eq!(graph.links_for_node(NodeId(0)).count(), 1);
    }

    #[test]
    fn test_find_missing_node() {
        let graph = Graph::new();
        assert!(graph.find_node(NodeId(0)).is_none());
    }

    #[test]
    fn test_duplicate_links_allowed() {
        let mut graph = Graph::new();
        assert_eq!(graph.add_link(NodeId(0), 0, NodeId(1), 0), 0);
        assert_eq!(graph.add_link(NodeId(0), 0, NodeId(1), 0), 1);
        assert_eq!(graph.link_count(), 2);
    }

    #[test]
    fn test_node_at_prefers_topmost() {
        let mut graph = Graph::new();
        let a = graph.add_node("a", rect(0.0, 0.0), rgb(0, 0, 0), 0, 1);
        let b = graph.add_node("b", rect(100.0, 0.0), rgb(0, 0, 0), 0, 1);
        let layout = LayoutSpace::new(pos2(0.0, 0.0));

        assert_eq!(graph.node_at(pos2(150.0, 50.0), &layout, Vec2::ZERO), Some(b));
        graph.move_to_front(a);
        assert_eq!(graph.node_at(pos2(150.0, 50.0), &layout, Vec2::ZERO), Some(a));
        assert_eq!(graph.node_at(pos2(250.0, 50.0), &layout, Vec2::ZERO), Some(b));
        assert_eq!(graph.node_at(pos2(50.0, 500.0), &layout, Vec2::ZERO), None);
        // scrolling moves nodes on screen
        assert_eq!(graph.node_at(pos2(120.0, 50.0), &layout, vec2(100.0, 0.0)), Some(b));
    }
}
