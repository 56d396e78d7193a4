// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-frame interaction driver.
//!
//! [`NodeEditor`] is the editor context: it owns the graph and all interaction
//! state, and [`NodeEditor::frame`] runs one UI frame against the host
//! surfaces:
//! - grid
//! - node panels in z-order, with bounds fed back from the resolved panels
//! - slot markers, link gesture start/commit/cancel
//! - committed links
//! - deferred bring-to-front
//! - selection, context menu and panning

use crate::config::EditorConfig;
use crate::geometry::{grid_lines, link_curve, slot_hit_rect, slot_position, LayoutSpace, SlotSide};
use crate::graph::Graph;
use crate::link::Link;
use crate::linking::Linking;
use crate::node::{rgb, NodeId};
use crate::surface::{InputSurface, LayoutSurface, RenderSurface};
use egui::{pos2, vec2, PointerButton, Rect, Vec2};

/// Context-menu entry that adds a node from the configured template
const MENU_NEW: usize = 0;
/// Context-menu entry that toggles the grid
const MENU_GRID: usize = 1;

/// Thickness of the selection outline
const SELECTION_THICKNESS: f32 = 2.0;

/// Context-menu action taken during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    /// A node was added from the template
    AddNode(NodeId),
    /// The grid was switched on or off
    ToggleGrid,
}

/// What a frame changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// The canvas was hidden and nothing was processed
    pub skipped: bool,
    /// Links committed this frame
    pub links_created: Vec<Link>,
    /// Node moved to the top of the z-order
    pub brought_to_front: Option<NodeId>,
    /// A link gesture was abandoned
    pub gesture_cancelled: bool,
    /// Context-menu action
    pub context_action: Option<ContextAction>,
}

/// Node editor state
#[derive(Debug, Clone)]
pub struct NodeEditor {
    /// Nodes, links and z-order
    pub graph: Graph,
    /// Link-drawing gesture
    pub linking: Linking,
    /// Node under the pointer at the last canvas press
    pub selected: Option<NodeId>,
    /// Grid visibility
    pub show_grid: bool,
    /// Canvas scroll offset
    pub scroll: Vec2,
    /// Visual settings
    pub config: EditorConfig,
}

impl NodeEditor {
    /// Create an editor with an empty graph
    pub fn new(mut config: EditorConfig) -> Self {
        config.clamp();
        Self {
            graph: Graph::new(),
            linking: Linking::Idle,
            selected: None,
            show_grid: config.show_grid,
            scroll: Vec2::ZERO,
            config,
        }
    }

    /// Create an editor holding two sources wired into a combiner
    pub fn with_demo_graph(config: EditorConfig) -> Self {
        let mut editor = Self::new(config);
        let size = vec2(180.0, 220.0);
        let red = editor.add_node("Source", Rect::from_min_size(pos2(40.0, 10.0), size), rgb(255, 0, 0), 0, 1);
        let green = editor.add_node("Source", Rect::from_min_size(pos2(40.0, 260.0), size), rgb(0, 255, 0), 0, 1);
        let combine = editor.add_node("Combine", Rect::from_min_size(pos2(400.0, 100.0), size), rgb(0, 0, 255), 2, 2);
        editor.graph.add_link(red, 0, combine, 0);
        editor.graph.add_link(green, 0, combine, 1);
        editor.show_grid = true;
        editor
    }

    /// Add a node on top of the z-order
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        bounds: Rect,
        color: [u8; 4],
        input_count: usize,
        output_count: usize,
    ) -> NodeId {
        self.graph.add_node(name, bounds, color, input_count, output_count)
    }

    /// Run one frame
    pub fn frame<S>(&mut self, surface: &mut S) -> FrameOutcome
    where
        S: RenderSurface + LayoutSurface + InputSurface,
    {
        let mut outcome = FrameOutcome::default();

        let Some(canvas) = surface.canvas() else {
            outcome.skipped = true;
            return outcome;
        };
        let layout = LayoutSpace::new(canvas.min);

        if self.show_grid {
            let color = self.config.grid_color32();
            for [from, to] in grid_lines(canvas, self.scroll, self.config.grid_size) {
                surface.stroke_line(from, to, 1.0, color);
            }
        }

        let pressed_owner = self.process_nodes(surface, &layout, &mut outcome);

        // Anything still in flight was released away from a valid input slot
        if self.linking.is_active() && surface.released(PointerButton::Primary) {
            outcome.gesture_cancelled = self.linking.cancel();
        }

        self.draw_links(surface, &layout);

        if let Some(node_id) = pressed_owner {
            if self.graph.move_to_front(node_id) {
                outcome.brought_to_front = Some(node_id);
            }
        }

        self.update_selection(surface, &layout, canvas);
        outcome.context_action = self.context_menu(surface);

        if surface.hovering(canvas) && surface.is_down(PointerButton::Middle) {
            self.scroll += surface.pointer_delta();
        }

        outcome
    }

    /// Show every node panel bottom to top and drive the link gesture from
    /// its slots. Returns the topmost node that received a press this frame;
    /// reordering is left to the caller so the traversal sees a stable order.
    fn process_nodes<S>(
        &mut self,
        surface: &mut S,
        layout: &LayoutSpace,
        outcome: &mut FrameOutcome,
    ) -> Option<NodeId>
    where
        S: RenderSurface + LayoutSurface + InputSurface,
    {
        let slot_size = self.config.slot_size;
        let slot_color = self.config.slot_color32();
        let link_color = self.config.link_color32();
        let link_thickness = self.config.link_thickness;
        let tangent = self.config.curve_tangent;

        let pointer = surface.pointer_pos();
        let released = surface.released(PointerButton::Primary);
        let mut pressed_owner = None;

        let order: Vec<NodeId> = self.graph.z_order().iter().collect();
        for node_id in order {
            let Some(node) = self.graph.find_node_mut(node_id) else {
                continue;
            };

            let requested = layout.graph_to_screen(node.bounds, self.scroll);
            let panel = surface.node_panel(node_id, &node.name, requested, &mut node.color, node.value);

            // Later nodes sit above earlier ones, so the last hit wins
            if surface.pressed_in(PointerButton::Primary, panel) {
                pressed_owner = Some(node_id);
            }

            node.bounds = layout.screen_to_graph(panel, self.scroll);
            let (input_count, output_count) = (node.input_count, node.output_count);

            for slot in 0..output_count {
                let center = slot_position(panel, SlotSide::Output, slot, output_count);
                surface.fill_circle(center, slot_size / 2.0, slot_color);

                if surface.pressed_in(PointerButton::Primary, slot_hit_rect(center, slot_size)) {
                    self.linking.begin(node_id, slot);
                }

                if self.linking.is_source(node_id, slot) {
                    surface.stroke_curve(link_curve(center, pointer, tangent), link_thickness, link_color);
                }
            }

            for slot in 0..input_count {
                let center = slot_position(panel, SlotSide::Input, slot, input_count);
                surface.fill_circle(center, slot_size / 2.0, slot_color);

                if released && surface.hovering(slot_hit_rect(center, slot_size)) {
                    if let Some(link) = self.linking.try_commit(node_id, slot) {
                        self.graph.add_link(link.from_node, link.from_slot, link.to_node, link.to_slot);
                        outcome.links_created.push(link);
                    }
                }
            }
        }

        pressed_owner
    }

    fn draw_links<S: RenderSurface>(&self, surface: &mut S, layout: &LayoutSpace) {
        let color = self.config.link_color32();
        for link in self.graph.links() {
            let (Some(from), Some(to)) = (
                self.graph.find_node(link.from_node),
                self.graph.find_node(link.to_node),
            ) else {
                tracing::trace!(%link, "Skipping link with missing endpoint");
                continue;
            };

            let from_rect = layout.graph_to_screen(from.bounds, self.scroll);
            let to_rect = layout.graph_to_screen(to.bounds, self.scroll);
            let start = slot_position(from_rect, SlotSide::Output, link.from_slot, from.output_count);
            let end = slot_position(to_rect, SlotSide::Input, link.to_slot, to.input_count);

            surface.stroke_curve(
                link_curve(start, end, self.config.curve_tangent),
                self.config.link_thickness,
                color,
            );
        }
    }

    fn update_selection<S>(&mut self, surface: &mut S, layout: &LayoutSpace, canvas: Rect)
    where
        S: RenderSurface + InputSurface,
    {
        if surface.pressed_in(PointerButton::Primary, canvas) {
            let selected = self.graph.node_at(surface.pointer_pos(), layout, self.scroll);
            if selected != self.selected {
                if let Some(id) = selected {
                    tracing::debug!(node = %id, links = self.graph.links_for_node(id).count(), "Selected node");
                }
                self.selected = selected;
            }
        }

        if let Some(node) = self.selected.and_then(|id| self.graph.find_node(id)) {
            surface.stroke_rect(
                layout.graph_to_screen(node.bounds, self.scroll),
                SELECTION_THICKNESS,
                self.config.selection_color32(),
            );
        }
    }

    fn context_menu<S: LayoutSurface>(&mut self, surface: &mut S) -> Option<ContextAction> {
        let grid_label = if self.show_grid { "Hide Grid" } else { "Show Grid" };
        match surface.context_menu(&["New", grid_label])? {
            MENU_NEW => {
                let template = self.config.new_node.clone();
                let id = self.add_node(
                    template.name.as_str(),
                    template.bounds(),
                    template.color,
                    template.input_count,
                    template.output_count,
                );
                Some(ContextAction::AddNode(id))
            }
            MENU_GRID => {
                self.show_grid = !self.show_grid;
                tracing::debug!(show_grid = self.show_grid, "Toggled grid");
                Some(ContextAction::ToggleGrid)
            }
            _ => None,
        }
    }
}

impl Default for NodeEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
