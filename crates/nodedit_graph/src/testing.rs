// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless surface for driving [`NodeEditor`](crate::editor::NodeEditor) in tests.

use crate::node::NodeId;
use crate::surface::{InputSurface, LayoutSurface, RenderSurface};
use egui::{Color32, PointerButton, Pos2, Rect, Vec2};
use std::collections::HashMap;

/// Replays scripted pointer state and records every draw call
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    /// Canvas rectangle, `None` for a collapsed window
    pub canvas: Option<Rect>,
    /// Pointer position
    pub pointer: Pos2,
    /// Pointer movement this frame
    pub delta: Vec2,
    /// Buttons that went down this frame
    pub pressed: Vec<PointerButton>,
    /// Buttons held
    pub down: Vec<PointerButton>,
    /// Buttons that went up this frame
    pub released: Vec<PointerButton>,
    /// Context-menu item to pick this frame
    pub menu_pick: Option<usize>,
    /// Panels the host resolves somewhere other than requested
    pub panel_overrides: HashMap<NodeId, Rect>,

    /// Requested panel rectangles, in call order
    pub requested_panels: Vec<(NodeId, Rect)>,
    /// Slot marker centres
    pub circles: Vec<Pos2>,
    /// Straight lines
    pub lines: Vec<[Pos2; 2]>,
    /// Curves
    pub curves: Vec<[Pos2; 4]>,
    /// Rectangle outlines
    pub rects: Vec<Rect>,
    /// Items offered by the last context menu
    pub menu_items: Vec<String>,
}

impl ScriptedSurface {
    /// Visible canvas
    pub fn new(canvas: Rect) -> Self {
        Self {
            canvas: Some(canvas),
            ..Self::default()
        }
    }

    /// Collapsed editor window
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Primary button goes down at `pos`
    pub fn press(&mut self, pos: Pos2) {
        self.pointer = pos;
        self.pressed.push(PointerButton::Primary);
        self.down.push(PointerButton::Primary);
    }

    /// Primary button goes up at `pos`
    pub fn release(&mut self, pos: Pos2) {
        self.pointer = pos;
        self.down.retain(|b| *b != PointerButton::Primary);
        self.released.push(PointerButton::Primary);
    }

    /// Forget per-frame events and recorded draws
    pub fn next_frame(&mut self) {
        self.delta = Vec2::ZERO;
        self.pressed.clear();
        self.released.clear();
        self.menu_pick = None;
        self.requested_panels.clear();
        self.circles.clear();
        self.lines.clear();
        self.curves.clear();
        self.rects.clear();
    }
}

impl RenderSurface for ScriptedSurface {
    fn fill_circle(&mut self, center: Pos2, _radius: f32, _color: Color32) {
        self.circles.push(center);
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, _thickness: f32, _color: Color32) {
        self.lines.push([from, to]);
    }

    fn stroke_curve(&mut self, points: [Pos2; 4], _thickness: f32, _color: Color32) {
        self.curves.push(points);
    }

    fn stroke_rect(&mut self, rect: Rect, _thickness: f32, _color: Color32) {
        self.rects.push(rect);
    }
}

impl LayoutSurface for ScriptedSurface {
    fn canvas(&mut self) -> Option<Rect> {
        self.canvas
    }

    fn node_panel(
        &mut self,
        id: NodeId,
        _title: &str,
        requested: Rect,
        _color: &mut [u8; 4],
        _value: f64,
    ) -> Rect {
        self.requested_panels.push((id, requested));
        self.panel_overrides.get(&id).copied().unwrap_or(requested)
    }

    fn context_menu(&mut self, items: &[&str]) -> Option<usize> {
        self.menu_items = items.iter().map(|s| (*s).to_string()).collect();
        self.menu_pick
    }
}

impl InputSurface for ScriptedSurface {
    fn pointer_pos(&self) -> Pos2 {
        self.pointer
    }

    fn pointer_delta(&self) -> Vec2 {
        self.delta
    }

    fn pressed_in(&self, button: PointerButton, rect: Rect) -> bool {
        self.pressed.contains(&button) && rect.contains(self.pointer)
    }

    fn is_down(&self, button: PointerButton) -> bool {
        self.down.contains(&button)
    }

    fn released(&self, button: PointerButton) -> bool {
        self.released.contains(&button)
    }
}
