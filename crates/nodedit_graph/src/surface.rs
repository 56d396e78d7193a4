// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host surfaces the editor drives once per frame.
//!
//! The editor never talks to a window system directly. A host implements these
//! three traits on top of whatever UI toolkit it runs and hands them to
//! [`NodeEditor::frame`](crate::editor::NodeEditor::frame).

use crate::node::NodeId;
use egui::{Color32, PointerButton, Pos2, Rect, Vec2};

/// Drawing primitives, all in screen space
pub trait RenderSurface {
    /// Filled circle centred at `center`
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);

    /// Straight line segment
    fn stroke_line(&mut self, from: Pos2, to: Pos2, thickness: f32, color: Color32);

    /// Cubic bezier through the four control points
    fn stroke_curve(&mut self, points: [Pos2; 4], thickness: f32, color: Color32);

    /// Rectangle outline
    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color32);
}

/// Panel layout
pub trait LayoutSurface {
    /// Screen rectangle available to the editor, or `None` when the editor
    /// window is collapsed or hidden this frame.
    fn canvas(&mut self) -> Option<Rect>;

    /// Show a movable, titled panel for a node at `requested` (screen space)
    /// and return the rectangle it actually occupies.
    ///
    /// The host may move, clamp or resize the panel; the returned rectangle is
    /// authoritative. The panel content edits `color` in place and shows `value`.
    fn node_panel(
        &mut self,
        id: NodeId,
        title: &str,
        requested: Rect,
        color: &mut [u8; 4],
        value: f64,
    ) -> Rect;

    /// Canvas context menu. Returns the index of the item picked this frame.
    fn context_menu(&mut self, items: &[&str]) -> Option<usize>;
}

/// Pointer state for the current frame
pub trait InputSurface {
    /// Current pointer position
    fn pointer_pos(&self) -> Pos2;

    /// Pointer movement since the previous frame
    fn pointer_delta(&self) -> Vec2;

    /// `button` went down this frame with the pointer inside `rect`
    fn pressed_in(&self, button: PointerButton, rect: Rect) -> bool;

    /// `button` is currently held
    fn is_down(&self, button: PointerButton) -> bool;

    /// `button` went up this frame
    fn released(&self, button: PointerButton) -> bool;

    /// Pointer is over `rect`
    fn hovering(&self, rect: Rect) -> bool {
        rect.contains(self.pointer_pos())
    }
}
