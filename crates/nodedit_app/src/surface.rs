// SPDX-License-Identifier: MIT OR Apache-2.0
//! egui implementation of the editor surfaces.
//!
//! The grid goes on the canvas painter so node panels cover it. Everything
//! else is painted onto the layer of the node panel shown last, so a node's
//! slots sit above its own panel and below every panel above it. Links and
//! the selection outline come after the last panel and end up on the topmost
//! layer.

use egui::{Color32, PointerButton, Pos2, Rect, Stroke, Vec2};
use nodedit_graph::geometry::{bezier_points, CURVE_SEGMENTS};
use nodedit_graph::{InputSurface, LayoutSurface, NodeId, RenderSurface};

/// Height of the color swatch at the top of each node panel
const SWATCH_HEIGHT: f32 = 25.0;

/// One frame's worth of egui state handed to the editor
pub struct EguiSurface {
    ctx: egui::Context,
    canvas: Rect,
    response: egui::Response,
    background: egui::Painter,
    overlay: egui::Painter,
}

impl EguiSurface {
    /// Wrap the canvas allocated by the central panel
    pub fn new(ctx: &egui::Context, response: egui::Response, background: egui::Painter) -> Self {
        let canvas = response.rect;
        // Before any panel is shown, draw directly above the canvas
        let overlay = background.clone();

        Self {
            ctx: ctx.clone(),
            canvas,
            response,
            background,
            overlay,
        }
    }

    /// Send further overlay drawing to `layer`
    fn paint_on(&mut self, layer: egui::LayerId) {
        self.overlay = self.ctx.layer_painter(layer).with_clip_rect(self.canvas);
    }
}

impl RenderSurface for EguiSurface {
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.overlay.circle_filled(center, radius, color);
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, thickness: f32, color: Color32) {
        self.background
            .line_segment([from, to], Stroke::new(thickness, color));
    }

    fn stroke_curve(&mut self, points: [Pos2; 4], thickness: f32, color: Color32) {
        let points = bezier_points(points, CURVE_SEGMENTS);
        for pair in points.windows(2) {
            self.overlay
                .line_segment([pair[0], pair[1]], Stroke::new(thickness, color));
        }
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color32) {
        self.overlay
            .rect_stroke(rect, 0.0, Stroke::new(thickness, color));
    }
}

impl LayoutSurface for EguiSurface {
    fn canvas(&mut self) -> Option<Rect> {
        (self.canvas.width() > 0.0 && self.canvas.height() > 0.0).then_some(self.canvas)
    }

    fn node_panel(
        &mut self,
        id: NodeId,
        title: &str,
        requested: Rect,
        color: &mut [u8; 4],
        value: f64,
    ) -> Rect {
        let shown = egui::Window::new(title)
            .id(egui::Id::new(("nodedit_node", id.value())))
            .current_pos(requested.min)
            .default_size(requested.size())
            .collapsible(false)
            .resizable(true)
            .constrain_to(self.canvas)
            .show(&self.ctx, |ui| node_content(ui, color, value));

        match shown {
            Some(inner) => {
                self.paint_on(inner.response.layer_id);
                inner.response.rect
            }
            None => requested,
        }
    }

    fn context_menu(&mut self, items: &[&str]) -> Option<usize> {
        let mut picked = None;
        self.response.context_menu(|ui| {
            for (index, item) in items.iter().enumerate() {
                if ui.button(*item).clicked() {
                    picked = Some(index);
                    ui.close_menu();
                }
            }
        });
        picked
    }
}

impl InputSurface for EguiSurface {
    fn pointer_pos(&self) -> Pos2 {
        self.ctx
            .input(|i| i.pointer.hover_pos().or(i.pointer.latest_pos()))
            .unwrap_or_default()
    }

    fn pointer_delta(&self) -> Vec2 {
        self.ctx.input(|i| i.pointer.delta())
    }

    fn pressed_in(&self, button: PointerButton, rect: Rect) -> bool {
        self.ctx.input(|i| {
            i.pointer.button_pressed(button)
                && i.pointer.press_origin().is_some_and(|p| rect.contains(p))
        })
    }

    fn is_down(&self, button: PointerButton) -> bool {
        self.ctx.input(|i| i.pointer.button_down(button))
    }

    fn released(&self, button: PointerButton) -> bool {
        self.ctx.input(|i| i.pointer.button_released(button))
    }
}

/// Color swatch, RGBA editors and the payload readout
fn node_content(ui: &mut egui::Ui, color: &mut [u8; 4], value: f64) {
    let [r, g, b, a] = *color;
    ui.add(
        egui::Button::new("")
            .fill(Color32::from_rgba_unmultiplied(r, g, b, a))
            .min_size(egui::vec2(ui.available_width(), SWATCH_HEIGHT)),
    );

    for (channel, label) in color.iter_mut().zip(["R", "G", "B", "A"]) {
        ui.add(egui::Slider::new(channel, 0..=255).text(label));
    }

    ui.label(format!("value: {value}"));
}
