// SPDX-License-Identifier: MIT OR Apache-2.0
//! Coordinate spaces and slot geometry.
//!
//! Three spaces are involved:
//! - graph space: node bounds, independent of scroll and window placement
//! - layout space: graph space minus the scroll offset, relative to the canvas origin
//! - screen space: absolute pixel coordinates
//!
//! Everything that needs a slot position (drawing, hit-testing, link curves)
//! goes through [`slot_position`] so all of them agree.

use egui::{Pos2, Rect, Vec2};

/// Number of straight segments used to approximate a link curve
pub const CURVE_SEGMENTS: usize = 32;

/// Free-form layout space anchored at the canvas origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSpace {
    /// Screen position of the layout-space origin
    pub origin: Pos2,
}

impl LayoutSpace {
    /// Create a layout space whose origin sits at `origin` on screen
    pub fn new(origin: Pos2) -> Self {
        Self { origin }
    }

    /// Layout-space point to screen
    pub fn to_screen(&self, local: Pos2) -> Pos2 {
        local + self.origin.to_vec2()
    }

    /// Screen point to layout space
    pub fn to_local(&self, screen: Pos2) -> Pos2 {
        screen - self.origin.to_vec2()
    }

    /// Layout-space rectangle to screen
    pub fn rect_to_screen(&self, local: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(local.min), self.to_screen(local.max))
    }

    /// Screen rectangle to layout space
    pub fn rect_to_local(&self, screen: Rect) -> Rect {
        Rect::from_min_max(self.to_local(screen.min), self.to_local(screen.max))
    }

    /// Graph-space bounds to the screen rectangle they occupy under `scroll`
    pub fn graph_to_screen(&self, bounds: Rect, scroll: Vec2) -> Rect {
        self.rect_to_screen(bounds.translate(-scroll))
    }

    /// Screen rectangle back to graph space under `scroll`
    pub fn screen_to_graph(&self, screen: Rect, scroll: Vec2) -> Rect {
        self.rect_to_local(screen).translate(scroll)
    }
}

/// Which edge of a node a slot sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotSide {
    /// Left edge, receives links
    Input,
    /// Right edge, starts links
    Output,
}

/// Centre of slot `index` out of `count`, evenly spaced along one edge of `rect`.
///
/// Slots are 1-indexed along the edge: with `count` slots the edge is divided
/// into `count + 1` equal steps and the first slot sits one step below the top.
pub fn slot_position(rect: Rect, side: SlotSide, index: usize, count: usize) -> Pos2 {
    let spacing = rect.height() / (count + 1) as f32;
    let x = match side {
        SlotSide::Input => rect.left(),
        SlotSide::Output => rect.right(),
    };
    Pos2::new(x, rect.top() + spacing * (index + 1) as f32)
}

/// Square hit area of side `size` centred on a slot
pub fn slot_hit_rect(center: Pos2, size: f32) -> Rect {
    Rect::from_center_size(center, Vec2::splat(size))
}

/// Control points of the curve drawn between an output slot and an input slot
pub fn link_curve(from: Pos2, to: Pos2, tangent: f32) -> [Pos2; 4] {
    [
        from,
        Pos2::new(from.x + tangent, from.y),
        Pos2::new(to.x - tangent, to.y),
        to,
    ]
}

/// Upper bound on grid lines emitted along one axis
pub const MAX_GRID_LINES: usize = 4096;

/// Grid line segments covering `canvas`, shifted by `scroll`.
///
/// Every line lies inside the canvas. At most [`MAX_GRID_LINES`] lines are
/// produced per axis, whatever the cell size.
pub fn grid_lines(canvas: Rect, scroll: Vec2, cell: f32) -> Vec<[Pos2; 2]> {
    if !(cell.is_finite() && cell > 0.0) {
        return Vec::new();
    }

    let x0 = (canvas.left() - scroll.x).rem_euclid(cell);
    let y0 = (canvas.top() - scroll.y).rem_euclid(cell);
    let columns = line_count(canvas.width() - x0, cell);
    let rows = line_count(canvas.height() - y0, cell);

    let mut lines = Vec::with_capacity(columns + rows);
    for k in 0..columns {
        let x = canvas.left() + x0 + k as f32 * cell;
        lines.push([Pos2::new(x, canvas.top()), Pos2::new(x, canvas.bottom())]);
    }
    for k in 0..rows {
        let y = canvas.top() + y0 + k as f32 * cell;
        lines.push([Pos2::new(canvas.left(), y), Pos2::new(canvas.right(), y)]);
    }
    lines
}

/// Lines at `0, cell, 2 * cell, ..` strictly below `extent`
fn line_count(extent: f32, cell: f32) -> usize {
    if extent <= 0.0 {
        return 0;
    }
    // float to usize saturates, NaN becomes 0
    ((extent / cell).ceil() as usize).min(MAX_GRID_LINES)
}

/// Generate points along a cubic bezier curve
pub fn bezier_points(curve: [Pos2; 4], segments: usize) -> Vec<Pos2> {
    let [p0, p1, p2, p3] = curve;
    let segments = segments.max(1);
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = mt3 * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t3 * p3.x;
        let y = mt3 * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t3 * p3.y;

        points.push(Pos2::new(x, y));
    }
    points
}
