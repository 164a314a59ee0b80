//! Wireframe generation for boxes

use glam::Vec3;

use super::projection::{ViewTransform, Viewport, draw_clipped_segment};
use super::vertex::{LineSink, LineStyle, tag_color};
use crate::sim::{Aabb, BOX_EDGES, BoxInstance};

/// Interior lines per direction on the platform's top face
pub const PLATFORM_GRID_DIVISIONS: usize = 5;

/// Draw the 12 edges of a box. Returns how many survived clipping.
pub fn box_edges<S: LineSink + ?Sized>(
    bounds: &Aabb,
    style: LineStyle,
    view: &ViewTransform,
    viewport: Viewport,
    sink: &mut S,
) -> usize {
    let corners = bounds.corners();
    BOX_EDGES
        .iter()
        .filter(|&&(i, j)| {
            draw_clipped_segment(corners[i], corners[j], view, viewport, style, sink)
        })
        .count()
}

/// Grid lines across a box's top face, dividing it into equal strips
///
/// Each direction gets `divisions - 1` lines, interpolated between opposite
/// top edges.
pub fn top_grid<S: LineSink + ?Sized>(
    bounds: &Aabb,
    divisions: usize,
    style: LineStyle,
    view: &ViewTransform,
    viewport: Viewport,
    sink: &mut S,
) -> usize {
    let c = bounds.corners();
    let (back_left, back_right, front_right, front_left) = (c[3], c[2], c[6], c[7]);
    let mut drawn = 0;

    for step in 1..divisions {
        let t = step as f32 / divisions as f32;
        let segments: [(Vec3, Vec3); 2] = [
            (back_left.lerp(back_right, t), front_left.lerp(front_right, t)),
            (back_left.lerp(front_left, t), back_right.lerp(front_right, t)),
        ];
        for (a, b) in segments {
            if draw_clipped_segment(a, b, view, viewport, style, sink) {
                drawn += 1;
            }
        }
    }

    drawn
}

/// The platform: bold outline plus a grid on top
pub fn platform<S: LineSink + ?Sized>(
    instance: &BoxInstance,
    view: &ViewTransform,
    viewport: Viewport,
    sink: &mut S,
) -> usize {
    let color = tag_color(instance.tag);
    let bounds = &instance.bounds;
    let outline = box_edges(bounds, LineStyle::bold(color), view, viewport, sink);
    let grid = top_grid(
        bounds,
        PLATFORM_GRID_DIVISIONS,
        LineStyle::thin(color),
        view,
        viewport,
        sink,
    );
    outline + grid
}

/// A player or obstacle cube: thin outline in its tag color
pub fn cube<S: LineSink + ?Sized>(
    instance: &BoxInstance,
    view: &ViewTransform,
    viewport: Viewport,
    sink: &mut S,
) -> usize {
    let style = LineStyle::thin(tag_color(instance.tag));
    box_edges(&instance.bounds, style, view, viewport, sink)
}
