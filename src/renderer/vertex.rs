//! Line output types handed to the rendering surface

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::DisplayTag;

/// Screen-space line vertex, two per segment (line-list topology)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub width: f32,
}

impl LineVertex {
    pub const fn new(x: f32, y: f32, style: LineStyle) -> Self {
        Self {
            position: [x, y],
            color: style.color,
            width: style.width,
        }
    }
}

/// Stroke color and width for a line
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub color: [f32; 4],
    pub width: f32,
}

impl LineStyle {
    pub const fn thin(color: [f32; 4]) -> Self {
        Self { color, width: 1.0 }
    }

    pub const fn bold(color: [f32; 4]) -> Self {
        Self { color, width: 3.0 }
    }
}

/// A projected line, for surfaces that want segments rather than vertex pairs
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenLine {
    pub a: Vec2,
    pub b: Vec2,
    pub style: LineStyle,
}

/// Anything that can receive projected line segments
pub trait LineSink {
    fn line(&mut self, a: Vec2, b: Vec2, style: LineStyle);
}

impl LineSink for Vec<LineVertex> {
    fn line(&mut self, a: Vec2, b: Vec2, style: LineStyle) {
        self.push(LineVertex::new(a.x, a.y, style));
        self.push(LineVertex::new(b.x, b.y, style));
    }
}

impl LineSink for Vec<ScreenLine> {
    fn line(&mut self, a: Vec2, b: Vec2, style: LineStyle) {
        self.push(ScreenLine { a, b, style });
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLATFORM: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const PLAYER: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const OBSTACLE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
}

/// Stroke color for a display tag
pub fn tag_color(tag: DisplayTag) -> [f32; 4] {
    match tag {
        DisplayTag::Platform => colors::PLATFORM,
        DisplayTag::Player => colors::PLAYER,
        DisplayTag::Obstacle => colors::OBSTACLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_buffer_layout() {
        let mut vertices: Vec<LineVertex> = Vec::new();
        let style = LineStyle::bold(colors::PLATFORM);
        vertices.line(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), style);
        assert_eq!(vertices.len(), 2);
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<LineVertex>());
        assert_eq!(std::mem::size_of::<LineVertex>(), 7 * 4);
        assert_eq!(vertices[1].position, [3.0, 4.0]);
        assert_eq!(vertices[0].width, 3.0);
    }
}
