//! Wireframe rendering module
//!
//! Turns a [`FrameSnapshot`] into screen-space line segments. The renderer
//! never touches live simulation state and owns no GPU resources: any
//! surface that implements [`LineSink`] can receive the output.

pub mod projection;
pub mod shapes;
pub mod vertex;

pub use projection::{ViewTransform, Viewport, clip_segment, draw_clipped_segment, project};
pub use vertex::{LineSink, LineStyle, LineVertex, ScreenLine, colors, tag_color};

use crate::sim::FrameSnapshot;

/// Draw one frame: platform, player, then every obstacle.
/// Returns how many segments reached the sink.
pub fn render_frame<S: LineSink + ?Sized>(
    frame: &FrameSnapshot,
    viewport: Viewport,
    sink: &mut S,
) -> usize {
    let view = ViewTransform::new(frame.camera.position, frame.camera.yaw, frame.camera.pitch);

    let mut drawn = shapes::platform(&frame.platform, &view, viewport, sink);
    drawn += shapes::cube(&frame.player, &view, viewport, sink);
    for obstacle in &frame.obstacles {
        drawn += shapes::cube(obstacle, &view, viewport, sink);
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;
    use glam::Vec3;

    #[test]
    fn test_default_frame_shows_platform_and_player() {
        let state = GameState::new(1);
        let mut vertices: Vec<LineVertex> = Vec::new();
        let drawn = render_frame(&state.snapshot(), Viewport::default(), &mut vertices);
        assert_eq!(drawn, 12 + 8 + 12);
        assert_eq!(vertices.len(), drawn * 2);
    }

    #[test]
    fn test_player_projects_near_screen_center() {
        let state = GameState::new(1);
        let mut lines: Vec<ScreenLine> = Vec::new();
        render_frame(&state.snapshot(), Viewport::default(), &mut lines);
        let player: Vec<_> = lines
            .iter()
            .filter(|l| l.style.color == colors::PLAYER)
            .collect();
        assert_eq!(player.len(), 12);
        let sum: glam::Vec2 = player.iter().map(|l| l.a + l.b).sum();
        let centroid = sum / (player.len() * 2) as f32;
        let offset = centroid - Viewport::default().center();
        assert!(offset.length() < 10.0, "{centroid}");
    }

    #[test]
    fn test_obstacle_behind_camera_is_culled() {
        let mut state = GameState::new(1);
        // Default camera sits on the -Z side of the player, looking toward +Z
        state
            .world
            .spawn_obstacle(Vec3::new(0.0, 340.0, 1000.0), Vec3::new(0.0, 0.0, -3.0));
        state
            .world
            .spawn_obstacle(Vec3::new(0.0, 340.0, -1000.0), Vec3::new(0.0, 0.0, 3.0));
        let mut lines: Vec<ScreenLine> = Vec::new();
        render_frame(&state.snapshot(), Viewport::default(), &mut lines);
        let obstacle_lines = lines
            .iter()
            .filter(|l| l.style.color == colors::OBSTACLE)
            .count();
        assert_eq!(obstacle_lines, 12);
    }
}
