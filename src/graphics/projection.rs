// graphics/projection.rs

use crate::config::road::{CAMERA_HEIGHT, FIELD_OF_VIEW_DEG, ROAD_HALF_WIDTH};

/// Screen-space result of projecting one world point. `scale == 0.0` marks
/// a point at or behind the camera plane; callers must not render it.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    /// Projected road half-width at this depth; also the pixels-per-unit
    /// factor for everything with a lateral offset.
    pub half_width: f64,
}

impl ScreenPoint {
    pub fn hidden() -> Self {
        ScreenPoint {
            x: 0.0,
            y: 0.0,
            scale: 0.0,
            half_width: 0.0,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.scale <= 0.0
    }
}

/// Camera state for one frame, derived from the player and discarded;
/// nothing persists between renders.
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub depth: f64,
}

impl Camera {
    /// Places the camera behind the player for this frame.
    pub fn follow(player_x: f64, position: f64) -> Self {
        Camera {
            x: player_x * ROAD_HALF_WIDTH,
            y: CAMERA_HEIGHT,
            z: position,
            depth: camera_depth(),
        }
    }
}

/// Depth-of-field plane distance for the configured field of view.
pub fn camera_depth() -> f64 {
    1.0 / (FIELD_OF_VIEW_DEG.to_radians() / 2.0).tan()
}

/// Camera lookahead: the player car sits this far ahead of the camera.
pub fn player_z() -> f64 {
    CAMERA_HEIGHT * camera_depth()
}

/// Projects a world point into screen space: camera-space translation,
/// perspective divide, then viewport mapping with y inverted so higher
/// world points land higher on screen. This is the only perspective math
/// in the crate; it knows nothing about segments or gameplay.
pub fn project(
    world_x: f64,
    world_y: f64,
    world_z: f64,
    camera: &Camera,
    viewport_w: f64,
    viewport_h: f64,
    road_half_width: f64,
) -> ScreenPoint {
    let cam_x = world_x - camera.x;
    let cam_y = world_y - camera.y;
    let cam_z = world_z - camera.z;
    if cam_z <= 0.0 {
        return ScreenPoint::hidden();
    }
    let scale = camera.depth / cam_z;
    let half_w = viewport_w / 2.0;
    let half_h = viewport_h / 2.0;
    ScreenPoint {
        x: half_w + scale * cam_x * half_w,
        y: half_h - scale * cam_y * half_h,
        scale,
        half_width: scale * road_half_width * half_w,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(z: f64) -> Camera {
        Camera {
            x: 0.0,
            y: CAMERA_HEIGHT,
            z,
            depth: camera_depth(),
        }
    }

    #[test]
    fn points_behind_the_camera_are_hidden() {
        let camera = camera_at(1000.0);
        assert!(project(0.0, 0.0, 999.0, &camera, 1024.0, 768.0, 2000.0).is_hidden());
        assert!(project(0.0, 0.0, 1000.0, &camera, 1024.0, 768.0, 2000.0).is_hidden());
        assert!(!project(0.0, 0.0, 1001.0, &camera, 1024.0, 768.0, 2000.0).is_hidden());
    }

    #[test]
    fn centerline_points_project_to_center_x() {
        let camera = camera_at(0.0);
        let p = project(0.0, 0.0, 4000.0, &camera, 1024.0, 768.0, 2000.0);
        assert_eq!(p.x, 512.0);
    }

    #[test]
    fn nearer_points_project_larger_and_lower() {
        let camera = camera_at(0.0);
        let near = project(0.0, 0.0, 2000.0, &camera, 1024.0, 768.0, 2000.0);
        let far = project(0.0, 0.0, 20_000.0, &camera, 1024.0, 768.0, 2000.0);
        assert!(near.scale > far.scale);
        assert!(near.half_width > far.half_width);
        // the road surface is below the camera, so nearer means further
        // down the screen
        assert!(near.y > far.y);
        assert!(far.y > 768.0 / 2.0);
    }

    #[test]
    fn y_axis_is_inverted() {
        let camera = camera_at(0.0);
        let low = project(0.0, 0.0, 4000.0, &camera, 1024.0, 768.0, 2000.0);
        let high = project(0.0, 500.0, 4000.0, &camera, 1024.0, 768.0, 2000.0);
        assert!(high.y < low.y);
    }

    #[test]
    fn perspective_divide_matches_definition() {
        let camera = camera_at(0.0);
        let p = project(0.0, 0.0, 5000.0, &camera, 1024.0, 768.0, 2000.0);
        assert!((p.scale - camera.depth / 5000.0).abs() < 1e-12);
        assert!((p.half_width - p.scale * 2000.0 * 512.0).abs() < 1e-9);
    }
}
