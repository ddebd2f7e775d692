//! Screen to world coordinate mapping for a perspective camera.
//!
//! Screen space has its origin at the top-left corner of the viewport with Y
//! growing downward. World space is right-handed with Y up and the camera
//! looking down -Z.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::{camera::Viewport, Error};

/// Maps a screen position at an assumed depth to a world-space (x, y) position.
///
/// The screen point `(x, y, depth, 1)` is taken from pixel space to the
/// canonical unit range, multiplied by `depth` to undo the perspective divide
/// (with the Y axis flipped) and finally transformed by the inverse
/// projection. The returned point projects back onto `screen` when placed at
/// `z = -depth`.
///
/// A `depth` of zero is valid and collapses the result onto the camera axis.
///
/// # Errors
/// Returns [`Error::Invariant`] if `projection` is singular.
pub fn unproject(
    screen: Vec2,
    depth: f32,
    viewport: Viewport,
    projection: &Mat4,
) -> Result<Vec2, Error> {
    let screen_to_unit = invert(&unit_to_screen(viewport), "unit-to-screen")?;
    let inverse_projection = invert(projection, "projection")?;

    let unit = screen_to_unit * Vec4::new(screen.x, screen.y, depth, 1.0);

    // screen Y grows downward, world Y grows upward
    let clip = Vec4::new(unit.x * depth, -unit.y * depth, unit.z * depth, 1.0);

    let world = inverse_projection * clip;
    Ok(Vec2::new(world.x, world.y))
}

/// Maps a world-space point to screen pixels; the inverse of [`unproject`]
/// for points in front of the camera.
///
/// Returns `None` for points on the camera plane (`w == 0`).
pub fn project(world: Vec3, viewport: Viewport, projection: &Mat4) -> Option<Vec2> {
    let clip = *projection * world.extend(1.0);
    if clip.w == 0.0 {
        return None;
    }

    let ndc = Vec4::new(clip.x / clip.w, -clip.y / clip.w, clip.z / clip.w, 1.0);
    let screen = unit_to_screen(viewport) * ndc;
    Some(Vec2::new(screen.x, screen.y))
}

/// Scales the unit range [-1, 1] to [0, width] x [0, height], with the
/// unit origin landing on the viewport center.
pub(crate) fn unit_to_screen(viewport: Viewport) -> Mat4 {
    let (half_width, half_height) = viewport.center();

    Mat4::from_translation(Vec3::new(half_width, half_height, 0.0))
        * Mat4::from_scale(Vec3::new(half_width, half_height, 1.0))
}

fn invert(matrix: &Mat4, name: &str) -> Result<Mat4, Error> {
    let det = matrix.determinant();
    if det == 0.0 || !det.is_finite() {
        return Err(Error::singular_matrix(name));
    }

    Ok(matrix.inverse())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const DEPTH: f32 = 30.0;

    fn perspective(fov_degrees: f32, viewport: Viewport) -> Mat4 {
        Mat4::perspective_rh_gl(fov_degrees.to_radians(), viewport.aspect_ratio(), 0.1, 100.0)
    }

    fn demo_setup() -> (Viewport, Mat4) {
        let viewport = Viewport::new(800, 600).unwrap();
        (viewport, perspective(45.0, viewport))
    }

    #[test]
    fn test_unit_to_screen_layout() {
        let viewport = Viewport::new(800, 600).unwrap();
        let cols = unit_to_screen(viewport).to_cols_array();

        #[rustfmt::skip]
        let expected = [
            400.0,   0.0, 0.0, 0.0,
              0.0, 300.0, 0.0, 0.0,
              0.0,   0.0, 1.0, 0.0,
            400.0, 300.0, 0.0, 1.0,
        ];
        assert_eq!(cols, expected);
    }

    #[test]
    fn test_center_click_maps_to_camera_axis() {
        let (viewport, projection) = demo_setup();

        let world = unproject(Vec2::new(400.0, 300.0), DEPTH, viewport, &projection).unwrap();

        assert!(world.x.abs() < 1e-4, "x = {}", world.x);
        assert!(world.y.abs() < 1e-4, "y = {}", world.y);
    }

    #[test]
    fn test_top_left_click_is_left_and_up() {
        let (viewport, projection) = demo_setup();

        let world = unproject(Vec2::new(0.0, 0.0), DEPTH, viewport, &projection).unwrap();

        assert!(world.x < 0.0, "x = {}", world.x);
        assert!(world.y > 0.0, "y = {}", world.y);
    }

    #[test]
    fn test_screen_y_above_center_gives_positive_world_y() {
        let (viewport, projection) = demo_setup();

        let above = unproject(Vec2::new(400.0, 100.0), DEPTH, viewport, &projection).unwrap();
        let below = unproject(Vec2::new(400.0, 500.0), DEPTH, viewport, &projection).unwrap();

        assert!(above.y > 0.0);
        assert!(below.y < 0.0);
        assert!((above.y + below.y).abs() < 1e-4);
    }

    #[test]
    fn test_corner_lands_on_frustum_edge() {
        let (viewport, projection) = demo_setup();

        let world = unproject(Vec2::new(800.0, 0.0), DEPTH, viewport, &projection).unwrap();

        // half height of the frustum at distance d is d * tan(fov / 2)
        let half_height = DEPTH * 22.5_f32.to_radians().tan();
        let half_width = half_height * viewport.aspect_ratio();
        assert!((world.x - half_width).abs() < 1e-3, "x = {}", world.x);
        assert!((world.y - half_height).abs() < 1e-3, "y = {}", world.y);
    }

    #[test]
    fn test_zero_depth_collapses_to_camera_axis() {
        let (viewport, projection) = demo_setup();

        let world = unproject(Vec2::new(13.0, 577.0), 0.0, viewport, &projection).unwrap();

        assert!(world.abs().max_element() < 1e-6, "{world}");
    }

    #[test]
    fn test_singular_projection_is_rejected() {
        let viewport = Viewport::new(800, 600).unwrap();

        let result = unproject(Vec2::new(1.0, 1.0), DEPTH, viewport, &Mat4::ZERO);

        assert!(matches!(result, Err(Error::Invariant(_))));
    }

    #[test]
    fn test_project_rejects_points_on_camera_plane() {
        let (viewport, projection) = demo_setup();

        assert_eq!(project(Vec3::new(1.0, 1.0, 0.0), viewport, &projection), None);
    }

    proptest! {
        #[test]
        fn prop_unproject_then_project_round_trips(
            width in 1u32..4096,
            height in 1u32..4096,
            fov in 10.0f32..120.0,
            fx in 0.0f32..=1.0,
            fy in 0.0f32..=1.0,
            depth in 1.0f32..90.0,
        ) {
            let viewport = Viewport::new(width, height).unwrap();
            let projection = perspective(fov, viewport);
            let screen = Vec2::new(fx * width as f32, fy * height as f32);

            let world = unproject(screen, depth, viewport, &projection).unwrap();
            let back = project(world.extend(-depth), viewport, &projection).unwrap();

            let tolerance = 1e-3 * width.max(height) as f32;
            prop_assert!((back - screen).abs().max_element() < tolerance,
                "{} -> {} -> {}", screen, world, back);
        }
    }
}
