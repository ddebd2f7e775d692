use glam::{Vec2, Vec3};

use crate::{
    camera::{Camera, Viewport},
    matrix_stack::MatrixStack,
    scene::FrameTarget,
    unproject::unproject,
    Error,
};

/// A screen-anchored quad spawned by a click or tap.
///
/// The world-space X and Y are derived from the spawn coordinates and
/// recomputed from the current camera every frame; Z is fixed at
/// `-depth` for the lifetime of the particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    spawn: Vec2,
    depth: f32,
    world: Vec3,
}

impl Particle {
    /// Creates a particle anchored at screen pixel `(x, y)`, `depth` units in
    /// front of the camera.
    pub fn new(x: f32, y: f32, depth: f32) -> Self {
        Self {
            spawn: Vec2::new(x, y),
            depth,
            world: Vec3::new(0.0, 0.0, -depth),
        }
    }

    /// Screen coordinates of the originating pointer event.
    pub fn spawn_position(&self) -> Vec2 {
        self.spawn
    }

    /// Distance in front of the camera at which the particle is placed.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// World position as of the last [`resolve`](Particle::resolve).
    pub fn world_position(&self) -> Vec3 {
        self.world
    }

    /// Recomputes the world position from the camera's current projection.
    pub fn resolve(&mut self, camera: &Camera, viewport: Viewport) -> Result<Vec3, Error> {
        let xy = unproject(self.spawn, self.depth, viewport, camera.projection())?;
        self.world = xy.extend(-self.depth);
        Ok(self.world)
    }

    /// Draws the particle's quad translated to its world position.
    ///
    /// The translation is applied inside a nested matrix scope which is
    /// released whether or not the draw call succeeds.
    pub fn render(&self, stack: &mut MatrixStack, target: &mut impl FrameTarget) -> Result<(), Error> {
        let mut scope = stack.scope();
        scope.translate(self.world);
        target.draw_quad(scope.current())
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;

    #[derive(Default)]
    struct FailingTarget {
        attempts: usize,
    }

    impl FrameTarget for FailingTarget {
        fn begin_frame(&mut self, _viewport: Viewport, _camera: &Camera) -> Result<(), Error> {
            Ok(())
        }

        fn draw_quad(&mut self, _model_view: &Mat4) -> Result<(), Error> {
            self.attempts += 1;
            Err(Error::Resource("lost context".into()))
        }

        fn end_frame(&mut self) {}
    }

    fn demo_camera() -> (Camera, Viewport) {
        let viewport = Viewport::new(800, 600).unwrap();
        (Camera::new(45.0, 0.1, 100.0, viewport).unwrap(), viewport)
    }

    #[test]
    fn test_new_particle_sits_at_fixed_depth() {
        let particle = Particle::new(10.0, 20.0, 30.0);

        assert_eq!(particle.spawn_position(), Vec2::new(10.0, 20.0));
        assert_eq!(particle.world_position().z, -30.0);
    }

    #[test]
    fn test_resolve_center_click() {
        let (camera, viewport) = demo_camera();
        let mut particle = Particle::new(400.0, 300.0, 30.0);

        let world = particle.resolve(&camera, viewport).unwrap();

        assert!(world.x.abs() < 1e-4);
        assert!(world.y.abs() < 1e-4);
        assert_eq!(world.z, -30.0);
        assert_eq!(particle.world_position(), world);
    }

    #[test]
    fn test_resolve_top_left_click() {
        let (camera, viewport) = demo_camera();
        let mut particle = Particle::new(0.0, 0.0, 30.0);

        let world = particle.resolve(&camera, viewport).unwrap();

        assert!(world.x < 0.0);
        assert!(world.y > 0.0);
        assert_eq!(world.z, -30.0);
    }

    #[test]
    fn test_render_releases_scope_when_draw_fails() {
        let mut stack = MatrixStack::new();
        let mut target = FailingTarget::default();
        let particle = Particle::new(0.0, 0.0, 30.0);

        assert!(particle.render(&mut stack, &mut target).is_err());

        assert_eq!(target.attempts, 1);
        assert_eq!(stack.depth(), 0);
        assert_eq!(*stack.current(), Mat4::IDENTITY);
    }
}
