use glam::Mat4;

use crate::{
    camera::{Camera, Viewport},
    config::SceneConfig,
    matrix_stack::MatrixStack,
    particle::Particle,
    Error,
};

/// Render target that particles are drawn into.
///
/// Implemented by the WebGL2 [`Renderer`](crate::Renderer); a frame is
/// bracketed by [`begin_frame`](FrameTarget::begin_frame) and
/// [`end_frame`](FrameTarget::end_frame), with one
/// [`draw_quad`](FrameTarget::draw_quad) per particle in between.
pub trait FrameTarget {
    /// Clears the target and uploads the camera projection.
    fn begin_frame(&mut self, viewport: Viewport, camera: &Camera) -> Result<(), Error>;

    /// Draws the shared unit quad with the given model-view transform.
    fn draw_quad(&mut self, model_view: &Mat4) -> Result<(), Error>;

    /// Releases per-frame state.
    fn end_frame(&mut self);
}

/// Requests the next invocation of the frame callback.
pub trait FrameScheduler {
    fn request_frame(&self) -> Result<(), Error>;
}

/// Camera, particles and transform state of a running scene.
///
/// Particles are never removed; the collection grows with every pointer-down
/// for the lifetime of the scene.
#[derive(Debug)]
pub struct SceneState {
    camera: Camera,
    viewport: Viewport,
    particle_depth: f32,
    particles: Vec<Particle>,
    matrix_stack: MatrixStack,
    pointer_down: bool,
}

impl SceneState {
    /// Creates an empty scene for a render target of the given size.
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Result<Self, Error> {
        config.validate()?;

        let camera = Camera::new(config.field_of_view, config.near, config.far, viewport)?;
        Ok(Self {
            camera,
            viewport,
            particle_depth: config.particle_depth,
            particles: Vec::new(),
            matrix_stack: MatrixStack::new(),
            pointer_down: false,
        })
    }

    /// Spawns a particle at screen pixel `(x, y)` and marks the pointer as pressed.
    ///
    /// Nothing is rendered until the next frame.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.pointer_down = true;
        self.particles.push(Particle::new(x, y, self.particle_depth));
        log::info!("particle #{} at ({x}, {y})", self.particles.len());
    }

    pub fn on_pointer_up(&mut self) {
        self.pointer_down = false;
    }

    /// Requests the next frame, then renders the current one.
    ///
    /// The request is made first so a failing frame does not stop the loop.
    pub fn tick(
        &mut self,
        scheduler: &impl FrameScheduler,
        target: &mut impl FrameTarget,
    ) -> Result<(), Error> {
        scheduler.request_frame()?;
        self.render_frame(target)
    }

    /// Renders all particles in insertion order.
    ///
    /// Rebuilds the projection, resets the view to identity and draws one
    /// quad per particle. The first error aborts the rest of the frame.
    pub fn render_frame(&mut self, target: &mut impl FrameTarget) -> Result<(), Error> {
        self.camera.rebuild();
        target.begin_frame(self.viewport, &self.camera)?;
        self.matrix_stack.load(*self.camera.view());

        let result = self.render_particles(target);
        target.end_frame();

        debug_assert_eq!(self.matrix_stack.depth(), 0);
        result
    }

    fn render_particles(&mut self, target: &mut impl FrameTarget) -> Result<(), Error> {
        for particle in &mut self.particles {
            particle.resolve(&self.camera, self.viewport)?;
            particle.render(&mut self.matrix_stack, target)?;
        }

        Ok(())
    }

    /// Particles in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use glam::{Vec2, Vec3};

    use super::*;

    #[derive(Default)]
    struct RecordingTarget {
        frames: usize,
        open: bool,
        draws: Vec<Mat4>,
        projection: Option<Mat4>,
        fail_draws: bool,
    }

    impl FrameTarget for RecordingTarget {
        fn begin_frame(&mut self, _viewport: Viewport, camera: &Camera) -> Result<(), Error> {
            assert!(!self.open, "frame already open");
            self.open = true;
            self.frames += 1;
            self.projection = Some(*camera.projection());
            Ok(())
        }

        fn draw_quad(&mut self, model_view: &Mat4) -> Result<(), Error> {
            assert!(self.open, "draw outside of frame");
            if self.fail_draws {
                return Err(Error::Resource("draw failed".into()));
            }
            self.draws.push(*model_view);
            Ok(())
        }

        fn end_frame(&mut self) {
            self.open = false;
        }
    }

    #[derive(Default)]
    struct CountingScheduler {
        requests: Cell<usize>,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&self) -> Result<(), Error> {
            self.requests.set(self.requests.get() + 1);
            Ok(())
        }
    }

    fn demo_scene() -> SceneState {
        let viewport = Viewport::new(800, 600).unwrap();
        SceneState::new(&SceneConfig::default(), viewport).unwrap()
    }

    fn translation(model_view: &Mat4) -> Vec3 {
        model_view.transform_point3(Vec3::ZERO)
    }

    #[test]
    fn test_pointer_down_appends_in_event_order() {
        let mut scene = demo_scene();
        let clicks = [(10.0, 20.0), (400.0, 300.0), (799.0, 1.0), (10.0, 20.0)];

        for (x, y) in clicks {
            scene.on_pointer_down(x, y);
            scene.on_pointer_up();
        }

        assert_eq!(scene.particle_count(), clicks.len());
        for (particle, (x, y)) in scene.particles().iter().zip(clicks) {
            assert_eq!(particle.spawn_position(), Vec2::new(x, y));
        }
    }

    #[test]
    fn test_pointer_flag_tracks_press_and_release() {
        let mut scene = demo_scene();
        assert!(!scene.is_pointer_down());

        scene.on_pointer_down(1.0, 1.0);
        assert!(scene.is_pointer_down());

        scene.on_pointer_up();
        assert!(!scene.is_pointer_down());
        assert_eq!(scene.particle_count(), 1);
    }

    #[test]
    fn test_pointer_down_does_not_render() {
        let mut scene = demo_scene();
        scene.on_pointer_down(5.0, 5.0);

        assert_eq!(scene.particles()[0].world_position(), Vec3::new(0.0, 0.0, -30.0));
    }

    #[test]
    fn test_render_frame_draws_each_particle_once_in_order() {
        let mut scene = demo_scene();
        scene.on_pointer_down(400.0, 300.0);
        scene.on_pointer_down(0.0, 0.0);
        scene.on_pointer_down(800.0, 600.0);

        let mut target = RecordingTarget::default();
        scene.render_frame(&mut target).unwrap();

        assert_eq!(target.frames, 1);
        assert!(!target.open);
        assert_eq!(target.draws.len(), 3);

        let center = translation(&target.draws[0]);
        assert!(center.x.abs() < 1e-4 && center.y.abs() < 1e-4);
        assert_eq!(center.z, -30.0);

        let top_left = translation(&target.draws[1]);
        assert!(top_left.x < 0.0 && top_left.y > 0.0);

        let bottom_right = translation(&target.draws[2]);
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);

        for (particle, model_view) in scene.particles().iter().zip(&target.draws) {
            assert_eq!(particle.world_position(), translation(model_view));
        }
    }

    #[test]
    fn test_render_frame_rebuilds_projection_and_restores_stack() {
        let mut scene = demo_scene();
        scene.on_pointer_down(100.0, 100.0);

        let mut target = RecordingTarget::default();
        scene.render_frame(&mut target).unwrap();
        scene.render_frame(&mut target).unwrap();

        assert_eq!(target.frames, 2);
        assert_eq!(target.projection, Some(*scene.camera().projection()));
        assert_eq!(scene.matrix_stack.depth(), 0);
        assert_eq!(*scene.matrix_stack.current(), Mat4::IDENTITY);
    }

    #[test]
    fn test_empty_scene_still_clears() {
        let mut scene = demo_scene();
        let mut target = RecordingTarget::default();

        scene.render_frame(&mut target).unwrap();

        assert_eq!(target.frames, 1);
        assert!(target.draws.is_empty());
    }

    #[test]
    fn test_tick_schedules_before_rendering() {
        let mut scene = demo_scene();
        scene.on_pointer_down(1.0, 1.0);

        let scheduler = CountingScheduler::default();
        let mut target = RecordingTarget { fail_draws: true, ..Default::default() };

        assert!(scene.tick(&scheduler, &mut target).is_err());
        assert_eq!(scheduler.requests.get(), 1);
        assert!(!target.open);
        assert_eq!(scene.matrix_stack.depth(), 0);

        target.fail_draws = false;
        scene.tick(&scheduler, &mut target).unwrap();
        assert_eq!(scheduler.requests.get(), 2);
        assert_eq!(target.draws.len(), 1);
    }

    #[test]
    fn test_invalid_config_fails_to_create_scene() {
        let viewport = Viewport::new(800, 600).unwrap();
        let config = SceneConfig { field_of_view: 0.0, ..SceneConfig::default() };

        assert!(SceneState::new(&config, viewport).is_err());
    }
}
