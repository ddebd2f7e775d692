use std::{cell::RefCell, rc::Rc};

use compact_str::CompactString;

use crate::{
    config::{SceneConfig, ShaderSource},
    frame_loop::FrameLoop,
    input::PointerInputHandler,
    Error, Renderer, SceneState,
};

/// Interactive particle scene bound to a canvas.
///
/// `Scene` ties together the WebGL2 [`Renderer`], the [`SceneState`], pointer
/// input and the animation frame loop. Clicking or tapping the canvas spawns a
/// particle which is drawn at the click position, a fixed distance in front of
/// the camera, on every subsequent frame.
///
/// # Examples
///
/// ```rust,no_run
/// use clickfield_renderer::Scene;
///
/// let scene = Scene::builder("#canvas")
///     .field_of_view(45.0)
///     .particle_depth(30.0)
///     .build()?;
///
/// // keep rendering for the lifetime of the page
/// scene.detach();
/// # Ok::<(), clickfield_renderer::Error>(())
/// ```
#[derive(Debug)]
pub struct Scene {
    state: Rc<RefCell<SceneState>>,
    renderer: Rc<RefCell<Renderer>>,
    input: PointerInputHandler,
    frame_loop: Rc<FrameLoop>,
}

impl Scene {
    /// Creates a new scene builder with the specified canvas source.
    ///
    /// # Parameters
    /// * `canvas` - Canvas identifier (CSS selector) or `HtmlCanvasElement`
    #[allow(private_bounds)]
    pub fn builder(canvas: impl Into<CanvasSource>) -> SceneBuilder {
        SceneBuilder::new(canvas.into())
    }

    /// Spawns a particle at canvas pixel `(x, y)`, exactly as a pointer-down would.
    pub fn spawn_particle(&self, x: f32, y: f32) {
        self.state.borrow_mut().on_pointer_down(x, y);
    }

    /// Returns the number of spawned particles.
    pub fn particle_count(&self) -> usize {
        self.state.borrow().particle_count()
    }

    /// Whether a pointer is currently pressed.
    pub fn is_pointer_down(&self) -> bool {
        self.state.borrow().is_pointer_down()
    }

    /// Returns the shared scene state.
    pub fn state(&self) -> Rc<RefCell<SceneState>> {
        self.state.clone()
    }

    /// Renders a single frame immediately, outside the animation loop.
    pub fn render_frame(&self) -> Result<(), Error> {
        let mut renderer = self.renderer.borrow_mut();
        self.state.borrow_mut().render_frame(&mut *renderer)
    }

    /// Returns the size of the canvas in pixels.
    pub fn canvas_size(&self) -> (i32, i32) {
        self.renderer.borrow().canvas_size()
    }

    /// Keeps the scene running for the remaining lifetime of the page.
    ///
    /// Without this, dropping the `Scene` stops the frame loop and removes the
    /// input listeners.
    pub fn detach(self) {
        std::mem::forget(self);
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.frame_loop.stop();
        log::info!("scene stopped with {} particles", self.state.borrow().particle_count());
    }
}

/// Canvas source for scene initialization.
///
/// Supports both CSS selector strings and direct `HtmlCanvasElement` references.
enum CanvasSource {
    /// CSS selector string for canvas lookup (e.g., "#scene", "canvas").
    Id(CompactString),
    /// Direct reference to an existing canvas element.
    Element(web_sys::HtmlCanvasElement),
}

/// Builder for configuring and creating a [`Scene`].
///
/// [`build`](SceneBuilder::build) performs the full initialization: WebGL2
/// context acquisition, shader compilation, geometry allocation, input
/// registration and scheduling of the first frame.
pub struct SceneBuilder {
    canvas: CanvasSource,
    config: SceneConfig,
}

impl SceneBuilder {
    fn new(canvas: CanvasSource) -> Self {
        SceneBuilder { canvas, config: SceneConfig::default() }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the vertical field of view in degrees.
    pub fn field_of_view(mut self, degrees: f32) -> Self {
        self.config.field_of_view = degrees;
        self
    }

    /// Sets the near and far clip plane distances.
    pub fn clip_planes(mut self, near: f32, far: f32) -> Self {
        self.config.near = near;
        self.config.far = far;
        self
    }

    /// Sets the distance in front of the camera at which particles spawn.
    pub fn particle_depth(mut self, depth: f32) -> Self {
        self.config.particle_depth = depth;
        self
    }

    /// Sets the background color, as 0xRRGGBB.
    pub fn clear_color(mut self, color: u32) -> Self {
        self.config.clear_color = color;
        self
    }

    /// Sets the particle color, as 0xRRGGBB.
    pub fn particle_color(mut self, color: u32) -> Self {
        self.config.particle_color = color;
        self
    }

    /// Reads shader sources from the text content of the given DOM elements
    /// instead of the embedded defaults.
    pub fn shaders_from_dom(mut self, vertex_id: &str, fragment_id: &str) -> Self {
        self.config.shaders = ShaderSource::Dom {
            vertex_id: vertex_id.into(),
            fragment_id: fragment_id.into(),
        };
        self
    }

    /// Builds and starts the scene.
    ///
    /// # Errors
    /// Fails without starting the frame loop if the configuration is invalid,
    /// the canvas or WebGL2 context is unavailable, the shaders fail to
    /// compile or link, or listeners cannot be registered.
    pub fn build(self) -> Result<Scene, Error> {
        self.config.validate()?;

        let renderer = match self.canvas {
            CanvasSource::Id(id) => Renderer::create(&id, &self.config)?,
            CanvasSource::Element(element) => Renderer::create_with_canvas(element, &self.config)?,
        };
        let viewport = renderer.viewport()?;

        let state = Rc::new(RefCell::new(SceneState::new(&self.config, viewport)?));
        let input = PointerInputHandler::new(renderer.canvas(), state.clone())?;
        let renderer = Rc::new(RefCell::new(renderer));

        let frame_loop = {
            let state = state.clone();
            let renderer = renderer.clone();
            FrameLoop::start(move |frame_loop| {
                let mut renderer = renderer.borrow_mut();
                if let Err(e) = state.borrow_mut().tick(frame_loop, &mut *renderer) {
                    log::error!("frame aborted: {e}");
                }
            })?
        };

        log::info!(
            "scene ready: {}x{} canvas, fov {}°, clip {}..{}, particle depth {}",
            viewport.width(),
            viewport.height(),
            self.config.field_of_view,
            self.config.near,
            self.config.far,
            self.config.particle_depth,
        );

        Ok(Scene { state, renderer, input, frame_loop })
    }
}

impl From<&str> for CanvasSource {
    fn from(id: &str) -> Self {
        CanvasSource::Id(id.into())
    }
}

impl From<web_sys::HtmlCanvasElement> for CanvasSource {
    fn from(element: web_sys::HtmlCanvasElement) -> Self {
        CanvasSource::Element(element)
    }
}

impl<'a> From<&'a web_sys::HtmlCanvasElement> for CanvasSource {
    fn from(value: &'a web_sys::HtmlCanvasElement) -> Self {
        value.clone().into()
    }
}
