use std::borrow::Cow;

use glam::Mat4;
use web_sys::{HtmlCanvasElement, WebGlUniformLocation};

use crate::{
    camera::{Camera, Viewport},
    config::{rgb_components, SceneConfig, ShaderSource},
    error::Error,
    gl::{context::GlState, QuadGeometry, ShaderProgram, GL},
    js,
    scene::FrameTarget,
};

/// WebGL2 renderer for the particle scene.
///
/// The `Renderer` owns the WebGL2 rendering context, the canvas, the particle
/// shader program and the shared quad geometry. It implements [`FrameTarget`],
/// clearing the canvas at the start of each frame and issuing one
/// triangle-strip draw per particle.
#[derive(Debug)]
pub struct Renderer {
    gl: web_sys::WebGl2RenderingContext,
    canvas: web_sys::HtmlCanvasElement,
    state: GlState,
    clear_color: (f32, f32, f32),
    pipeline: ParticlePipeline,
}

impl Renderer {
    /// Creates a new renderer by querying for a canvas element with the given selector.
    ///
    /// # Parameters
    /// * `canvas_id` - CSS selector for the canvas element (e.g., "canvas" or "#my-canvas")
    /// * `config` - Scene configuration providing colors and shader sources
    ///
    /// # Errors
    /// * `Error::Initialization` - Canvas element not found or WebGL2 unavailable
    /// * `Error::Shader` - Shader sources missing, or failing to compile or link
    pub fn create(canvas_id: &str, config: &SceneConfig) -> Result<Self, Error> {
        let canvas = js::get_canvas_by_id(canvas_id)?;
        Self::create_with_canvas(canvas, config)
    }

    /// Creates a new renderer from an existing HTML canvas element.
    ///
    /// Acquires the WebGL2 context, compiles and links the particle shader
    /// program, allocates the quad geometry, sets the clear color and enables
    /// depth testing.
    pub fn create_with_canvas(
        canvas: HtmlCanvasElement,
        config: &SceneConfig,
    ) -> Result<Self, Error> {
        let gl = js::get_webgl2_context(&canvas)?;
        let pipeline = ParticlePipeline::new(&gl, &config.shaders, config.particle_color)?;

        let mut state = GlState::new();
        let clear_color = rgb_components(config.clear_color);
        let (r, g, b) = clear_color;
        state.clear_color(&gl, r, g, b, 1.0).depth_test(&gl, true);

        let (width, height) = (canvas.width() as i32, canvas.height() as i32);
        state.viewport(&gl, 0, 0, width, height);

        Ok(Self { gl, canvas, state, clear_color, pipeline })
    }

    /// Returns the render target dimensions.
    ///
    /// # Errors
    /// Fails when the canvas has a zero width or height.
    pub fn viewport(&self) -> Result<Viewport, Error> {
        Viewport::new(self.canvas.width(), self.canvas.height())
    }

    /// Returns a reference to the WebGL2 rendering context.
    pub fn gl(&self) -> &GL {
        &self.gl
    }

    /// Returns a reference to the canvas element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Returns the current canvas dimensions as a tuple.
    pub fn canvas_size(&self) -> (i32, i32) {
        (self.canvas.width() as i32, self.canvas.height() as i32)
    }
}

impl FrameTarget for Renderer {
    fn begin_frame(&mut self, viewport: Viewport, camera: &Camera) -> Result<(), Error> {
        let (r, g, b) = self.clear_color;
        self.state
            .viewport(&self.gl, 0, 0, viewport.width() as i32, viewport.height() as i32)
            .clear_color(&self.gl, r, g, b, 1.0);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        self.pipeline.prepare(&self.gl, camera.projection());
        Ok(())
    }

    fn draw_quad(&mut self, model_view: &Mat4) -> Result<(), Error> {
        self.pipeline.draw(&self.gl, model_view);
        Ok(())
    }

    fn end_frame(&mut self) {
        self.pipeline.cleanup(&self.gl);
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.pipeline.delete(&self.gl);
    }
}

/// Shader program, uniform locations and geometry for flat-colored quads.
#[derive(Debug)]
struct ParticlePipeline {
    shader: ShaderProgram,
    quad: QuadGeometry,
    projection_loc: WebGlUniformLocation,
    model_view_loc: WebGlUniformLocation,
    color_loc: WebGlUniformLocation,
    color: [f32; 4],
}

impl ParticlePipeline {
    const FRAGMENT_GLSL: &'static str = include_str!("../../shaders/particle.frag");
    const VERTEX_GLSL: &'static str = include_str!("../../shaders/particle.vert");

    fn new(gl: &GL, shaders: &ShaderSource, color: u32) -> Result<Self, Error> {
        let (vertex_src, fragment_src) = Self::sources(shaders)?;

        let shader = ShaderProgram::create(gl, &vertex_src, &fragment_src)?;
        shader.use_program(gl);

        let position_attrib = shader.attrib_location(gl, "a_position")?;
        let quad = QuadGeometry::new(gl, position_attrib)?;

        let (r, g, b) = rgb_components(color);
        Ok(Self {
            projection_loc: shader.uniform_location(gl, "u_projection")?,
            model_view_loc: shader.uniform_location(gl, "u_model_view")?,
            color_loc: shader.uniform_location(gl, "u_color")?,
            shader,
            quad,
            color: [r, g, b, 1.0],
        })
    }

    fn sources(shaders: &ShaderSource) -> Result<(Cow<'static, str>, Cow<'static, str>), Error> {
        match shaders {
            ShaderSource::Embedded => {
                Ok((Self::VERTEX_GLSL.into(), Self::FRAGMENT_GLSL.into()))
            },
            ShaderSource::Dom { vertex_id, fragment_id } => Ok((
                js::shader_source_by_id(vertex_id)?.into(),
                js::shader_source_by_id(fragment_id)?.into(),
            )),
        }
    }

    fn prepare(&self, gl: &GL, projection: &Mat4) {
        self.shader.use_program(gl);
        self.quad.bind(gl);

        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.projection_loc),
            false,
            &projection.to_cols_array(),
        );
        let [r, g, b, a] = self.color;
        gl.uniform4f(Some(&self.color_loc), r, g, b, a);
    }

    fn draw(&self, gl: &GL, model_view: &Mat4) {
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.model_view_loc),
            false,
            &model_view.to_cols_array(),
        );
        self.quad.draw(gl);
    }

    fn cleanup(&self, gl: &GL) {
        self.quad.unbind(gl);
    }

    fn delete(&self, gl: &GL) {
        self.quad.delete(gl);
        gl.delete_program(Some(&self.shader.program));
    }
}
