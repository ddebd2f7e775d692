use web_sys::{WebGl2RenderingContext, WebGlBuffer, WebGlVertexArrayObject};

use crate::{error::Error, gl::GL};

/// Unit quad spanning [-1, 1] on X and Y, drawn as a triangle strip.
///
/// Shared by every particle; allocated once at scene initialization.
#[derive(Debug)]
pub(crate) struct QuadGeometry {
    vao: WebGlVertexArrayObject,
    vertices: WebGlBuffer,
}

impl QuadGeometry {
    /// Components per vertex (x, y, z).
    pub(crate) const ITEM_SIZE: i32 = 3;
    pub(crate) const VERTEX_COUNT: i32 = 4;

    #[rustfmt::skip]
    const VERTICES: [f32; 12] = [
         1.0,  1.0, 0.0,
        -1.0,  1.0, 0.0,
         1.0, -1.0, 0.0,
        -1.0, -1.0, 0.0,
    ];

    pub(crate) fn new(gl: &WebGl2RenderingContext, position_attrib: u32) -> Result<Self, Error> {
        let vao = gl.create_vertex_array().ok_or(Error::vertex_array_creation_failed())?;
        gl.bind_vertex_array(Some(&vao));

        let vertices = match create_buffer_f32(gl, GL::ARRAY_BUFFER, &Self::VERTICES, GL::STATIC_DRAW)
        {
            Ok(buffer) => buffer,
            Err(e) => {
                gl.bind_vertex_array(None);
                gl.delete_vertex_array(Some(&vao));
                return Err(e);
            },
        };

        gl.enable_vertex_attrib_array(position_attrib);
        gl.vertex_attrib_pointer_with_i32(position_attrib, Self::ITEM_SIZE, GL::FLOAT, false, 0, 0);

        // unbind VAO to prevent accidental modification
        gl.bind_vertex_array(None);

        Ok(Self { vao, vertices })
    }

    pub(crate) fn bind(&self, gl: &WebGl2RenderingContext) {
        gl.bind_vertex_array(Some(&self.vao));
    }

    pub(crate) fn unbind(&self, gl: &WebGl2RenderingContext) {
        gl.bind_vertex_array(None);
    }

    /// Issues the draw call; the geometry must be bound.
    pub(crate) fn draw(&self, gl: &WebGl2RenderingContext) {
        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, Self::VERTEX_COUNT);
    }

    pub(crate) fn delete(&self, gl: &WebGl2RenderingContext) {
        gl.delete_buffer(Some(&self.vertices));
        gl.delete_vertex_array(Some(&self.vao));
    }
}

fn create_buffer_f32(
    gl: &WebGl2RenderingContext,
    target: u32,
    data: &[f32],
    usage: u32,
) -> Result<WebGlBuffer, Error> {
    let buffer = gl.create_buffer().ok_or(Error::buffer_creation_failed("vbo-f32"))?;

    gl.bind_buffer(target, Some(&buffer));

    // SAFETY: the view is consumed by buffer_data before any allocation can
    // move or grow the wasm memory backing `data`
    unsafe {
        let view = js_sys::Float32Array::view(data);
        gl.buffer_data_with_array_buffer_view(target, &view, usage);
    }

    Ok(buffer)
}
