use web_sys::{WebGl2RenderingContext, WebGlProgram, WebGlShader, WebGlUniformLocation};

use crate::{error::Error, gl::GL};

/// A linked vertex + fragment shader program.
#[derive(Debug)]
pub(crate) struct ShaderProgram {
    pub(crate) program: WebGlProgram,
}

impl ShaderProgram {
    pub(crate) fn create(
        gl: &WebGl2RenderingContext,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, Error> {
        let program = gl.create_program().ok_or(Error::shader_program_creation_failed())?;

        // compile shaders
        let vertex_shader = compile_shader(gl, ShaderType::Vertex, vertex_source)?;
        let fragment_shader = compile_shader(gl, ShaderType::Fragment, fragment_source)?;

        // attach shaders and link program
        gl.attach_shader(&program, &vertex_shader);
        gl.attach_shader(&program, &fragment_shader);
        gl.link_program(&program);
        let linked = check_link_status(gl, &program);

        // delete shaders (no longer needed after linking)
        gl.delete_shader(Some(&vertex_shader));
        gl.delete_shader(Some(&fragment_shader));

        if let Err(e) = linked {
            gl.delete_program(Some(&program));
            return Err(e);
        }

        Ok(ShaderProgram { program })
    }

    /// Use the shader program.
    pub(crate) fn use_program(&self, gl: &WebGl2RenderingContext) {
        gl.use_program(Some(&self.program));
    }

    pub(crate) fn uniform_location(
        &self,
        gl: &WebGl2RenderingContext,
        name: &str,
    ) -> Result<WebGlUniformLocation, Error> {
        gl.get_uniform_location(&self.program, name)
            .ok_or(Error::uniform_location_failed(name))
    }

    pub(crate) fn attrib_location(
        &self,
        gl: &WebGl2RenderingContext,
        name: &str,
    ) -> Result<u32, Error> {
        let location = gl.get_attrib_location(&self.program, name);
        u32::try_from(location).map_err(|_| Error::attribute_location_failed(name))
    }
}

fn compile_shader(
    gl: &WebGl2RenderingContext,
    shader_type: ShaderType,
    source: &str,
) -> Result<WebGlShader, Error> {
    let shader = gl
        .create_shader(shader_type.into())
        .ok_or(Error::shader_creation_failed(shader_type.name()))?;

    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);

    if compiled {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(Error::shader_compile_failed(format!("{}: {log}", shader_type.name())))
    }
}

fn check_link_status(gl: &WebGl2RenderingContext, program: &WebGlProgram) -> Result<(), Error> {
    let status = gl.get_program_parameter(program, GL::LINK_STATUS);
    if status.as_bool().unwrap_or(false) {
        Ok(())
    } else {
        let log = gl.get_program_info_log(program).unwrap_or_default();
        Err(Error::shader_link_failed(log))
    }
}

/// Enum representing the type of shader.
#[derive(Debug, Clone, Copy)]
enum ShaderType {
    Vertex,
    Fragment,
}

impl ShaderType {
    fn name(self) -> &'static str {
        match self {
            ShaderType::Vertex => "vertex shader",
            ShaderType::Fragment => "fragment shader",
        }
    }
}

impl From<ShaderType> for u32 {
    fn from(shader_type: ShaderType) -> Self {
        match shader_type {
            ShaderType::Vertex => GL::VERTEX_SHADER,
            ShaderType::Fragment => GL::FRAGMENT_SHADER,
        }
    }
}
