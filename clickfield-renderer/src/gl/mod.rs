mod context;
mod program;
mod quad;
mod renderer;

pub(crate) use program::*;
pub(crate) use quad::*;
pub use renderer::*;

pub(crate) type GL = web_sys::WebGl2RenderingContext;
