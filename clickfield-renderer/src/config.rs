use compact_str::CompactString;

use crate::{camera::validate_perspective, Error};

/// Scene configuration.
///
/// Defaults reproduce the classic demo setup: a 45° field of view, clip
/// planes at 0.1 and 100, particles placed 30 units in front of the camera,
/// white quads on a black background.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "js-api",
    derive(serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct SceneConfig {
    /// Vertical field of view in degrees.
    pub field_of_view: f32,
    /// Distance to the near clip plane.
    pub near: f32,
    /// Distance to the far clip plane.
    pub far: f32,
    /// Distance in front of the camera at which particles are placed.
    pub particle_depth: f32,
    /// Background color as 0xRRGGBB.
    pub clear_color: u32,
    /// Particle color as 0xRRGGBB.
    pub particle_color: u32,
    /// Where the particle shader sources come from.
    pub shaders: ShaderSource,
}

/// Origin of the vertex and fragment shader sources.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "js-api",
    derive(serde::Deserialize),
    serde(tag = "kind", rename_all = "camelCase")
)]
pub enum ShaderSource {
    /// GLSL sources compiled into the crate.
    #[default]
    Embedded,
    /// Text content of DOM elements, looked up by id.
    #[cfg_attr(feature = "js-api", serde(rename_all = "camelCase"))]
    Dom {
        vertex_id: CompactString,
        fragment_id: CompactString,
    },
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            field_of_view: 45.0,
            near: 0.1,
            far: 100.0,
            particle_depth: 30.0,
            clear_color: 0x000000,
            particle_color: 0xffffff,
            shaders: ShaderSource::default(),
        }
    }
}

impl SceneConfig {
    /// Checks that the camera is non-degenerate and the particle depth usable.
    pub fn validate(&self) -> Result<(), Error> {
        validate_perspective(self.field_of_view, self.near, self.far)?;

        if !(self.particle_depth >= 0.0 && self.particle_depth.is_finite()) {
            return Err(Error::Config(format!(
                "particle depth must be a non-negative finite number, got {}",
                self.particle_depth
            )));
        }

        Ok(())
    }
}

/// Splits 0xRRGGBB into normalized color components.
pub(crate) fn rgb_components(color: u32) -> (f32, f32, f32) {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    (r, g, b)
}
