use glam::Mat4;

use crate::Error;

/// Pixel dimensions of the render target.
///
/// Fixed at initialization from the canvas size. Both dimensions are
/// guaranteed to be non-zero, so the unit-to-screen mapping derived from
/// a viewport is always invertible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Creates a viewport, rejecting empty dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_viewport(width, height));
        }

        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Viewport center in pixel coordinates.
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Perspective camera looking down the negative Z axis.
///
/// The projection matrix is derived from the scalar parameters and rebuilt
/// once per frame by [`Camera::rebuild`]; it is never mutated directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    field_of_view: f32,
    near: f32,
    far: f32,
    aspect_ratio: f32,
    projection: Mat4,
    view: Mat4,
}

impl Camera {
    /// Creates a camera for the given viewport.
    ///
    /// # Parameters
    /// * `field_of_view` - Vertical field of view in degrees, in (0, 180)
    /// * `near` - Distance to the near clip plane, must be positive
    /// * `far` - Distance to the far clip plane, must exceed `near`
    /// * `viewport` - Render target dimensions; fixes the aspect ratio
    pub fn new(field_of_view: f32, near: f32, far: f32, viewport: Viewport) -> Result<Self, Error> {
        validate_perspective(field_of_view, near, far)?;

        let mut camera = Self {
            field_of_view,
            near,
            far,
            aspect_ratio: viewport.aspect_ratio(),
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        };
        camera.rebuild();

        Ok(camera)
    }

    /// Recomputes the projection matrix and resets the view matrix to identity.
    pub fn rebuild(&mut self) {
        self.projection = Mat4::perspective_rh_gl(
            self.field_of_view.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        );
        self.view = Mat4::IDENTITY;
    }

    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }
}

pub(crate) fn validate_perspective(field_of_view: f32, near: f32, far: f32) -> Result<(), Error> {
    if !(field_of_view > 0.0 && field_of_view < 180.0) {
        return Err(Error::invalid_camera(&format!(
            "field of view must be in (0, 180) degrees, got {field_of_view}"
        )));
    }
    if !(near > 0.0 && near.is_finite()) {
        return Err(Error::invalid_camera(&format!("near plane must be positive, got {near}")));
    }
    if !(far > near && far.is_finite()) {
        return Err(Error::invalid_camera(&format!(
            "far plane ({far}) must lie beyond the near plane ({near})"
        )));
    }

    Ok(())
}
