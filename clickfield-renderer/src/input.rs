use std::{
    cell::RefCell,
    fmt::{Debug, Formatter},
    rc::Rc,
};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, HtmlCanvasElement, MouseEvent};

use crate::{js, Error, SceneState};

/// Pointer listeners feeding a [`SceneState`].
///
/// `pointerdown` on the canvas spawns a particle at the pointer position;
/// `pointerup` anywhere on the document releases the press. Listeners are
/// removed when the handler is dropped.
pub struct PointerInputHandler {
    canvas: HtmlCanvasElement,
    document: Document,
    on_pointer_down: Closure<dyn FnMut(MouseEvent)>,
    on_pointer_up: Closure<dyn FnMut(MouseEvent)>,
}

impl PointerInputHandler {
    /// Attaches pointer listeners that update `scene`.
    ///
    /// # Errors
    /// Returns an error if the document is unavailable or a listener cannot
    /// be attached.
    pub fn new(canvas: &HtmlCanvasElement, scene: Rc<RefCell<SceneState>>) -> Result<Self, Error> {
        let document = js::document()?;

        let down_scene = scene.clone();
        let down_canvas = canvas.clone();
        let on_pointer_down = Closure::wrap(Box::new(move |event: MouseEvent| {
            let (x, y) = canvas_pixel_position(&down_canvas, &event);
            down_scene.borrow_mut().on_pointer_down(x, y);
        }) as Box<dyn FnMut(_)>);

        let on_pointer_up = Closure::wrap(Box::new(move |_event: MouseEvent| {
            scene.borrow_mut().on_pointer_up();
        }) as Box<dyn FnMut(_)>);

        canvas
            .add_event_listener_with_callback("pointerdown", on_pointer_down.as_ref().unchecked_ref())
            .map_err(|_| Error::listener_failed("pointerdown"))?;
        document
            .add_event_listener_with_callback("pointerup", on_pointer_up.as_ref().unchecked_ref())
            .map_err(|_| Error::listener_failed("pointerup"))?;

        Ok(Self {
            canvas: canvas.clone(),
            document,
            on_pointer_down,
            on_pointer_up,
        })
    }

    /// Removes all owned event listeners.
    pub fn cleanup(&self) {
        let _ = self.canvas.remove_event_listener_with_callback(
            "pointerdown",
            self.on_pointer_down.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "pointerup",
            self.on_pointer_up.as_ref().unchecked_ref(),
        );
    }
}

/// Converts the event's CSS offset into canvas pixel coordinates.
fn canvas_pixel_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f32, f32) {
    let (x, y) = (event.offset_x() as f32, event.offset_y() as f32);
    let scale_x = css_to_pixel_scale(canvas.width(), canvas.client_width());
    let scale_y = css_to_pixel_scale(canvas.height(), canvas.client_height());
    (x * scale_x, y * scale_y)
}

/// Ratio of backing-store pixels to CSS pixels; 1 for unlaid-out canvases.
fn css_to_pixel_scale(pixels: u32, css_pixels: i32) -> f32 {
    if css_pixels > 0 {
        pixels as f32 / css_pixels as f32
    } else {
        1.0
    }
}

impl Drop for PointerInputHandler {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl Debug for PointerInputHandler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PointerInputHandler {{ canvas: {}x{} }}", self.canvas.width(), self.canvas.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_to_pixel_scale() {
        assert_eq!(css_to_pixel_scale(800, 800), 1.0);
        assert_eq!(css_to_pixel_scale(1600, 800), 2.0);
        assert_eq!(css_to_pixel_scale(800, 0), 1.0);
    }
}
