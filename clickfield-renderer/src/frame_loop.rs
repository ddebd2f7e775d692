use std::{
    cell::{Cell, RefCell},
    fmt::{Debug, Formatter},
    rc::Rc,
};

use wasm_bindgen::{closure::Closure, JsCast};

use crate::{js, scene::FrameScheduler, Error};

/// Drives a callback once per display refresh via `requestAnimationFrame`.
///
/// The callback is expected to request its own next frame (see
/// [`SceneState::tick`](crate::SceneState::tick)); the loop holds only a weak
/// reference to itself, so dropping the last `Rc` or calling
/// [`stop`](FrameLoop::stop) ends it.
pub(crate) struct FrameLoop {
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
    pending: Cell<Option<i32>>,
}

impl FrameLoop {
    /// Creates the loop and requests the first frame.
    pub(crate) fn start<F>(on_frame: F) -> Result<Rc<Self>, Error>
    where
        F: FnMut(&FrameLoop) + 'static,
    {
        let frame_loop = Rc::new(Self { callback: RefCell::new(None), pending: Cell::new(None) });

        let weak = Rc::downgrade(&frame_loop);
        let mut on_frame = on_frame;
        let callback = Closure::wrap(Box::new(move || {
            if let Some(frame_loop) = weak.upgrade() {
                frame_loop.pending.set(None);
                on_frame(&frame_loop);
            }
        }) as Box<dyn FnMut()>);

        *frame_loop.callback.borrow_mut() = Some(callback);
        frame_loop.request_frame()?;

        Ok(frame_loop)
    }

    /// Cancels the pending frame and releases the callback.
    pub(crate) fn stop(&self) {
        if let Some(handle) = self.pending.take() {
            if let Ok(window) = js::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        self.callback.borrow_mut().take();
    }

    pub(crate) fn is_running(&self) -> bool {
        self.callback.borrow().is_some()
    }
}

impl FrameScheduler for FrameLoop {
    fn request_frame(&self) -> Result<(), Error> {
        let callback = self.callback.borrow();
        let callback = callback.as_ref().ok_or(Error::animation_frame_failed())?;

        let handle = js::window()?
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|_| Error::animation_frame_failed())?;
        self.pending.set(Some(handle));

        Ok(())
    }
}

impl Debug for FrameLoop {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameLoop {{ running: {} }}", self.is_running())
    }
}
