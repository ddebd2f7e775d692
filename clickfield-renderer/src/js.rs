use js_sys::wasm_bindgen::{JsCast, JsValue};
use log::{Level, LevelFilter, Log, Metadata, Record};
use web_sys::{console, Document, HtmlCanvasElement, Window};

use crate::error::Error;

pub(crate) fn window() -> Result<Window, Error> {
    web_sys::window().ok_or(Error::window_not_found())
}

pub(crate) fn document() -> Result<Document, Error> {
    window().and_then(|w| w.document().ok_or(Error::document_not_found()))
}

pub(crate) fn get_canvas_by_id(canvas_id: &str) -> Result<HtmlCanvasElement, Error> {
    let document = document()?;
    document
        .query_selector(canvas_id)
        .map_err(|_| Error::canvas_not_found())?
        .ok_or(Error::canvas_not_found())?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| Error::canvas_not_found())
}

pub(crate) fn get_webgl2_context(
    canvas: &HtmlCanvasElement,
) -> Result<web_sys::WebGl2RenderingContext, Error> {
    canvas
        .get_context("webgl2")
        .map_err(|_| Error::canvas_context_failed())?
        .ok_or(Error::webgl_context_failed())?
        .dyn_into::<web_sys::WebGl2RenderingContext>()
        .map_err(|_| Error::webgl_context_failed())
}

/// Returns the text content of the element with the given id, e.g. a
/// `<script type="x-shader/x-vertex">` block.
pub(crate) fn shader_source_by_id(id: &str) -> Result<String, Error> {
    document()?
        .get_element_by_id(id)
        .and_then(|element| element.text_content())
        .filter(|source| !source.trim().is_empty())
        .ok_or(Error::shader_source_not_found(id))
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message: JsValue = format!("[{}] {}", record.target(), record.args()).into();
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            Level::Info => console::info_1(&message),
            Level::Debug | Level::Trace => console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Routes the `log` facade to the browser console.
///
/// Only the first call installs the logger; later calls just adjust the level.
pub fn init_console_logger(level: LevelFilter) {
    // an existing logger is kept
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
