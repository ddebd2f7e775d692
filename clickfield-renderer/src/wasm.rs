use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

use crate::{js, Scene, SceneConfig};

/// JavaScript wrapper for the particle scene
#[wasm_bindgen]
#[derive(Debug)]
pub struct ParticleScene {
    scene: Scene,
}

#[wasm_bindgen]
impl ParticleScene {
    /// Create a scene on the canvas matching `canvas_selector` and start rendering.
    ///
    /// `config` is an optional object with any of `fieldOfView`, `near`, `far`,
    /// `particleDepth`, `clearColor`, `particleColor` and `shaders`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_selector: &str, config: JsValue) -> Result<ParticleScene, JsValue> {
        console_error_panic_hook::set_once();

        let config = if config.is_undefined() || config.is_null() {
            SceneConfig::default()
        } else {
            from_value::<SceneConfig>(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid scene config: {e}")))?
        };

        let scene = Scene::builder(canvas_selector)
            .config(config)
            .build()
            .map_err(|e| JsValue::from_str(&format!("Failed to create scene: {e}")))?;

        Ok(ParticleScene { scene })
    }

    /// Spawn a particle at canvas pixel coordinates
    #[wasm_bindgen(js_name = "spawnAt")]
    pub fn spawn_at(&self, x: f32, y: f32) {
        self.scene.spawn_particle(x, y);
    }

    /// Number of particles spawned so far
    #[wasm_bindgen(js_name = "particleCount")]
    pub fn particle_count(&self) -> usize {
        self.scene.particle_count()
    }

    /// Whether a pointer is currently pressed on the scene
    #[wasm_bindgen(js_name = "isPointerDown")]
    pub fn is_pointer_down(&self) -> bool {
        self.scene.is_pointer_down()
    }

    /// Render a frame immediately
    #[wasm_bindgen(js_name = "renderFrame")]
    pub fn render_frame(&self) -> Result<(), JsValue> {
        self.scene
            .render_frame()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    js::init_console_logger(log::LevelFilter::Info);
    log::info!("clickfield WASM module loaded");
}
