//! Browser bindings
//!
//! The page owns the canvas, pointer handlers and `requestAnimationFrame`
//! loop. Each frame it calls `update()` and paints the returned snapshot.

use wasm_bindgen::prelude::*;

use super::SystemClock;
use crate::engine::Engine;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Minion Catch starting...");
}

/// JavaScript handle to a game session
#[wasm_bindgen]
pub struct WebEngine {
    engine: Engine<SystemClock>,
}

#[wasm_bindgen]
impl WebEngine {
    /// Create a session with default tuning, seeded from the current time
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebEngine {
        Self::with_tuning(Tuning::default())
    }

    /// Create a session from a JSON tuning override
    #[wasm_bindgen(js_name = fromTuningJson)]
    pub fn from_tuning_json(json: &str) -> Result<WebEngine, JsValue> {
        let tuning = Tuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_tuning(tuning))
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn restart(&mut self) {
        let seed = js_sys::Date::now() as u64;
        self.engine.reset(seed);
    }

    /// Catcher left edge in canvas units
    #[wasm_bindgen(js_name = setCatcherPosition)]
    pub fn set_catcher_position(&mut self, x: f32) {
        self.engine.set_catcher_position(x);
    }

    /// Pointer x relative to the canvas; centres the catcher on it
    #[wasm_bindgen(js_name = setPointerX)]
    pub fn set_pointer_x(&mut self, x: f32) {
        let half = self.engine.tuning().catcher_size / 2.0;
        self.engine.set_catcher_position(x - half);
    }

    /// Run due ticks and return the frame snapshot as JSON
    pub fn update(&mut self) -> Result<String, JsValue> {
        self.engine.update();
        self.snapshot()
    }

    /// Current frame snapshot as JSON (does not tick)
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.engine
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl WebEngine {
    fn with_tuning(tuning: Tuning) -> WebEngine {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebEngine {
            engine: Engine::new(seed, tuning, SystemClock::new()),
        }
    }
}

impl Default for WebEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WebEngine {
    fn drop(&mut self) {
        self.engine.stop();
    }
}
