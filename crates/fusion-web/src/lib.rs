pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use fusion_engine::SimConfig;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Simulation not initialized. Call sim_init() first.");
        f(runner)
    })
}

/// Create the simulation. `config_json` may be empty for defaults.
#[wasm_bindgen]
pub fn sim_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        SimConfig::default()
    } else {
        SimConfig::from_json(config_json).unwrap_or_else(|e| {
            log::warn!("sim_init: bad config, using defaults: {}", e);
            SimConfig::default()
        })
    };

    let mut runner = SimRunner::new(config);
    runner.init();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("fusion: initialized");
}

#[wasm_bindgen]
pub fn sim_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn sim_reset() {
    with_runner(|r| r.reset());
}

#[wasm_bindgen]
pub fn sim_set_config(json: &str) -> bool {
    with_runner(|r| r.set_config_json(json))
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_state() -> f32 {
    with_runner(|r| r.state_code())
}

#[wasm_bindgen]
pub fn get_particle_count() -> u32 {
    with_runner(|r| r.particle_count())
}

#[wasm_bindgen]
pub fn get_trail_count() -> u32 {
    with_runner(|r| r.trail_count())
}

#[wasm_bindgen]
pub fn get_elapsed() -> f32 {
    with_runner(|r| r.elapsed())
}
