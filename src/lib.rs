//! Owl Dash core crate.
//!
//! A single-screen canvas arcade game: an owl falls under gravity, the player
//! lifts it through pipe gaps and collects coins for score. Gameplay lives in
//! the host-free [`game`] module and is driven once per animation frame by the
//! browser shell, which owns the canvas, keyboard, audio cues and the
//! persisted high score.

use wasm_bindgen::prelude::*;

pub mod game;
mod shell;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Wire up the canvas, input, storage and audio, then start the frame loop.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    shell::start()
}
