//! Browser host shell.
//!
//! Owns everything the gameplay core must not know about: the canvas and its
//! 2d context, the keyboard listener, the score readouts, the persisted high
//! score, the audio cues and the requestAnimationFrame ticker. Each frame it
//! feeds one [`Input`] into [`GameState::update`], translates the returned
//! events into effects and renders the new state.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, window};

mod assets;
mod render;
mod storage;

use crate::game::{GameEvent, GameState, Input, Tuning};
use assets::AssetBank;
use storage::HighScoreSlot;

const CANVAS_ID: &str = "od-canvas";
const SCORE_ID: &str = "od-score";
const HIGH_SCORE_ID: &str = "od-highscore";
const CANVAS_WIDTH: u32 = 480;
const CANVAS_HEIGHT: u32 = 640;

struct Shell {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    game: GameState,
    assets: AssetBank,
    high_scores: HighScoreSlot,
    /// Set by the keydown listener between frames, consumed by the next tick.
    flap_queued: bool,
}

// RefCell::new isn't const on this toolchain; allow Clippy lint until a const initializer is feasible.
thread_local! {
    static SHELL: RefCell<Option<Shell>> = RefCell::new(None);
}

pub fn start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the playfield canvas.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_width(CANVAS_WIDTH);
        c.set_height(CANVAS_HEIGHT);
        c.set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); box-shadow:0 0 32px 0 rgba(0,0,0,0.18); border-radius:12px; border:2px solid #222; background:#bfe8f5; z-index:20;").ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    // Score readouts (plain integers, rewritten every frame).
    ensure_readout(
        &doc,
        SCORE_ID,
        "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; font-size:18px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45;",
    )?;
    ensure_readout(
        &doc,
        HIGH_SCORE_ID,
        "position:fixed; top:10px; left:80px; font-family:'Fira Code', monospace; font-size:18px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#9ad1ff; z-index:45;",
    )?;

    let high_scores = HighScoreSlot::open();
    let tuning = Tuning::for_playfield(canvas.width() as f64, canvas.height() as f64);
    let game = GameState::new(tuning, high_scores.load(), run_seed());
    let assets = AssetBank::load();

    SHELL.with(|cell| {
        cell.replace(Some(Shell {
            canvas,
            ctx,
            game,
            assets,
            high_scores,
            flap_queued: false,
        }))
    });

    // One logical button: Space / ArrowUp lift the owl, or restart after a crash.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let code = evt.code();
            if code == "Space" || code == "ArrowUp" {
                evt.prevent_default();
                SHELL.with(|cell| {
                    if let Some(shell) = cell.borrow_mut().as_mut() {
                        shell.flap_queued = true;
                    }
                });
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    Ok(())
}

fn ensure_readout(doc: &Document, id: &str, style: &str) -> Result<(), JsValue> {
    if doc.get_element_by_id(id).is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id(id);
            div.set_text_content(Some("0"));
            div.set_attribute("style", style).ok();
            body.append_child(&div)?;
        }
    }
    Ok(())
}

/// Seed for the run's random stream: OS entropy when the `rng` feature is on,
/// otherwise the millisecond clock.
fn run_seed() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut bytes = [0u8; 8];
        if getrandom::getrandom(&mut bytes).is_ok() {
            return u64::from_le_bytes(bytes);
        }
    }
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0) as u64
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Shell-owned ticker. Keeps rescheduling itself through the crashed phase;
/// crashed ticks only render the overlay and poll for the restart input.
fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        SHELL.with(|cell| {
            if let Some(shell) = cell.borrow_mut().as_mut() {
                shell_tick(shell);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn shell_tick(shell: &mut Shell) {
    let input = Input {
        flap: std::mem::take(&mut shell.flap_queued),
    };
    let events = shell.game.update(input);
    for event in &events {
        match event {
            GameEvent::CoinCollected { .. } => shell.assets.play_coin(),
            GameEvent::Crashed => shell.assets.play_crash(),
            GameEvent::NewHighScore { high_score } => shell.high_scores.store(*high_score),
            GameEvent::SpeedUp { .. } => {}
        }
    }
    render::draw_frame(&shell.ctx, &shell.canvas, &shell.game, &shell.assets);
    update_readouts(&shell.game);
}

fn update_readouts(game: &GameState) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id(SCORE_ID) {
            el.set_text_content(Some(&game.score.to_string()));
        }
        if let Some(el) = doc.get_element_by_id(HIGH_SCORE_ID) {
            el.set_text_content(Some(&game.high_score.to_string()));
        }
    }
}
