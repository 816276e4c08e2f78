//! Canvas drawing for one frame.
//!
//! Pure read of the game state: clear, pipes, coins, owl, then the terminal
//! overlay when the run has crashed. Sprites blit from the asset bank and fall
//! back to solid rectangles while an image is missing or still decoding.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::assets::AssetBank;
use crate::game::{GameState, Phase};

const COIN_FALLBACK: &str = "#f5c542";
const OWL_FALLBACK: &str = "#8a5a2b";
const LABEL_COLOR: &str = "#ffd166";

pub fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    canvas: &HtmlCanvasElement,
    game: &GameState,
    assets: &AssetBank,
) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, w, h);

    draw_pipes(ctx, game, h);
    draw_coins(ctx, game, assets);
    draw_owl(ctx, game, assets);

    if game.phase == Phase::Crashed {
        draw_crash_overlay(ctx, w, h);
    }
}

fn draw_pipes(ctx: &CanvasRenderingContext2d, game: &GameState, h: f64) {
    let pipe_width = game.tuning.pipe_width;
    ctx.set_fill_style_str("#000000");
    for pipe in &game.pipes {
        ctx.fill_rect(pipe.x, 0.0, pipe_width, pipe.top);
        ctx.fill_rect(pipe.x, h - pipe.bottom, pipe_width, pipe.bottom);
    }
    // Milestone labels sit near the lower edge of the top segment.
    for pipe in &game.pipes {
        if let Some(label) = &pipe.label {
            ctx.set_fill_style_str(LABEL_COLOR);
            ctx.set_font("16px 'Fira Code', monospace");
            ctx.set_text_align("center");
            ctx.fill_text(label, pipe.x + pipe_width / 2.0, pipe.top - 8.0)
                .ok();
        }
    }
}

fn draw_coins(ctx: &CanvasRenderingContext2d, game: &GameState, assets: &AssetBank) {
    for coin in &game.coins {
        if let Some(img) = assets.coin() {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img, coin.x, coin.y, coin.size, coin.size,
            )
            .ok();
        } else {
            ctx.set_fill_style_str(COIN_FALLBACK);
            ctx.fill_rect(coin.x, coin.y, coin.size, coin.size);
        }
    }
}

fn draw_owl(ctx: &CanvasRenderingContext2d, game: &GameState, assets: &AssetBank) {
    let owl = &game.owl;
    if let Some(img) = assets.owl() {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img, owl.x, owl.y, owl.width, owl.height,
        )
        .ok();
    } else {
        ctx.set_fill_style_str(OWL_FALLBACK);
        ctx.fill_rect(owl.x, owl.y, owl.width, owl.height);
    }
}

fn draw_crash_overlay(ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
    ctx.set_fill_style_str("rgba(0,0,0,0.55)");
    ctx.fill_rect(0.0, 0.0, w, h);
    let cx = w / 2.0;
    let cy = h / 2.0;
    ctx.set_text_align("center");
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("bold 48px Arial");
    ctx.set_line_width(6.0);
    ctx.set_stroke_style_str("#000000");
    ctx.stroke_text("GAME OVER!", cx, cy - 20.0).ok();
    ctx.fill_text("GAME OVER!", cx, cy - 20.0).ok();
    ctx.set_font("24px Arial");
    ctx.fill_text("Press Space to Restart", cx, cy + 20.0).ok();
}
