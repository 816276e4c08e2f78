//! Sprite images and short audio cues.
//!
//! Every handle is optional: an asset that fails to construct or load leaves a
//! `None` behind and the corresponding draw or play call becomes a no-op. A
//! missing file never takes the frame loop down with it.

use web_sys::{HtmlAudioElement, HtmlImageElement};

const OWL_IMAGE: &str = "owl.png";
const COIN_IMAGE: &str = "coin.png";
const COIN_SOUND: &str = "coin-sound.mp3";
const CRASH_SOUND: &str = "crash-sound.mp3";

pub struct AssetBank {
    owl: Option<HtmlImageElement>,
    coin: Option<HtmlImageElement>,
    coin_cue: Option<HtmlAudioElement>,
    crash_cue: Option<HtmlAudioElement>,
}

impl AssetBank {
    pub fn load() -> Self {
        Self {
            owl: image(OWL_IMAGE),
            coin: image(COIN_IMAGE),
            coin_cue: audio(COIN_SOUND),
            crash_cue: audio(CRASH_SOUND),
        }
    }

    /// Owl sprite, once the browser has finished decoding it.
    pub fn owl(&self) -> Option<&HtmlImageElement> {
        self.owl.as_ref().filter(|img| img.complete())
    }

    pub fn coin(&self) -> Option<&HtmlImageElement> {
        self.coin.as_ref().filter(|img| img.complete())
    }

    pub fn play_coin(&self) {
        play(&self.coin_cue);
    }

    pub fn play_crash(&self) {
        play(&self.crash_cue);
    }
}

fn image(src: &str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    img.set_src(src);
    Some(img)
}

fn audio(src: &str) -> Option<HtmlAudioElement> {
    HtmlAudioElement::new_with_src(src).ok()
}

/// Fire-and-forget playback: rewind so rapid pickups retrigger, start, and
/// never await the returned promise. Completion and failure are both invisible
/// to game logic.
fn play(cue: &Option<HtmlAudioElement>) {
    if let Some(cue) = cue {
        cue.set_current_time(0.0);
        let _ = cue.play();
    }
}
