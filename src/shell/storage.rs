//! The game's single durable value: the `highScore` localStorage key.

use web_sys::{Storage, window};

const HIGH_SCORE_KEY: &str = "highScore";

/// localStorage-backed slot. When storage is unavailable (private browsing,
/// blocked cookies) the handle stays `None`, reads return 0 and writes are
/// dropped, so the high score simply lives in memory for the session.
pub struct HighScoreSlot {
    storage: Option<Storage>,
}

impl HighScoreSlot {
    pub fn open() -> Self {
        let storage = window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }

    /// Read once at startup. Absent or unparseable values count as 0.
    pub fn load(&self) -> u32 {
        self.storage
            .as_ref()
            .and_then(|s| s.get_item(HIGH_SCORE_KEY).ok().flatten())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Persist a freshly beaten high score. Write failures are not observable
    /// by gameplay.
    pub fn store(&self, high_score: u32) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(HIGH_SCORE_KEY, &high_score.to_string());
        }
    }
}
