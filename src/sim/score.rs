//! Session score and persisted best score

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

/// Current score plus the best score seen across sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u32,
    best: u32,
}

impl ScoreTracker {
    /// Tracker seeded with the stored best score
    pub fn load(store: &dyn ScoreStore) -> Self {
        let best = store.best_score();
        log::info!("Best score: {}", best);
        Self { score: 0, best }
    }

    /// Start a new session (best score is kept)
    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Add landing points, returning the new score
    pub fn apply(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Settle the session on game over
    ///
    /// A new best is written through to `store` immediately and returned.
    pub fn finalize(&mut self, store: &mut dyn ScoreStore) -> Option<u32> {
        if self.score <= self.best {
            return None;
        }
        self.best = self.score;
        store.set_best_score(self.best);
        log::info!("New best score: {}", self.best);
        Some(self.best)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }
}
