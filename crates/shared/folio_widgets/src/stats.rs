use serde::{Deserialize, Serialize};

/// Append-only record of finished cart-pole episodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeLog {
    scores: Vec<u32>,
    best: u32,
}

impl EpisodeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, score: u32) {
        self.scores.push(score);
        self.best = self.best.max(score);
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Mean of the last `window` scores (fewer if not enough episodes yet).
    ///
    /// Returns 0.0 before the first episode ends.
    pub fn trailing_average(&self, window: usize) -> f32 {
        let window = window.max(1);
        if self.scores.is_empty() {
            return 0.0;
        }
        let start = self.scores.len().saturating_sub(window);
        let slice = &self.scores[start..];
        let sum: u64 = slice.iter().map(|&s| s as u64).sum();
        sum as f32 / slice.len() as f32
    }
}
