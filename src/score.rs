/// Running score plus the best score seen since the process started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    high_score: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn add_kill(&mut self, reward: u32) {
        self.score = self.score.saturating_add(reward);
    }

    /// Folds the score into the high score and starts again from zero.
    /// Returns the score that was flushed.
    pub fn flush_on_death(&mut self) -> u32 {
        let final_score = self.score;
        self.high_score = self.high_score.max(final_score);
        self.score = 0;
        final_score
    }
}
