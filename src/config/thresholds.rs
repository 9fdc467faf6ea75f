use crate::pipeline::leaderboard::QualificationThresholds;
use serde::{Deserialize, Serialize};

/// Bump chart cut-off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Ranks kept per decade
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

/// Hall of fame sizing and qualification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Entries per leaderboard
    #[serde(default = "default_size")]
    pub size: usize,

    /// Leading entries highlighted as a podium
    #[serde(default = "default_podium")]
    pub podium: usize,

    /// Minimum movies in the decade to qualify as "most acclaimed"
    #[serde(default = "default_min_movies")]
    pub min_movies: u32,

    /// Votes must exceed this to qualify as "most acclaimed"
    #[serde(default = "default_min_votes")]
    pub min_votes: u64,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            podium: default_podium(),
            min_movies: default_min_movies(),
            min_votes: default_min_votes(),
        }
    }
}

impl LeaderboardConfig {
    pub fn qualification(&self) -> QualificationThresholds {
        QualificationThresholds {
            min_movies: self.min_movies,
            min_votes: self.min_votes,
        }
    }
}

fn default_top_k() -> usize {
    8
}
fn default_size() -> usize {
    15
}
fn default_podium() -> usize {
    3
}
fn default_min_movies() -> u32 {
    2
}
fn default_min_votes() -> u64 {
    1000
}
