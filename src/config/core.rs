use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::thresholds::{LeaderboardConfig, RankingConfig};
use crate::core::{CrewMetric, YearRange};
use crate::errors::{Error, Result};
use crate::genres::{GenreNormalizer, DEFAULT_GENRES};
use crate::pipeline::crew_match::TitleMatch;

/// Root configuration structure for cinemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    /// Genre translation and default selection
    #[serde(default)]
    pub genres: GenresConfig,

    /// Default year range
    #[serde(default)]
    pub filter: FilterDefaults,

    /// Bump chart cut-off
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Hall of fame sizing and qualification
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,

    /// Decade gallery matching
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// Market comparison
    #[serde(default)]
    pub market: MarketConfig,
}

impl DashboardConfig {
    /// Reject settings that would make every view empty.
    pub fn validate(&self) -> Result<()> {
        if self.ranking.top_k == 0 {
            return Err(Error::configuration("ranking.top_k must be at least 1"));
        }
        if self.leaderboard.size == 0 {
            return Err(Error::configuration("leaderboard.size must be at least 1"));
        }
        if self.filter.default_from > self.filter.default_to {
            return Err(Error::configuration(format!(
                "filter.default_from ({}) is after filter.default_to ({})",
                self.filter.default_from, self.filter.default_to
            )));
        }
        if self.market.primary.trim().is_empty() || self.market.secondary.trim().is_empty() {
            return Err(Error::configuration("market codes must not be empty"));
        }
        Ok(())
    }

    /// Normalizer over the default table plus configured overrides.
    pub fn normalizer(&self) -> GenreNormalizer {
        GenreNormalizer::with_overrides(self.genres.translation.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenresConfig {
    /// Genres selected when none are given on the command line
    #[serde(default = "default_selection")]
    pub default_selection: Vec<String>,

    /// Extra or replacement raw code → label entries
    #[serde(default)]
    pub translation: BTreeMap<String, String>,
}

impl Default for GenresConfig {
    fn default() -> Self {
        Self {
            default_selection: default_selection(),
            translation: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefaults {
    #[serde(default = "default_from")]
    pub default_from: i32,
    #[serde(default = "default_to")]
    pub default_to: i32,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            default_from: default_from(),
            default_to: default_to(),
        }
    }
}

impl FilterDefaults {
    pub fn years(&self) -> YearRange {
        YearRange::new(self.default_from, self.default_to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GalleryConfig {
    /// How crew representative movies are matched to movie genres
    #[serde(default)]
    pub title_match: TitleMatch,

    /// Metric picking each decade's winner
    #[serde(default)]
    pub metric: CrewMetric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_primary_market")]
    pub primary: String,
    #[serde(default = "default_secondary_market")]
    pub secondary: String,
    /// A genre needs more rows than this to appear in exportability
    #[serde(default = "default_min_genre_rows")]
    pub min_genre_rows: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            primary: default_primary_market(),
            secondary: default_secondary_market(),
            min_genre_rows: default_min_genre_rows(),
        }
    }
}

fn default_selection() -> Vec<String> {
    DEFAULT_GENRES.iter().map(|g| g.to_string()).collect()
}
fn default_from() -> i32 {
    1960
}
fn default_to() -> i32 {
    2025
}
fn default_primary_market() -> String {
    "us".to_string()
}
fn default_secondary_market() -> String {
    "br".to_string()
}
fn default_min_genre_rows() -> usize {
    50
}
