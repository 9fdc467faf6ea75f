//! Dashboard configuration (`.cinemap.toml`).
//!
//! Every section and field has a default, so an empty or partial file is
//! valid. Values here replace what would otherwise be hard-coded: the genre
//! table, default filter, rank cut-off, leaderboard size and qualification,
//! gallery matching mode and market codes.

mod core;
mod loader;
mod thresholds;

pub use self::core::{DashboardConfig, FilterDefaults, GalleryConfig, GenresConfig, MarketConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use thresholds::{LeaderboardConfig, RankingConfig};
