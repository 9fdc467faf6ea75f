//! Pure filter-and-aggregate pipeline.
//!
//! Every function here is a total, side-effect free transformation of
//! borrowed rows. Absent or empty results model "nothing to show"; the
//! pipeline never fails.

pub mod aggregate;
pub mod crew_match;
pub mod duration;
pub mod filter;
pub mod kpis;
pub mod leaderboard;
pub mod market;
pub mod rank;

pub use aggregate::{
    count_by_decade_genre, mean_rating_by_decade_genre, mean_rating_count_by_year,
    stats_by_decade_duration_class, stats_by_duration_class, stats_by_genre,
    stats_by_macro_region, stats_by_region, DecadeDurationShare, DecadeGenreCount,
    DecadeGenreRating, DurationClassStats, GenreStats, RegionStats, YearlyVolume,
};
pub use crew_match::{
    has_any_genre, select_decade_winner, GenreIndex, GenreSet, TitleKey, TitleMatch, WinnerQuery,
};
pub use duration::{classify, classify_runtime, DurationClass};
pub use filter::{distinct_titles, filter_movies, filter_with_stats, FilterStatistics};
pub use kpis::{compute_kpis, Kpis};
pub use leaderboard::{
    crew_slice, top_n, top_n_qualified, QualificationThresholds, QualifiedLeaderboard,
};
pub use market::{
    classify_reach, exportability_by_genre, market_comparison, mean_reach, stats_by_reach_class,
    GenreExportability, MarketComparison, MarketShare, ReachClass, ReachClassStats,
};
pub use rank::{prestige_bump, production_bump, rank_within_groups, BumpPoint, RankDirection, Ranked};
