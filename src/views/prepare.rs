//! Pure transformation pipeline for view preparation.
//!
//! ```text
//! RecordStore + FilterCriteria + DashboardConfig
//!        │
//!        ▼
//! ┌──────────────────┐
//! │  apply_filter()  │ ← one filter pass shared by every view
//! └──────────────────┘
//!        │
//!        ├─→ prepare_overview()  ← KPIs
//!        ├─→ prepare_trends()    ← bump series, yearly volume, gallery
//!        ├─→ prepare_genres()    ← genre summary
//!        ├─→ prepare_duration()  ← duration mix and engagement
//!        └─→ prepare_market()    ← reach and market comparison
//!
//! RecordStore (unfiltered) ──→ prepare_hall_of_fame()
//! ```
//!
//! No stage reads the environment, touches files or logs. Configuration
//! comes in as parameters.

use super::model::{
    DashboardReport, DurationView, GalleryCard, GalleryRow, GenreView, HallOfFameView,
    MarketView, OverviewView, TrendsView,
};
use crate::config::{DashboardConfig, GalleryConfig, LeaderboardConfig, MarketConfig};
use crate::core::{CrewMetric, CrewProfile, FilterCriteria, Movie, Role};
use crate::pipeline::{
    self, crew_match::WinnerQuery, FilterStatistics, GenreIndex, TitleKey,
};
use crate::store::RecordStore;
use im::Vector;
use std::collections::BTreeSet;

/// The working set for one selection.
#[derive(Debug, Clone)]
pub struct FilteredSet<'a> {
    pub rows: Vec<&'a Movie>,
    pub stats: FilterStatistics,
}

/// Every view for `criteria`, plus the hall of fame for each role in the
/// most recent crew decade.
pub fn prepare_report(
    store: &RecordStore,
    criteria: &FilterCriteria,
    config: &DashboardConfig,
) -> DashboardReport {
    let filtered = apply_filter(store, criteria);

    let hall_of_fame = store
        .crew_decades()
        .first()
        .map(|&decade| {
            Role::ALL
                .iter()
                .map(|&role| prepare_hall_of_fame(store, role, decade, &config.leaderboard))
                .collect()
        })
        .unwrap_or_default();

    DashboardReport {
        overview: prepare_overview(&filtered, criteria),
        trends: prepare_trends(store, &filtered, criteria, config),
        genres: prepare_genres(&filtered),
        duration: prepare_duration(&filtered),
        market: prepare_market(&filtered, &config.market),
        hall_of_fame,
    }
}

// ============================================================================
// STAGE 1: FILTER
// ============================================================================

/// Run the filter engine over the store.
pub fn apply_filter<'a>(store: &'a RecordStore, criteria: &FilterCriteria) -> FilteredSet<'a> {
    let (rows, stats) = pipeline::filter_with_stats(store.movies().iter(), criteria);
    FilteredSet { rows, stats }
}

// ============================================================================
// STAGE 2: OVERVIEW
// ============================================================================

pub fn prepare_overview(filtered: &FilteredSet<'_>, criteria: &FilterCriteria) -> OverviewView {
    OverviewView {
        criteria: criteria.clone(),
        filter: filtered.stats,
        kpis: pipeline::compute_kpis(&filtered.rows),
    }
}

// ============================================================================
// STAGE 3: TRENDS AND GALLERY
// ============================================================================

pub fn prepare_trends(
    store: &RecordStore,
    filtered: &FilteredSet<'_>,
    criteria: &FilterCriteria,
    config: &DashboardConfig,
) -> TrendsView {
    let top_k = config.ranking.top_k;
    let counts = pipeline::count_by_decade_genre(&filtered.rows);
    let ratings = pipeline::mean_rating_by_decade_genre(&filtered.rows);

    TrendsView {
        top_k,
        production: pipeline::production_bump(&counts, top_k),
        prestige: pipeline::prestige_bump(&ratings, top_k),
        yearly: pipeline::mean_rating_count_by_year(&filtered.rows),
        gallery: prepare_gallery(
            store.crew(),
            store.genre_index(),
            &filtered.rows,
            &criteria.genres,
            &config.gallery,
        ),
    }
}

/// One row per decade present in `rows`, most recent first.
///
/// A decade where no role has a winner is left out; a single missing role
/// stays as a `None` placeholder.
pub fn prepare_gallery(
    crew: &Vector<CrewProfile>,
    index: &GenreIndex,
    rows: &[&Movie],
    genres: &BTreeSet<String>,
    gallery: &GalleryConfig,
) -> Vec<GalleryRow> {
    let decades: BTreeSet<i32> = rows.iter().map(|movie| movie.decade()).collect();

    decades
        .into_iter()
        .rev()
        .map(|decade| {
            let card = |role: Role| {
                let query = WinnerQuery {
                    decade,
                    role,
                    genres,
                    metric: gallery.metric,
                    title_match: gallery.title_match,
                };
                pipeline::select_decade_winner(crew.iter(), index, &query).map(|winner| {
                    let key = TitleKey::of_top_movie(&winner.top_movie);
                    GalleryCard {
                        profile: winner.clone(),
                        metric: gallery.metric,
                        genres: index
                            .genres_for(&key, gallery.title_match)
                            .cloned()
                            .unwrap_or_default(),
                    }
                })
            };

            GalleryRow {
                decade,
                director: card(Role::Director),
                actor: card(Role::Actor),
                actress: card(Role::Actress),
            }
        })
        .filter(|row| !row.is_empty())
        .collect()
}

// ============================================================================
// STAGE 4: GENRES
// ============================================================================

pub fn prepare_genres(filtered: &FilteredSet<'_>) -> GenreView {
    GenreView {
        summary: pipeline::stats_by_genre(&filtered.rows),
        counts: pipeline::count_by_decade_genre(&filtered.rows),
        ratings: pipeline::mean_rating_by_decade_genre(&filtered.rows),
    }
}

// ============================================================================
// STAGE 5: DURATION
// ============================================================================

pub fn prepare_duration(filtered: &FilteredSet<'_>) -> DurationView {
    DurationView {
        shares: pipeline::stats_by_decade_duration_class(&filtered.rows),
        engagement: pipeline::stats_by_duration_class(&filtered.rows),
        unknown_runtime: filtered
            .rows
            .iter()
            .filter(|movie| movie.runtime.is_none())
            .count(),
    }
}

// ============================================================================
// STAGE 6: MARKET
// ============================================================================

pub fn prepare_market(filtered: &FilteredSet<'_>, market: &MarketConfig) -> MarketView {
    let rows = &filtered.rows;
    MarketView {
        comparison: pipeline::market_comparison(rows, &market.primary, &market.secondary),
        reach_classes: pipeline::stats_by_reach_class(rows),
        exportability: pipeline::exportability_by_genre(rows, market.min_genre_rows),
        mean_reach: pipeline::mean_reach(rows),
        regions: pipeline::stats_by_region(rows),
        macro_regions: pipeline::stats_by_macro_region(rows),
    }
}

// ============================================================================
// STAGE 7: HALL OF FAME
// ============================================================================

/// Leaderboards over the whole crew table for one role and decade.
pub fn prepare_hall_of_fame(
    store: &RecordStore,
    role: Role,
    decade: i32,
    leaderboard: &LeaderboardConfig,
) -> HallOfFameView {
    let popular = pipeline::top_n(
        store.crew().iter(),
        role,
        decade,
        CrewMetric::Votes,
        leaderboard.size,
    );
    let acclaimed = pipeline::top_n_qualified(
        store.crew().iter(),
        role,
        decade,
        &leaderboard.qualification(),
        leaderboard.size,
    );

    HallOfFameView {
        role,
        decade,
        podium: leaderboard.podium.min(leaderboard.size),
        popular: popular.into_iter().cloned().collect(),
        acclaimed: acclaimed.entries.into_iter().cloned().collect(),
        fell_back: acclaimed.fell_back,
    }
}
