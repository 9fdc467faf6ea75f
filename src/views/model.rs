//! Prepared view types: everything a renderer needs, nothing it must compute.

use crate::core::{CrewMetric, CrewProfile, FilterCriteria, Role};
use crate::pipeline::{
    BumpPoint, DecadeDurationShare, DecadeGenreCount, DecadeGenreRating, DurationClassStats,
    FilterStatistics, GenreExportability, GenreSet, GenreStats, Kpis, MarketComparison,
    ReachClassStats, RegionStats, YearlyVolume,
};
use serde::Serialize;

/// KPI strip for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub criteria: FilterCriteria,
    pub filter: FilterStatistics,
    pub kpis: Kpis,
}

/// One decade winner in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryCard {
    pub profile: CrewProfile,
    pub metric: CrewMetric,
    /// Genres of the representative movie
    pub genres: GenreSet,
}

/// Decade winners per role; `None` is an explicit "no match" placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryRow {
    pub decade: i32,
    pub director: Option<GalleryCard>,
    pub actor: Option<GalleryCard>,
    pub actress: Option<GalleryCard>,
}

impl GalleryRow {
    pub fn card(&self, role: Role) -> Option<&GalleryCard> {
        match role {
            Role::Director => self.director.as_ref(),
            Role::Actor => self.actor.as_ref(),
            Role::Actress => self.actress.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.director.is_none() && self.actor.is_none() && self.actress.is_none()
    }
}

/// Temporal trends: rank-over-time, yearly volume and the decade gallery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsView {
    pub top_k: usize,
    pub production: Vec<BumpPoint>,
    pub prestige: Vec<BumpPoint>,
    pub yearly: Vec<YearlyVolume>,
    pub gallery: Vec<GalleryRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreView {
    pub summary: Vec<GenreStats>,
    pub counts: Vec<DecadeGenreCount>,
    pub ratings: Vec<DecadeGenreRating>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationView {
    pub shares: Vec<DecadeDurationShare>,
    pub engagement: Vec<DurationClassStats>,
    /// Filtered rows left out because their runtime is unknown
    pub unknown_runtime: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketView {
    pub comparison: Option<MarketComparison>,
    pub reach_classes: Vec<ReachClassStats>,
    pub exportability: Vec<GenreExportability>,
    pub mean_reach: Option<f64>,
    pub regions: Vec<RegionStats>,
    pub macro_regions: Vec<RegionStats>,
}

/// Leaderboards for one role and decade.
///
/// Built from the full crew table; the year and genre filter does not apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HallOfFameView {
    pub role: Role,
    pub decade: i32,
    pub podium: usize,
    /// Most popular, by total votes
    pub popular: Vec<CrewProfile>,
    /// Most acclaimed, by mean rating among qualified profiles
    pub acclaimed: Vec<CrewProfile>,
    /// True when nobody qualified and `acclaimed` ranks everyone instead
    pub fell_back: bool,
}

/// All views for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub overview: OverviewView,
    pub trends: TrendsView,
    pub genres: GenreView,
    pub duration: DurationView,
    pub market: MarketView,
    pub hall_of_fame: Vec<HallOfFameView>,
}
