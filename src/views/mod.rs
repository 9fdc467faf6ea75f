//! Dashboard views: one prepared, serializable struct per thematic page.

mod model;
mod prepare;

pub use model::{
    DashboardReport, DurationView, GalleryCard, GalleryRow, GenreView, HallOfFameView,
    MarketView, OverviewView, TrendsView,
};
pub use prepare::{
    apply_filter, prepare_duration, prepare_gallery, prepare_genres, prepare_hall_of_fame,
    prepare_market, prepare_overview, prepare_report, prepare_trends, FilteredSet,
};
