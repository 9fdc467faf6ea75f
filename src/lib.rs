// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod genres;
pub mod io;
pub mod observability;
pub mod pipeline;
pub mod store;
pub mod views;

// Re-export commonly used types
pub use crate::core::{
    decade_of, CrewMetric, CrewProfile, FilterCriteria, Movie, Role, TopMovie, YearRange,
};

pub use crate::config::{load_config, DashboardConfig};
pub use crate::errors::{Error, Result};
pub use crate::genres::GenreNormalizer;

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::io::view_formatters::Renderable;

pub use crate::pipeline::{
    filter_movies, filter_with_stats, rank_within_groups, select_decade_winner, top_n,
    top_n_qualified, DurationClass, GenreIndex, RankDirection, TitleMatch,
};

pub use crate::store::{LoadOutcome, RecordStore, StoreCache};

pub use crate::views::{prepare_report, DashboardReport};
