use super::{LoadOutcome, RecordStore};
use crate::errors::Result;
use crate::genres::GenreNormalizer;
use crate::io::csv_source;
use crate::observability::{set_current_file, set_phase, DashboardPhase};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::info;

/// Memoized table load.
///
/// The first successful load is kept for the life of the cache and never
/// invalidated. A failed load is not cached, so the next call retries.
#[derive(Debug)]
pub struct StoreCache {
    movies_path: PathBuf,
    crew_path: PathBuf,
    outcome: OnceCell<LoadOutcome>,
}

impl StoreCache {
    pub fn new(movies_path: impl Into<PathBuf>, crew_path: impl Into<PathBuf>) -> Self {
        Self {
            movies_path: movies_path.into(),
            crew_path: crew_path.into(),
            outcome: OnceCell::new(),
        }
    }

    pub fn movies_path(&self) -> &Path {
        &self.movies_path
    }

    pub fn crew_path(&self) -> &Path {
        &self.crew_path
    }

    /// Load both tables on first call; later calls return the same outcome.
    pub fn get_or_load(&self, normalizer: &GenreNormalizer) -> Result<&LoadOutcome> {
        self.outcome.get_or_try_init(|| {
            info!(
                movies = %self.movies_path.display(),
                crew = %self.crew_path.display(),
                "loading source tables"
            );
            let _phase = set_phase(DashboardPhase::Loading);
            let movies = {
                let _file = set_current_file(&self.movies_path);
                csv_source::read_movies(&self.movies_path)?
            };
            let crew = {
                let _file = set_current_file(&self.crew_path);
                csv_source::read_crew(&self.crew_path)?
            };

            let _phase = set_phase(DashboardPhase::Normalizing);
            Ok(RecordStore::build(movies, crew, normalizer))
        })
    }

    /// The loaded store, if a load has already succeeded.
    pub fn get(&self) -> Option<&RecordStore> {
        self.outcome.get().map(|outcome| &outcome.store)
    }
}
