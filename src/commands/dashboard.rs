use super::{write_view, OutputTarget, SourcePaths};
use crate::config::{load_config, DashboardConfig};
use crate::core::{decade_of, FilterCriteria, Role, YearRange};
use crate::io::Renderable;
use crate::observability::{set_current_view, set_phase, DashboardPhase};
use crate::store::{RecordStore, StoreCache};
use crate::views::{self, FilteredSet};
use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

/// Which page of the dashboard to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Overview,
    Trends,
    Genres,
    Duration,
    Market,
    /// `decade` defaults to the most recent decade in the crew table
    HallOfFame { role: Role, decade: Option<i32> },
    Report,
}

impl ViewKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Trends => "trends",
            Self::Genres => "genres",
            Self::Duration => "duration",
            Self::Market => "market",
            Self::HallOfFame { .. } => "hall_of_fame",
            Self::Report => "report",
        }
    }
}

/// Year range and genre choice as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub all_genres: bool,
}

#[derive(Debug, Clone)]
pub struct DashboardRequest {
    pub view: ViewKind,
    pub sources: SourcePaths,
    pub selection: Selection,
    pub output: OutputTarget,
}

pub fn run_dashboard(request: DashboardRequest) -> Result<()> {
    let config = load_config(request.sources.config.as_deref())?;
    let cache = StoreCache::new(&request.sources.movies, &request.sources.crew);
    let outcome = cache
        .get_or_load(&config.normalizer())
        .context("Failed to load the source tables")?;

    if !outcome.problems.is_empty() {
        info!(
            dropped = outcome.problems.len(),
            "rows dropped while loading, run `cinemap check` for details"
        );
    }

    let view = prepare_view(request.view, &outcome.store, &request.selection, &config)?;
    write_view(view.as_ref(), &request.output)
}

/// Build the requested view from a loaded store.
pub fn prepare_view(
    kind: ViewKind,
    store: &RecordStore,
    selection: &Selection,
    config: &DashboardConfig,
) -> Result<Box<dyn Renderable>> {
    let _view = set_current_view(kind.name());
    let span = info_span!("prepare_view", view = kind.name());
    let _enter = span.enter();

    let view: Box<dyn Renderable> = match kind {
        ViewKind::HallOfFame { role, decade } => {
            let decade = match decade {
                Some(year) => decade_of(year),
                None => store
                    .crew_decades()
                    .first()
                    .copied()
                    .context("The crew table has no decades")?,
            };
            let _phase = set_phase(DashboardPhase::Aggregating);
            Box::new(views::prepare_hall_of_fame(
                store,
                role,
                decade,
                &config.leaderboard,
            ))
        }
        ViewKind::Report => {
            let criteria = build_criteria(selection, config, store)?;
            let _phase = set_phase(DashboardPhase::Aggregating);
            Box::new(views::prepare_report(store, &criteria, config))
        }
        ViewKind::Overview => {
            let (criteria, filtered) = select(store, selection, config)?;
            let _phase = set_phase(DashboardPhase::Aggregating);
            Box::new(views::prepare_overview(&filtered, &criteria))
        }
        ViewKind::Trends => {
            let (criteria, filtered) = select(store, selection, config)?;
            let _phase = set_phase(DashboardPhase::CrewMatching);
            Box::new(views::prepare_trends(store, &filtered, &criteria, config))
        }
        ViewKind::Genres => {
            let (_, filtered) = select(store, selection, config)?;
            let _phase = set_phase(DashboardPhase::Aggregating);
            Box::new(views::prepare_genres(&filtered))
        }
        ViewKind::Duration => {
            let (_, filtered) = select(store, selection, config)?;
            let _phase = set_phase(DashboardPhase::Aggregating);
            Box::new(views::prepare_duration(&filtered))
        }
        ViewKind::Market => {
            let (_, filtered) = select(store, selection, config)?;
            let _phase = set_phase(DashboardPhase::Aggregating);
            Box::new(views::prepare_market(&filtered, &config.market))
        }
    };
    Ok(view)
}

fn select<'a>(
    store: &'a RecordStore,
    selection: &Selection,
    config: &DashboardConfig,
) -> Result<(FilterCriteria, FilteredSet<'a>)> {
    let criteria = build_criteria(selection, config, store)?;
    let _phase = set_phase(DashboardPhase::Filtering);
    let filtered = views::apply_filter(store, &criteria);
    debug!(
        from = criteria.years.min,
        to = criteria.years.max,
        genres = criteria.genres.len(),
        kept = filtered.stats.rows_kept,
        "selection applied"
    );
    Ok((criteria, filtered))
}

/// Turn the command-line selection into filter criteria.
///
/// Missing years come from the configured defaults and both ends are clamped
/// to the years present in the data. A range that misses the data entirely
/// is kept as given, which selects nothing. Genres are normalized, so raw codes and
/// display labels are both accepted. An empty genre set is rejected.
pub fn build_criteria(
    selection: &Selection,
    config: &DashboardConfig,
    store: &RecordStore,
) -> Result<FilterCriteria> {
    let defaults = config.filter.years();
    let requested = YearRange::new(
        selection.from.unwrap_or(defaults.min),
        selection.to.unwrap_or(defaults.max),
    );
    let years = match store.year_bounds() {
        Some(bounds) => requested.clamped_to(bounds).unwrap_or_else(|| {
            warn!(
                from = requested.min,
                to = requested.max,
                data_from = bounds.min,
                data_to = bounds.max,
                "year range is outside the data, nothing will be selected"
            );
            requested
        }),
        None => requested,
    };

    let genres: Vec<String> = if selection.all_genres {
        store.all_genres().map(str::to_string).collect()
    } else {
        match &selection.genres {
            Some(requested) => {
                let normalizer = config.normalizer();
                requested
                    .iter()
                    .map(|genre| genre.trim())
                    .filter(|genre| !genre.is_empty())
                    .map(|genre| normalizer.normalize(genre).into_owned())
                    .collect()
            }
            None => config.genres.default_selection.clone(),
        }
    };

    let criteria = FilterCriteria::new(years, genres);
    criteria.validate()?;

    for genre in &criteria.genres {
        if !store.all_genres().any(|known| known == genre) {
            warn!(genre = %genre, "genre not present in the movies table");
        }
    }
    Ok(criteria)
}
