use super::{write_view, OutputTarget, SourcePaths};
use crate::config::load_config;
use crate::io::{Renderable, Section};
use crate::store::{DropReason, LoadOutcome, LoadProblem, StoreCache, StoreStats, Table};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Rows listed individually before the rest are summarized.
const MAX_LISTED_PROBLEMS: usize = 50;

/// Load summary for `cinemap check`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub movies: PathBuf,
    pub crew: PathBuf,
    pub stats: StoreStats,
    pub problems: Vec<LoadProblem>,
}

impl CheckReport {
    pub fn new(sources: &SourcePaths, outcome: &LoadOutcome) -> Self {
        Self {
            movies: sources.movies.clone(),
            crew: sources.crew.clone(),
            stats: outcome.store.stats(),
            problems: outcome.problems.clone(),
        }
    }

    /// Dropped rows per table and reason, in a stable order.
    pub fn problem_counts(&self) -> BTreeMap<(String, String), usize> {
        let mut counts = BTreeMap::new();
        for problem in &self.problems {
            let table = match problem.table {
                Table::Movies => "movies",
                Table::Crew => "crew",
            };
            *counts
                .entry((table.to_string(), reason_kind(&problem.reason)))
                .or_insert(0) += 1;
        }
        counts
    }
}

// Reasons carrying the raw value are grouped without it.
fn reason_kind(reason: &DropReason) -> String {
    match reason {
        DropReason::MalformedRecord(_) => "malformed record".to_string(),
        DropReason::InvalidRating(_) => "invalid rating".to_string(),
        DropReason::UnknownRole(_) => "unknown role category".to_string(),
        other => other.to_string(),
    }
}

impl Renderable for CheckReport {
    fn heading(&self) -> String {
        "Source check".to_string()
    }

    fn sections(&self) -> Vec<Section> {
        let stats = &self.stats;
        let years = stats
            .year_bounds
            .map_or_else(|| "-".to_string(), |y| format!("{}-{}", y.min, y.max));
        let summary = Section::new("Loaded")
            .note(format!("Movies: {}", self.movies.display()))
            .note(format!("Crew: {}", self.crew.display()))
            .table(
                ["Measure", "Value"],
                vec![
                    vec!["Movie rows".to_string(), stats.movie_rows.to_string()],
                    vec!["Distinct titles".to_string(), stats.distinct_titles.to_string()],
                    vec!["Genres".to_string(), stats.genres.to_string()],
                    vec!["Years".to_string(), years],
                    vec!["Crew profiles".to_string(), stats.crew_profiles.to_string()],
                ],
            );

        let counts: Vec<Vec<String>> = self
            .problem_counts()
            .into_iter()
            .map(|((table, reason), count)| vec![table, reason, count.to_string()])
            .collect();
        let by_reason = Section::new("Dropped rows").table_or_empty(
            ["Table", "Reason", "Rows"],
            counts,
            "No rows were dropped.",
        );

        let mut sections = vec![summary, by_reason];
        if !self.problems.is_empty() {
            let rows = self
                .problems
                .iter()
                .take(MAX_LISTED_PROBLEMS)
                .map(|p| vec![p.to_string()])
                .collect();
            let mut listed = Section::new("First dropped rows").table(["Row"], rows);
            if self.problems.len() > MAX_LISTED_PROBLEMS {
                listed = listed.note(format!(
                    "{} more not shown, use --format json for the full list",
                    self.problems.len() - MAX_LISTED_PROBLEMS
                ));
            }
            sections.push(listed);
        }
        sections
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Load both tables and report what was kept and dropped.
pub fn run_check(sources: SourcePaths, output: OutputTarget) -> Result<()> {
    let config = load_config(sources.config.as_deref())?;
    let cache = StoreCache::new(&sources.movies, &sources.crew);
    let outcome = cache
        .get_or_load(&config.normalizer())
        .context("Failed to load the source tables")?;

    let report = CheckReport::new(&sources, outcome);
    write_view(&report, &output)
}
