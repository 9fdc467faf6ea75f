//! Headline numbers for the filtered set.

use super::aggregate::Mean;
use super::filter::distinct_titles;
use crate::core::Movie;
use serde::Serialize;
use std::collections::BTreeMap;

/// Key performance indicators over distinct titles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub titles: usize,
    pub mean_rating: Option<f64>,
    pub total_votes: u64,
    /// Mean over titles with a known runtime
    pub mean_runtime: Option<f64>,
    /// Year with the highest mean rating; the earliest year wins ties
    pub best_year: Option<i32>,
}

/// Compute KPIs, counting each `tconst` once (first row wins).
pub fn compute_kpis(movies: &[&Movie]) -> Kpis {
    let titles = distinct_titles(movies);

    let mut rating = Mean::default();
    let mut runtime = Mean::default();
    let mut total_votes: u64 = 0;
    let mut by_year: BTreeMap<i32, Mean> = BTreeMap::new();

    for movie in &titles {
        rating.add(movie.rating);
        total_votes = total_votes.saturating_add(movie.votes);
        if let Some(minutes) = movie.runtime {
            runtime.add(f64::from(minutes));
        }
        by_year.entry(movie.year()).or_default().add(movie.rating);
    }

    // BTreeMap iterates years ascending; strict `>` keeps the earliest on ties
    let best_year = by_year
        .iter()
        .filter_map(|(year, mean)| Some((*year, mean.value()?)))
        .fold(None, |best: Option<(i32, f64)>, (year, value)| match best {
            Some((_, best_value)) if value <= best_value => best,
            _ => Some((year, value)),
        })
        .map(|(year, _)| year);

    Kpis {
        titles: titles.len(),
        mean_rating: rating.value(),
        total_votes,
        mean_runtime: runtime.value(),
        best_year,
    }
}
