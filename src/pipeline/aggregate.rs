//! Grouped aggregates over a filtered working set.
//!
//! Every query is a pure reduction of `&[&Movie]`. Output rows are ordered
//! by their group key, and a group with no rows is absent from the output
//! (no zero-filling, no empty-group divisions).

use super::duration::{classify_runtime, DurationClass};
use super::filter::distinct_titles;
use crate::core::Movie;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Running mean accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    pub(crate) fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// `None` when nothing was added.
    pub(crate) fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeGenreCount {
    pub decade: i32,
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeGenreRating {
    pub decade: i32,
    pub genre: String,
    pub mean_rating: f64,
}

/// Volume and quality for one year (dual-axis series).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyVolume {
    pub year: i32,
    pub count: usize,
    pub mean_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreStats {
    pub genre: String,
    /// Distinct titles carrying the genre
    pub titles: usize,
    pub mean_rating: f64,
    pub mean_votes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationClassStats {
    pub class: DurationClass,
    pub count: usize,
    pub mean_votes: f64,
    pub mean_rating: f64,
}

/// Share of one duration class within a decade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeDurationShare {
    pub decade: i32,
    pub class: DurationClass,
    pub count: usize,
    /// `count / rows with a known runtime in the decade`
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStats {
    pub region: String,
    pub titles: usize,
    pub mean_rating: f64,
    pub mean_votes: f64,
    /// Mean distribution count over titles that report one
    pub mean_reach: Option<f64>,
}

/// Rows per (decade, genre).
pub fn count_by_decade_genre(movies: &[&Movie]) -> Vec<DecadeGenreCount> {
    let mut groups: BTreeMap<(i32, &str), usize> = BTreeMap::new();
    for movie in movies {
        *groups.entry((movie.decade(), movie.genre.as_str())).or_default() += 1;
    }

    groups
        .into_iter()
        .map(|((decade, genre), count)| DecadeGenreCount {
            decade,
            genre: genre.to_string(),
            count,
        })
        .collect()
}

/// Mean rating per (decade, genre).
pub fn mean_rating_by_decade_genre(movies: &[&Movie]) -> Vec<DecadeGenreRating> {
    let mut groups: BTreeMap<(i32, &str), Mean> = BTreeMap::new();
    for movie in movies {
        groups
            .entry((movie.decade(), movie.genre.as_str()))
            .or_default()
            .add(movie.rating);
    }

    groups
        .into_iter()
        .filter_map(|((decade, genre), mean)| {
            Some(DecadeGenreRating {
                decade,
                genre: genre.to_string(),
                mean_rating: mean.value()?,
            })
        })
        .collect()
}

/// Row count and mean rating per start year.
pub fn mean_rating_count_by_year(movies: &[&Movie]) -> Vec<YearlyVolume> {
    let mut groups: BTreeMap<i32, Mean> = BTreeMap::new();
    for movie in movies {
        groups.entry(movie.year()).or_default().add(movie.rating);
    }

    groups
        .into_iter()
        .filter_map(|(year, mean)| {
            Some(YearlyVolume {
                year,
                count: mean.count(),
                mean_rating: mean.value()?,
            })
        })
        .collect()
}

/// Genre summary: distinct titles, mean rating and mean votes over rows.
pub fn stats_by_genre(movies: &[&Movie]) -> Vec<GenreStats> {
    #[derive(Default)]
    struct Acc<'a> {
        titles: HashSet<&'a str>,
        rating: Mean,
        votes: Mean,
    }

    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();
    for movie in movies {
        let acc = groups.entry(movie.genre.as_str()).or_default();
        acc.titles.insert(movie.tconst.as_str());
        acc.rating.add(movie.rating);
        acc.votes.add(movie.votes as f64);
    }

    groups
        .into_iter()
        .filter_map(|(genre, acc)| {
            Some(GenreStats {
                genre: genre.to_string(),
                titles: acc.titles.len(),
                mean_rating: acc.rating.value()?,
                mean_votes: acc.votes.value()?,
            })
        })
        .collect()
}

/// Engagement per duration class. Rows without a runtime are skipped.
pub fn stats_by_duration_class(movies: &[&Movie]) -> Vec<DurationClassStats> {
    let mut groups: BTreeMap<DurationClass, (Mean, Mean)> = BTreeMap::new();
    for movie in movies {
        if let Some(class) = classify_runtime(movie.runtime) {
            let (votes, rating) = groups.entry(class).or_default();
            votes.add(movie.votes as f64);
            rating.add(movie.rating);
        }
    }

    groups
        .into_iter()
        .filter_map(|(class, (votes, rating))| {
            Some(DurationClassStats {
                class,
                count: votes.count(),
                mean_votes: votes.value()?,
                mean_rating: rating.value()?,
            })
        })
        .collect()
}

/// Duration class mix per decade, normalized so each decade sums to 1.
///
/// Rows without a runtime are skipped; a decade left with no rows produces
/// no output rows.
pub fn stats_by_decade_duration_class(movies: &[&Movie]) -> Vec<DecadeDurationShare> {
    let mut counts: BTreeMap<(i32, DurationClass), usize> = BTreeMap::new();
    let mut totals: BTreeMap<i32, usize> = BTreeMap::new();
    for movie in movies {
        if let Some(class) = classify_runtime(movie.runtime) {
            *counts.entry((movie.decade(), class)).or_default() += 1;
            *totals.entry(movie.decade()).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .filter_map(|((decade, class), count)| {
            let total = *totals.get(&decade)?;
            Some(DecadeDurationShare {
                decade,
                class,
                count,
                pct: count as f64 / total as f64,
            })
        })
        .collect()
}

/// Title-level statistics per region code.
pub fn stats_by_region(movies: &[&Movie]) -> Vec<RegionStats> {
    stats_by_key(movies, |movie| movie.region.as_deref())
}

/// Title-level statistics per macro-region.
pub fn stats_by_macro_region(movies: &[&Movie]) -> Vec<RegionStats> {
    stats_by_key(movies, |movie| movie.macro_region.as_deref())
}

/// Region-like grouping over distinct titles; rows without a key are skipped.
fn stats_by_key<'a, F>(movies: &[&'a Movie], key_of: F) -> Vec<RegionStats>
where
    F: Fn(&'a Movie) -> Option<&'a str>,
{
    #[derive(Default)]
    struct Acc {
        rating: Mean,
        votes: Mean,
        reach: Mean,
    }

    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();
    for movie in distinct_titles(movies) {
        let Some(key) = key_of(movie) else {
            continue;
        };
        let acc = groups.entry(key).or_default();
        acc.rating.add(movie.rating);
        acc.votes.add(movie.votes as f64);
        if let Some(reach) = movie.distribution_count {
            acc.reach.add(reach as f64);
        }
    }

    groups
        .into_iter()
        .filter_map(|(region, acc)| {
            Some(RegionStats {
                region: region.to_string(),
                titles: acc.rating.count(),
                mean_rating: acc.rating.value()?,
                mean_votes: acc.votes.value()?,
                mean_reach: acc.reach.value(),
            })
        })
        .collect()
}
