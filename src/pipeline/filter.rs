//! Filter engine: `(year range, genre set)` predicate over the movie table.
//!
//! Each predicate is a small pure function so callers (and tests) can
//! compose them; [`filter_movies`] is the one the views use.

use crate::core::{FilterCriteria, Movie, YearRange};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Counts of why rows were kept or dropped by a filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStatistics {
    pub rows_seen: usize,
    pub dropped_by_year: usize,
    pub dropped_by_genre: usize,
    pub rows_kept: usize,
}

#[inline]
pub fn in_year_range(movie: &Movie, years: &YearRange) -> bool {
    years.contains(movie.year())
}

#[inline]
pub fn in_genre_set(movie: &Movie, genres: &BTreeSet<String>) -> bool {
    genres.contains(&movie.genre)
}

#[inline]
pub fn matches_criteria(movie: &Movie, criteria: &FilterCriteria) -> bool {
    in_year_range(movie, &criteria.years) && in_genre_set(movie, &criteria.genres)
}

/// Rows matching `criteria`, in table order.
///
/// An empty genre set selects nothing. An inverted year range selects
/// nothing as well; clamping the range is the caller's job.
pub fn filter_movies<'a, I>(movies: I, criteria: &FilterCriteria) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    filter_with_stats(movies, criteria).0
}

/// Like [`filter_movies`], also reporting why rows were dropped.
pub fn filter_with_stats<'a, I>(
    movies: I,
    criteria: &FilterCriteria,
) -> (Vec<&'a Movie>, FilterStatistics)
where
    I: IntoIterator<Item = &'a Movie>,
{
    let mut stats = FilterStatistics::default();

    let kept: Vec<&Movie> = movies
        .into_iter()
        .filter(|movie| {
            stats.rows_seen += 1;
            if !in_year_range(movie, &criteria.years) {
                stats.dropped_by_year += 1;
                return false;
            }
            if !in_genre_set(movie, &criteria.genres) {
                stats.dropped_by_genre += 1;
                return false;
            }
            true
        })
        .collect();

    stats.rows_kept = kept.len();
    (kept, stats)
}

/// One row per `tconst`, keeping the first occurrence.
///
/// Title-level statistics (KPIs, market reach) must not count a title once
/// per genre row.
pub fn distinct_titles<'a>(movies: &[&'a Movie]) -> Vec<&'a Movie> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(movies.len());
    movies
        .iter()
        .copied()
        .filter(|movie| seen.insert(movie.tconst.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn movie(tconst: &str, year: i32, genre: &str) -> Movie {
        Movie::new(tconst, format!("title {}", tconst), year, genre, 7.0)
    }

    fn criteria(min: i32, max: i32, genres: &[&str]) -> FilterCriteria {
        FilterCriteria::new(YearRange::new(min, max), genres.iter().copied())
    }

    #[test]
    fn test_filter_by_year_and_genre() {
        let movies = vec![
            movie("tt1", 1989, "Drama"),
            movie("tt2", 1990, "Drama"),
            movie("tt3", 1995, "Comédia"),
            movie("tt4", 2000, "Drama"),
            movie("tt5", 2001, "Drama"),
        ];

        let kept = filter_movies(&movies, &criteria(1990, 2000, &["Drama"]));

        let ids: Vec<&str> = kept.iter().map(|m| m.tconst.as_str()).collect();
        assert_eq!(ids, vec!["tt2", "tt4"]);
    }

    #[test]
    fn test_empty_genre_set_selects_nothing() {
        let movies = vec![movie("tt1", 1995, "Drama")];
        let kept = filter_movies(&movies, &criteria(1900, 2100, &[]));
        assert!(kept.is_empty());
    }

    #[test]
    fn test_inverted_range_selects_nothing() {
        let movies = vec![movie("tt1", 1995, "Drama")];
        let kept = filter_movies(&movies, &criteria(2000, 1990, &["Drama"]));
        assert!(kept.is_empty());
    }

    #[test]
    fn test_filter_statistics() {
        let movies = vec![
            movie("tt1", 1980, "Drama"),
            movie("tt2", 1995, "Terror"),
            movie("tt3", 1995, "Drama"),
        ];

        let (kept, stats) = filter_with_stats(&movies, &criteria(1990, 1999, &["Drama"]));

        assert_eq!(kept.len(), 1);
        assert_eq!(
            stats,
            FilterStatistics {
                rows_seen: 3,
                dropped_by_year: 1,
                dropped_by_genre: 1,
                rows_kept: 1,
            }
        );
    }

    #[test]
    fn test_filter_does_not_touch_input() {
        let movies = vec![movie("tt1", 1995, "Drama"), movie("tt2", 1995, "Terror")];
        let before = movies.clone();
        let _ = filter_movies(&movies, &criteria(1990, 1999, &["Drama"]));
        assert_eq!(movies, before);
    }

    #[test]
    fn test_distinct_titles_keeps_first_row() {
        let movies = vec![
            movie("tt1", 1995, "Drama"),
            movie("tt1", 1995, "Suspense"),
            movie("tt2", 1996, "Drama"),
        ];
        let refs: Vec<&Movie> = movies.iter().collect();

        let distinct = distinct_titles(&refs);

        assert_eq!(distinct.len(), 2);
        assert_eq!(distinct[0].genre, "Drama");
        assert_eq!(distinct[1].tconst, "tt2");
    }
}
