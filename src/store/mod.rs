//! Record store: the two normalized, immutable input tables.
//!
//! Built once per load. Genre labels are normalized here and never again,
//! and the crew-matching [`GenreIndex`] is precomputed so crew views only
//! do lookups.

mod cache;
mod parse;

pub use cache::StoreCache;

use crate::core::{CrewProfile, Movie, Role, TopMovie, YearRange};
use crate::genres::GenreNormalizer;
use crate::io::csv_source::{RawCrewRow, RawMovieRow};
use crate::pipeline::crew_match::GenreIndex;
use im::Vector;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use tracing::{debug, info_span, warn};

/// Which input table a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Movies,
    Crew,
}

/// Why a source row was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DropReason {
    MalformedRecord(String),
    MissingId,
    MissingTitle,
    MissingGenre,
    MissingYear,
    InvalidRating(String),
    DuplicateGenreRow,
    MissingName,
    UnknownRole(String),
    MissingDecade,
    DuplicateProfile,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MalformedRecord(error) => write!(f, "malformed record: {}", error),
            DropReason::MissingId => f.write_str("missing tconst"),
            DropReason::MissingTitle => f.write_str("missing title"),
            DropReason::MissingGenre => f.write_str("missing genre"),
            DropReason::MissingYear => f.write_str("missing or non-numeric start year"),
            DropReason::InvalidRating(raw) => write!(f, "rating '{}' is not a number in [0, 10]", raw),
            DropReason::DuplicateGenreRow => f.write_str("duplicate (tconst, genre) row"),
            DropReason::MissingName => f.write_str("missing person name"),
            DropReason::UnknownRole(raw) => write!(f, "unknown role category '{}'", raw),
            DropReason::MissingDecade => f.write_str("missing or non-numeric decade"),
            DropReason::DuplicateProfile => f.write_str("duplicate (name, role, decade) profile"),
        }
    }
}

/// A dropped source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadProblem {
    pub table: Table,
    /// 1-based line in the source file (0 when unknown)
    pub line: u64,
    pub reason: DropReason,
}

impl fmt::Display for LoadProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = match self.table {
            Table::Movies => "movies",
            Table::Crew => "crew",
        };
        write!(f, "{}:{}: {}", table, self.line, self.reason)
    }
}

/// Size summary of a loaded store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStats {
    pub movie_rows: usize,
    pub distinct_titles: usize,
    pub crew_profiles: usize,
    pub genres: usize,
    pub year_bounds: Option<YearRange>,
}

/// Store plus the rows that did not make it in.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub store: RecordStore,
    pub problems: Vec<LoadProblem>,
}

/// Immutable movie and crew tables.
#[derive(Debug, Clone)]
pub struct RecordStore {
    movies: Vector<Movie>,
    crew: Vector<CrewProfile>,
    genre_index: GenreIndex,
    year_bounds: Option<YearRange>,
    genres: BTreeSet<String>,
}

impl RecordStore {
    /// Normalize raw rows into a store, recording every dropped row.
    pub fn build(
        raw_movies: Vec<RawMovieRow>,
        raw_crew: Vec<RawCrewRow>,
        normalizer: &GenreNormalizer,
    ) -> LoadOutcome {
        let span = info_span!("build_store", movies = raw_movies.len(), crew = raw_crew.len());
        let _enter = span.enter();

        let mut problems = Vec::new();
        let movies = normalize_movies(raw_movies, normalizer, &mut problems);
        let crew = normalize_crew(raw_crew, &mut problems);

        if !problems.is_empty() {
            warn!(dropped = problems.len(), "some source rows were dropped");
        }

        let store = Self::from_records(movies, crew);
        debug!(stats = ?store.stats(), "record store ready");
        LoadOutcome { store, problems }
    }

    /// Store over rows that are already normalized.
    pub fn from_records(movies: Vec<Movie>, crew: Vec<CrewProfile>) -> Self {
        let genre_index = GenreIndex::build(&movies);
        let year_bounds = movies
            .iter()
            .map(Movie::year)
            .fold(None, |bounds: Option<YearRange>, year| {
                Some(match bounds {
                    None => YearRange::new(year, year),
                    Some(b) => YearRange::new(b.min.min(year), b.max.max(year)),
                })
            });
        let genres = movies.iter().map(|m| m.genre.clone()).collect();

        Self {
            movies: movies.into_iter().collect(),
            crew: crew.into_iter().collect(),
            genre_index,
            year_bounds,
            genres,
        }
    }

    pub fn movies(&self) -> &Vector<Movie> {
        &self.movies
    }

    pub fn crew(&self) -> &Vector<CrewProfile> {
        &self.crew
    }

    pub fn genre_index(&self) -> &GenreIndex {
        &self.genre_index
    }

    /// Observed start-year span; `None` for an empty movie table.
    pub fn year_bounds(&self) -> Option<YearRange> {
        self.year_bounds
    }

    /// Distinct genre labels, sorted.
    pub fn all_genres(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(String::as_str)
    }

    /// Distinct crew decades, most recent first.
    pub fn crew_decades(&self) -> Vec<i32> {
        let decades: BTreeSet<i32> = self.crew.iter().map(|p| p.decade).collect();
        decades.into_iter().rev().collect()
    }

    pub fn stats(&self) -> StoreStats {
        let titles: HashSet<&str> = self.movies.iter().map(|m| m.tconst.as_str()).collect();
        StoreStats {
            movie_rows: self.movies.len(),
            distinct_titles: titles.len(),
            crew_profiles: self.crew.len(),
            genres: self.genres.len(),
            year_bounds: self.year_bounds,
        }
    }
}

fn normalize_movies(
    raw: Vec<RawMovieRow>,
    normalizer: &GenreNormalizer,
    problems: &mut Vec<LoadProblem>,
) -> Vec<Movie> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut movies = Vec::with_capacity(raw.len());

    for row in raw {
        match movie_from_row(&row, normalizer) {
            Ok(movie) => {
                if seen.insert((movie.tconst.clone(), movie.genre.clone())) {
                    movies.push(movie);
                } else {
                    problems.push(LoadProblem {
                        table: Table::Movies,
                        line: row.line,
                        reason: DropReason::DuplicateGenreRow,
                    });
                }
            }
            Err(reason) => problems.push(LoadProblem {
                table: Table::Movies,
                line: row.line,
                reason,
            }),
        }
    }
    movies
}

fn movie_from_row(row: &RawMovieRow, normalizer: &GenreNormalizer) -> Result<Movie, DropReason> {
    if let Some(error) = &row.malformed {
        return Err(DropReason::MalformedRecord(error.clone()));
    }
    let tconst = parse::text(&row.tconst).ok_or(DropReason::MissingId)?;
    let title = parse::text(&row.title).ok_or(DropReason::MissingTitle)?;
    let genre = parse::text(&row.genre).ok_or(DropReason::MissingGenre)?;
    let year = parse::year(&row.year).ok_or(DropReason::MissingYear)?;
    let rating = parse::float(&row.rating)
        .filter(|r| (0.0..=10.0).contains(r))
        .ok_or_else(|| DropReason::InvalidRating(row.rating.clone().unwrap_or_default()))?;

    let mut movie = Movie::new(tconst, title, year, normalizer.normalize(genre), rating)
        .with_votes(parse::count(&row.votes).unwrap_or(0))
        .with_runtime(parse::positive(&row.runtime));
    if let Some(region) = parse::text(&row.region) {
        movie = movie.with_region(region);
    }
    if let Some(macro_region) = parse::text(&row.macro_region) {
        movie = movie.with_macro_region(macro_region);
    }
    if let Some(countries) = parse::positive(&row.distribution_count) {
        movie = movie.with_distribution(countries);
    }
    for market in &row.markets {
        movie = movie.with_market(market.as_str());
    }
    Ok(movie)
}

fn normalize_crew(raw: Vec<RawCrewRow>, problems: &mut Vec<LoadProblem>) -> Vec<CrewProfile> {
    let mut seen: HashSet<(String, Role, i32)> = HashSet::new();
    let mut crew = Vec::with_capacity(raw.len());

    for row in raw {
        let reason = match profile_from_row(&row) {
            Ok(profile) => {
                if seen.insert((profile.name.clone(), profile.role, profile.decade)) {
                    crew.push(profile);
                    continue;
                }
                DropReason::DuplicateProfile
            }
            Err(reason) => reason,
        };
        problems.push(LoadProblem {
            table: Table::Crew,
            line: row.line,
            reason,
        });
    }
    crew
}

fn profile_from_row(row: &RawCrewRow) -> Result<CrewProfile, DropReason> {
    if let Some(error) = &row.malformed {
        return Err(DropReason::MalformedRecord(error.clone()));
    }
    let name = parse::text(&row.name).ok_or(DropReason::MissingName)?;
    let category = parse::text(&row.category).unwrap_or_default();
    let role: Role = category
        .parse()
        .map_err(|_| DropReason::UnknownRole(category.to_string()))?;
    let decade = parse::year(&row.decade).ok_or(DropReason::MissingDecade)?;
    let mean_rating = parse::float(&row.mean_rating)
        .filter(|r| (0.0..=10.0).contains(r))
        .ok_or_else(|| DropReason::InvalidRating(row.mean_rating.clone().unwrap_or_default()))?;

    let mut top_movie = TopMovie::new(
        parse::text(&row.top_movie_title).unwrap_or_default(),
        parse::year(&row.top_movie_year),
    );
    top_movie.rating = parse::float(&row.top_movie_rating);

    let total_movies = parse::count(&row.total_movies)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0);

    Ok(CrewProfile::new(name, role, decade, top_movie).with_stats(
        mean_rating,
        parse::count(&row.total_votes).unwrap_or(0),
        total_movies,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(s: &str) -> Option<String> {
        (!s.is_empty()).then(|| s.to_string())
    }

    fn raw_movie(line: u64, tconst: &str, title: &str, year: &str, genre: &str, rating: &str) -> RawMovieRow {
        RawMovieRow {
            line,
            tconst: cell(tconst),
            title: cell(title),
            year: cell(year),
            genre: cell(genre),
            rating: cell(rating),
            ..RawMovieRow::default()
        }
    }

    fn raw_crew(line: u64, name: &str, category: &str, decade: &str) -> RawCrewRow {
        RawCrewRow {
            line,
            name: cell(name),
            category: cell(category),
            decade: cell(decade),
            mean_rating: cell("7.0"),
            total_votes: cell("1500"),
            total_movies: cell("2"),
            top_movie_title: cell("A"),
            top_movie_year: cell("1995.0"),
            top_movie_rating: cell("8.0"),
            ..RawCrewRow::default()
        }
    }

    #[test]
    fn test_build_normalizes_genres_once() {
        let outcome = RecordStore::build(
            vec![
                raw_movie(2, "tt1", "A", "1995", "Thriller", "8.0"),
                raw_movie(3, "tt1", "A", "1995", "Drama", "8.0"),
            ],
            vec![],
            &GenreNormalizer::default(),
        );

        let genres: Vec<&str> = outcome.store.all_genres().collect();
        assert_eq!(genres, vec!["Drama", "Suspense"]);
        assert!(outcome.problems.is_empty());
    }

    #[test]
    fn test_build_drops_invalid_rows_with_reasons() {
        let outcome = RecordStore::build(
            vec![
                raw_movie(2, "tt1", "A", "1995", "", "8.0"),
                raw_movie(3, "tt2", "B", "", "Drama", "8.0"),
                raw_movie(4, "tt3", "C", "1995", "Drama", "11"),
                raw_movie(5, "tt4", "D", "1995", "Drama", "6.5"),
                raw_movie(6, "tt4", "D", "1995", "Drama", "6.5"),
            ],
            vec![],
            &GenreNormalizer::default(),
        );

        assert_eq!(outcome.store.movies().len(), 1);
        let reasons: Vec<(u64, DropReason)> = outcome
            .problems
            .iter()
            .map(|p| (p.line, p.reason.clone()))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (2, DropReason::MissingGenre),
                (3, DropReason::MissingYear),
                (4, DropReason::InvalidRating("11".into())),
                (6, DropReason::DuplicateGenreRow),
            ]
        );
    }

    #[test]
    fn test_malformed_records_are_dropped_and_loading_continues() {
        let broken = RawMovieRow {
            line: 3,
            malformed: Some("invalid UTF-8".into()),
            ..RawMovieRow::default()
        };
        let outcome = RecordStore::build(
            vec![
                raw_movie(2, "tt1", "A", "1995", "Drama", "8.0"),
                broken,
                raw_movie(4, "tt3", "C", "1997", "Drama", "6.5"),
            ],
            vec![RawCrewRow {
                line: 2,
                malformed: Some("invalid UTF-8".into()),
                ..RawCrewRow::default()
            }],
            &GenreNormalizer::default(),
        );

        assert_eq!(outcome.store.movies().len(), 2);
        let reasons: Vec<(Table, u64, DropReason)> = outcome
            .problems
            .iter()
            .map(|p| (p.table, p.line, p.reason.clone()))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (Table::Movies, 3, DropReason::MalformedRecord("invalid UTF-8".into())),
                (Table::Crew, 2, DropReason::MalformedRecord("invalid UTF-8".into())),
            ]
        );
    }

    #[test]
    fn test_build_crew_enforces_one_profile_per_key() {
        let outcome = RecordStore::build(
            vec![],
            vec![
                raw_crew(2, "Jane", "actress", "1990"),
                raw_crew(3, "Jane", "actress", "1990"),
                raw_crew(4, "Jane", "director", "1990"),
                raw_crew(5, "John", "producer", "1990"),
                raw_crew(6, "John", "actor", ""),
            ],
            &GenreNormalizer::default(),
        );

        assert_eq!(outcome.store.crew().len(), 2);
        let reasons: Vec<DropReason> = outcome.problems.iter().map(|p| p.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                DropReason::DuplicateProfile,
                DropReason::UnknownRole("producer".into()),
                DropReason::MissingDecade,
            ]
        );
        assert_eq!(outcome.store.crew()[0].top_movie.year, Some(1995));
    }

    #[test]
    fn test_year_bounds_and_decades() {
        let store = RecordStore::from_records(
            vec![
                Movie::new("tt1", "A", 1972, "Drama", 7.0),
                Movie::new("tt2", "B", 2011, "Drama", 7.0),
                Movie::new("tt3", "C", 1999, "Drama", 7.0),
            ],
            vec![
                CrewProfile::new("x", Role::Actor, 1970, TopMovie::new("A", Some(1972))),
                CrewProfile::new("y", Role::Actor, 2010, TopMovie::new("B", Some(2011))),
                CrewProfile::new("z", Role::Director, 1970, TopMovie::new("A", Some(1972))),
            ],
        );

        assert_eq!(store.year_bounds(), Some(YearRange::new(1972, 2011)));
        assert_eq!(store.crew_decades(), vec![2010, 1970]);
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::from_records(vec![], vec![]);
        assert_eq!(store.year_bounds(), None);
        assert_eq!(store.stats().distinct_titles, 0);
        assert!(store.genre_index().is_empty());
    }

    #[test]
    fn test_problem_display() {
        let problem = LoadProblem {
            table: Table::Crew,
            line: 7,
            reason: DropReason::UnknownRole("writer".into()),
        };
        assert_eq!(problem.to_string(), "crew:7: unknown role category 'writer'");
    }
}
