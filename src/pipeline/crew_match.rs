//! Crew matching: joining a crew profile's representative movie back to the
//! genre set of that movie in the movie table.
//!
//! The crew table has no genre column, so genre filtering of crew views goes
//! through [`GenreIndex`], built once per table load. Movies are keyed by
//! `(title, year)` so remakes sharing a title stay apart; a title-only key is
//! available as an explicit fallback for sparse data.

use crate::core::{CrewMetric, CrewProfile, Movie, Role, TopMovie};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

pub type GenreSet = BTreeSet<String>;

/// How a representative movie is looked up in the [`GenreIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleMatch {
    /// `(title, year)`; a missing year never matches
    #[default]
    Composite,
    /// Title alone, merging the genres of every film with that title
    TitleOnly,
    /// Composite first, title alone when the composite lookup misses
    CompositeThenTitle,
}

impl FromStr for TitleMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "composite" => Ok(TitleMatch::Composite),
            "title_only" | "title" => Ok(TitleMatch::TitleOnly),
            "composite_then_title" => Ok(TitleMatch::CompositeThenTitle),
            other => Err(format!(
                "unknown title match '{}' (expected composite, title_only or composite_then_title)",
                other
            )),
        }
    }
}

/// Borrowed lookup key for a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TitleKey<'a> {
    pub title: &'a str,
    pub year: Option<i32>,
}

impl<'a> TitleKey<'a> {
    pub fn new(title: &'a str, year: Option<i32>) -> Self {
        Self { title, year }
    }

    pub fn of_top_movie(top_movie: &'a TopMovie) -> Self {
        Self::new(&top_movie.title, top_movie.year)
    }
}

/// Genre sets per title and per `(title, year)`.
#[derive(Debug, Clone, Default)]
pub struct GenreIndex {
    by_title_year: HashMap<String, HashMap<i32, GenreSet>>,
    by_title: HashMap<String, GenreSet>,
}

impl GenreIndex {
    /// Collect every genre label seen for each title.
    pub fn build<'a, I>(movies: I) -> Self
    where
        I: IntoIterator<Item = &'a Movie>,
    {
        let mut index = GenreIndex::default();
        for movie in movies {
            index
                .by_title_year
                .entry(movie.title.clone())
                .or_default()
                .entry(movie.year())
                .or_default()
                .insert(movie.genre.clone());
            index
                .by_title
                .entry(movie.title.clone())
                .or_default()
                .insert(movie.genre.clone());
        }
        index
    }

    /// Genre set for `key`, or `None` when the movie is unknown.
    pub fn genres_for(&self, key: &TitleKey<'_>, mode: TitleMatch) -> Option<&GenreSet> {
        match mode {
            TitleMatch::Composite => self.composite(key),
            TitleMatch::TitleOnly => self.by_title.get(key.title),
            TitleMatch::CompositeThenTitle => self
                .composite(key)
                .or_else(|| self.by_title.get(key.title)),
        }
    }

    fn composite(&self, key: &TitleKey<'_>) -> Option<&GenreSet> {
        let year = key.year?;
        self.by_title_year.get(key.title)?.get(&year)
    }

    /// Number of distinct `(title, year)` keys.
    pub fn len(&self) -> usize {
        self.by_title_year.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title_year.is_empty()
    }
}

/// Whether the movie behind `key` carries at least one selected genre.
///
/// An unknown movie, or one with no recorded genres, never matches.
pub fn has_any_genre(
    index: &GenreIndex,
    key: &TitleKey<'_>,
    selected: &BTreeSet<String>,
    mode: TitleMatch,
) -> bool {
    index
        .genres_for(key, mode)
        .is_some_and(|genres| !genres.is_disjoint(selected))
}

/// Parameters for [`select_decade_winner`].
#[derive(Debug, Clone, Copy)]
pub struct WinnerQuery<'a> {
    pub decade: i32,
    pub role: Role,
    pub genres: &'a BTreeSet<String>,
    pub metric: CrewMetric,
    pub title_match: TitleMatch,
}

/// Best crew member of `role` in `decade` whose representative movie has a
/// selected genre.
///
/// Returns `None` when nobody qualifies. Ties on the metric go to the first
/// profile in input order.
pub fn select_decade_winner<'a, I>(
    crew: I,
    index: &GenreIndex,
    query: &WinnerQuery<'_>,
) -> Option<&'a CrewProfile>
where
    I: IntoIterator<Item = &'a CrewProfile>,
{
    crew.into_iter()
        .filter(|profile| profile.decade == query.decade && profile.role == query.role)
        .filter(|profile| {
            has_any_genre(
                index,
                &TitleKey::of_top_movie(&profile.top_movie),
                query.genres,
                query.title_match,
            )
        })
        .fold(None, |best: Option<&CrewProfile>, candidate| match best {
            Some(current) if query.metric.value(candidate) <= query.metric.value(current) => {
                Some(current)
            }
            _ => Some(candidate),
        })
}
