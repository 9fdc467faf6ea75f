//! Genre normalization: raw genre codes to display labels.
//!
//! The translation table is fixed at build time and applied once when the
//! movie table is loaded. Lookups are total: a code missing from the table is
//! its own display label, so no row is ever dropped or renamed by accident.

use std::borrow::Cow;
use std::collections::HashMap;

/// Default raw code → display label table.
pub const DEFAULT_TRANSLATION: &[(&str, &str)] = &[
    ("Action", "Ação"),
    ("Adventure", "Aventura"),
    ("Animation", "Animação"),
    ("Biography", "Biografia"),
    ("Comedy", "Comédia"),
    ("Crime", "Crime"),
    ("Documentary", "Documentário"),
    ("Drama", "Drama"),
    ("Family", "Família"),
    ("Fantasy", "Fantasia"),
    ("Film-Noir", "Noir"),
    ("History", "História"),
    ("Horror", "Terror"),
    ("Music", "Música"),
    ("Musical", "Musical"),
    ("Mystery", "Mistério"),
    ("Romance", "Romance"),
    ("Sci-Fi", "Ficção Científica"),
    ("Sport", "Esporte"),
    ("Thriller", "Suspense"),
    ("War", "Guerra"),
    ("Western", "Faroeste"),
];

/// Genres selected when the caller does not choose any.
pub const DEFAULT_GENRES: &[&str] = &[
    "Ação",
    "Drama",
    "Ficção Científica",
    "Terror",
    "Romance",
    "Comédia",
];

/// Maps raw genre codes to display labels.
#[derive(Debug, Clone)]
pub struct GenreNormalizer {
    table: HashMap<String, String>,
}

impl Default for GenreNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GenreNormalizer {
    /// Normalizer over [`DEFAULT_TRANSLATION`].
    pub fn new() -> Self {
        Self {
            table: DEFAULT_TRANSLATION
                .iter()
                .map(|(raw, label)| (raw.to_string(), label.to_string()))
                .collect(),
        }
    }

    /// Default table with entries added or replaced by `overrides`.
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut normalizer = Self::new();
        normalizer
            .table
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        normalizer
    }

    /// Display label for a raw code. Surrounding whitespace is ignored;
    /// unmapped codes pass through unchanged.
    pub fn normalize<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        let trimmed = raw.trim();
        match self.table.get(trimmed) {
            Some(label) => Cow::Owned(label.clone()),
            None => Cow::Borrowed(trimmed),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
