use serde::Serialize;
use std::collections::BTreeSet;

/// Decade bucket for a year: `floor(year / 10) * 10`.
///
/// Uses euclidean division so the floor also holds for negative years.
#[inline]
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// One row of the movie table.
///
/// Source rows are exploded by genre, so the same `tconst` appears once per
/// genre it carries. `year` and `decade` are only reachable through
/// accessors so the decade can never drift from the start year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub tconst: String,
    pub title: String,
    year: i32,
    decade: i32,
    pub genre: String,
    /// Average rating in [0, 10]
    pub rating: f64,
    pub votes: u64,
    /// Runtime in minutes; `None` when unknown
    pub runtime: Option<u32>,
    pub region: Option<String>,
    pub macro_region: Option<String>,
    /// Number of countries the title was distributed in
    pub distribution_count: Option<u32>,
    /// Lower-case market codes the title was released in (`us`, `br`, ...)
    pub markets: BTreeSet<String>,
}

impl Movie {
    pub fn new(
        tconst: impl Into<String>,
        title: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            tconst: tconst.into(),
            title: title.into(),
            year,
            decade: decade_of(year),
            genre: genre.into(),
            rating,
            votes: 0,
            runtime: None,
            region: None,
            macro_region: None,
            distribution_count: None,
            markets: BTreeSet::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn decade(&self) -> i32 {
        self.decade
    }

    pub fn with_votes(mut self, votes: u64) -> Self {
        self.votes = votes;
        self
    }

    pub fn with_runtime(mut self, runtime: Option<u32>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_macro_region(mut self, macro_region: impl Into<String>) -> Self {
        self.macro_region = Some(macro_region.into());
        self
    }

    pub fn with_distribution(mut self, countries: u32) -> Self {
        self.distribution_count = Some(countries);
        self
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.markets.insert(market.into().to_lowercase());
        self
    }

    /// Whether the title was released in the given market (case-insensitive).
    pub fn released_in(&self, market: &str) -> bool {
        self.markets.contains(&market.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decade_of_floors() {
        assert_eq!(decade_of(1990), 1990);
        assert_eq!(decade_of(1995), 1990);
        assert_eq!(decade_of(1999), 1990);
        assert_eq!(decade_of(2000), 2000);
        assert_eq!(decade_of(-5), -10);
    }

    #[test]
    fn test_new_derives_decade_from_year() {
        let movie = Movie::new("tt0000001", "A", 1987, "Drama", 7.5);
        assert_eq!(movie.year(), 1987);
        assert_eq!(movie.decade(), 1980);
    }

    #[test]
    fn test_markets_are_case_insensitive() {
        let movie = Movie::new("tt1", "A", 2001, "Drama", 6.0).with_market("US");
        assert!(movie.released_in("us"));
        assert!(movie.released_in("Us"));
        assert!(!movie.released_in("br"));
    }
}
