//! Market reach: how far titles travel.
//!
//! Title-level figures use one row per `tconst`. Exportability works on the
//! genre-exploded rows, since a title counts toward every genre it carries.

use super::aggregate::Mean;
use super::filter::distinct_titles;
use crate::core::Movie;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distribution footprint category, by number of countries reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReachClass {
    /// One country
    Local,
    /// 2 to 5 countries
    Regional,
    /// 6 to 20 countries
    International,
    /// More than 20 countries
    Global,
}

impl ReachClass {
    pub const ALL: [ReachClass; 4] = [
        ReachClass::Local,
        ReachClass::Regional,
        ReachClass::International,
        ReachClass::Global,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReachClass::Local => "Local (1 country)",
            ReachClass::Regional => "Regional (2-5)",
            ReachClass::International => "International (6-20)",
            ReachClass::Global => "Global (20+)",
        }
    }
}

/// Classify a distribution count; zero countries has no class.
pub fn classify_reach(countries: u32) -> Option<ReachClass> {
    match countries {
        0 => None,
        1 => Some(ReachClass::Local),
        2..=5 => Some(ReachClass::Regional),
        6..=20 => Some(ReachClass::International),
        _ => Some(ReachClass::Global),
    }
}

/// Releases in one market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketShare {
    pub market: String,
    pub titles: usize,
    /// Percentage (0-100) of distinct titles
    pub pct: f64,
}

/// Head-to-head release counts for two markets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketComparison {
    pub total_titles: usize,
    pub primary: MarketShare,
    pub secondary: MarketShare,
    /// `primary / secondary`; `None` when the secondary market has no releases
    pub ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReachClassStats {
    pub class: ReachClass,
    pub titles: usize,
    pub mean_rating: f64,
    pub min_rating: f64,
    pub max_rating: f64,
}

/// How far one genre travels on average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreExportability {
    pub genre: String,
    pub mean_reach: f64,
    pub mean_rating: f64,
    pub rows: usize,
}

/// Compare releases in `primary` and `secondary`.
///
/// Returns `None` for an empty set, where no percentage is defined.
pub fn market_comparison(
    movies: &[&Movie],
    primary: &str,
    secondary: &str,
) -> Option<MarketComparison> {
    let titles = distinct_titles(movies);
    if titles.is_empty() {
        return None;
    }

    let share = |market: &str| {
        let count = titles.iter().filter(|movie| movie.released_in(market)).count();
        MarketShare {
            market: market.to_lowercase(),
            titles: count,
            pct: count as f64 / titles.len() as f64 * 100.0,
        }
    };

    let primary = share(primary);
    let secondary = share(secondary);
    let ratio = (secondary.titles > 0).then(|| primary.titles as f64 / secondary.titles as f64);

    Some(MarketComparison {
        total_titles: titles.len(),
        primary,
        secondary,
        ratio,
    })
}

/// Rating spread per reach class, in class order. Titles with no reach are skipped.
pub fn stats_by_reach_class(movies: &[&Movie]) -> Vec<ReachClassStats> {
    let mut groups: BTreeMap<ReachClass, (Mean, f64, f64)> = BTreeMap::new();
    for movie in distinct_titles(movies) {
        let Some(class) = movie.distribution_count.and_then(classify_reach) else {
            continue;
        };
        let (mean, min, max) = groups
            .entry(class)
            .or_insert((Mean::default(), f64::INFINITY, f64::NEG_INFINITY));
        mean.add(movie.rating);
        *min = min.min(movie.rating);
        *max = max.max(movie.rating);
    }

    groups
        .into_iter()
        .filter_map(|(class, (mean, min_rating, max_rating))| {
            Some(ReachClassStats {
                class,
                titles: mean.count(),
                mean_rating: mean.value()?,
                min_rating,
                max_rating,
            })
        })
        .collect()
}

/// Mean reach and rating per genre, keeping genres with more than
/// `min_rows` rows, sorted by ascending mean reach.
///
/// Genres where no row reports a distribution count are skipped.
pub fn exportability_by_genre(movies: &[&Movie], min_rows: usize) -> Vec<GenreExportability> {
    let mut groups: BTreeMap<&str, (Mean, Mean)> = BTreeMap::new();
    for movie in movies {
        let (reach, rating) = groups.entry(movie.genre.as_str()).or_default();
        if let Some(countries) = movie.distribution_count {
            reach.add(f64::from(countries));
        }
        rating.add(movie.rating);
    }

    let mut rows: Vec<GenreExportability> = groups
        .into_iter()
        .filter(|(_, (_, rating))| rating.count() > min_rows)
        .filter_map(|(genre, (reach, rating))| {
            Some(GenreExportability {
                genre: genre.to_string(),
                mean_reach: reach.value()?,
                mean_rating: rating.value()?,
                rows: rating.count(),
            })
        })
        .collect();

    rows.sort_by(|a, b| a.mean_reach.total_cmp(&b.mean_reach));
    rows
}

/// Mean distribution count over distinct titles that report one.
pub fn mean_reach(movies: &[&Movie]) -> Option<f64> {
    let mut mean = Mean::default();
    for movie in distinct_titles(movies) {
        if let Some(countries) = movie.distribution_count {
            mean.add(f64::from(countries));
        }
    }
    mean.value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn movie(tconst: &str, genre: &str, rating: f64) -> Movie {
        Movie::new(tconst, tconst, 2000, genre, rating)
    }

    #[test]
    fn test_reach_boundaries() {
        assert_eq!(classify_reach(0), None);
        assert_eq!(classify_reach(1), Some(ReachClass::Local));
        assert_eq!(classify_reach(2), Some(ReachClass::Regional));
        assert_eq!(classify_reach(5), Some(ReachClass::Regional));
        assert_eq!(classify_reach(6), Some(ReachClass::International));
        assert_eq!(classify_reach(20), Some(ReachClass::International));
        assert_eq!(classify_reach(21), Some(ReachClass::Global));
    }

    #[test]
    fn test_market_comparison_counts_distinct_titles() {
        let movies = vec![
            movie("tt1", "Drama", 7.0).with_market("us").with_market("br"),
            movie("tt1", "Suspense", 7.0).with_market("us").with_market("br"),
            movie("tt2", "Drama", 6.0).with_market("us"),
            movie("tt3", "Drama", 6.0).with_market("us"),
            movie("tt4", "Drama", 6.0),
        ];
        let refs: Vec<&Movie> = movies.iter().collect();

        let cmp = market_comparison(&refs, "US", "br").unwrap();

        assert_eq!(cmp.total_titles, 4);
        assert_eq!(cmp.primary.market, "us");
        assert_eq!(cmp.primary.titles, 3);
        assert_eq!(cmp.primary.pct, 75.0);
        assert_eq!(cmp.secondary.titles, 1);
        assert_eq!(cmp.ratio, Some(3.0));
    }

    #[test]
    fn test_ratio_absent_without_secondary_releases() {
        let movies = vec![movie("tt1", "Drama", 7.0).with_market("us")];
        let refs: Vec<&Movie> = movies.iter().collect();

        let cmp = market_comparison(&refs, "us", "br").unwrap();

        assert_eq!(cmp.ratio, None);
        assert_eq!(cmp.secondary.pct, 0.0);
    }

    #[test]
    fn test_market_comparison_empty() {
        assert!(market_comparison(&[], "us", "br").is_none());
    }

    #[test]
    fn test_stats_by_reach_class_in_class_order() {
        let movies = vec![
            movie("tt1", "Drama", 8.0).with_distribution(40),
            movie("tt2", "Drama", 6.0).with_distribution(1),
            movie("tt3", "Drama", 4.0).with_distribution(1),
            movie("tt4", "Drama", 9.0),
        ];
        let refs: Vec<&Movie> = movies.iter().collect();

        let stats = stats_by_reach_class(&refs);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].class, ReachClass::Local);
        assert_eq!(stats[0].titles, 2);
        assert_eq!(stats[0].mean_rating, 5.0);
        assert_eq!(stats[0].min_rating, 4.0);
        assert_eq!(stats[0].max_rating, 6.0);
        assert_eq!(stats[1].class, ReachClass::Global);
    }

    #[test]
    fn test_exportability_threshold_and_order() {
        let mut movies = Vec::new();
        for i in 0..3 {
            movies.push(movie(&format!("d{}", i), "Drama", 7.0).with_distribution(30));
            movies.push(movie(&format!("t{}", i), "Terror", 5.0).with_distribution(3));
        }
        movies.push(movie("c0", "Comédia", 6.0).with_distribution(99));
        let refs: Vec<&Movie> = movies.iter().collect();

        let rows = exportability_by_genre(&refs, 2);

        let genres: Vec<&str> = rows.iter().map(|r| r.genre.as_str()).collect();
        assert_eq!(genres, vec!["Terror", "Drama"]);
        assert_eq!(rows[0].mean_reach, 3.0);
        assert_eq!(rows[1].rows, 3);
    }

    #[test]
    fn test_mean_reach_over_distinct_titles() {
        let movies = vec![
            movie("tt1", "Drama", 7.0).with_distribution(10),
            movie("tt1", "Suspense", 7.0).with_distribution(10),
            movie("tt2", "Drama", 7.0).with_distribution(20),
            movie("tt3", "Drama", 7.0),
        ];
        let refs: Vec<&Movie> = movies.iter().collect();

        assert_eq!(mean_reach(&refs), Some(15.0));
        assert_eq!(mean_reach(&[]), None);
    }
}
