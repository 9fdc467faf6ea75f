//! Per-group ranking for rank-over-time ("bump") series.
//!
//! Ranks are dense and unique inside a group: ties get consecutive ranks in
//! input order, so every line in a bump chart owns a distinct integer slot.
//! Rows ranked past `top_k` are dropped, not folded into an "other" bucket.

use super::aggregate::{DecadeGenreCount, DecadeGenreRating};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Ordering direction; rank 1 is the first row in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankDirection {
    /// Highest value first
    #[default]
    Descending,
    /// Lowest value first
    Ascending,
}

impl RankDirection {
    fn compare(&self, a: f64, b: f64) -> Ordering {
        match self {
            RankDirection::Descending => b.total_cmp(&a),
            RankDirection::Ascending => a.total_cmp(&b),
        }
    }
}

/// A row with its 1-based rank inside its group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub rank: usize,
    pub item: T,
}

/// One point of a bump series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BumpPoint {
    pub decade: i32,
    pub genre: String,
    pub value: f64,
    pub rank: usize,
}

/// Rank `rows` independently within each group.
///
/// Output is ordered by group key, then by rank. Within a group, rows with
/// equal values keep their input order. At most `top_k` rows survive per
/// group; `top_k == 0` yields nothing.
pub fn rank_within_groups<'a, T, K, G, V>(
    rows: &'a [T],
    group_of: G,
    value_of: V,
    direction: RankDirection,
    top_k: usize,
) -> Vec<Ranked<&'a T>>
where
    K: Ord,
    G: Fn(&T) -> K,
    V: Fn(&T) -> f64,
{
    let mut groups: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();
    for row in rows {
        groups.entry(group_of(row)).or_default().push(row);
    }

    groups
        .into_values()
        .flat_map(|mut members| {
            // stable sort: equal values stay in input order
            members.sort_by(|a, b| direction.compare(value_of(a), value_of(b)));
            members
                .into_iter()
                .take(top_k)
                .enumerate()
                .map(|(index, item)| Ranked {
                    rank: index + 1,
                    item,
                })
        })
        .collect()
}

/// "Most produced" bump series: genres ranked by row count per decade.
pub fn production_bump(counts: &[DecadeGenreCount], top_k: usize) -> Vec<BumpPoint> {
    rank_within_groups(
        counts,
        |row| row.decade,
        |row| row.count as f64,
        RankDirection::Descending,
        top_k,
    )
    .into_iter()
    .map(|ranked| BumpPoint {
        decade: ranked.item.decade,
        genre: ranked.item.genre.clone(),
        value: ranked.item.count as f64,
        rank: ranked.rank,
    })
    .collect()
}

/// "Highest rated" bump series: genres ranked by mean rating per decade.
pub fn prestige_bump(ratings: &[DecadeGenreRating], top_k: usize) -> Vec<BumpPoint> {
    rank_within_groups(
        ratings,
        |row| row.decade,
        |row| row.mean_rating,
        RankDirection::Descending,
        top_k,
    )
    .into_iter()
    .map(|ranked| BumpPoint {
        decade: ranked.item.decade,
        genre: ranked.item.genre.clone(),
        value: ranked.item.mean_rating,
        rank: ranked.rank,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn count(decade: i32, genre: &str, count: usize) -> DecadeGenreCount {
        DecadeGenreCount {
            decade,
            genre: genre.to_string(),
            count,
        }
    }

    #[test]
    fn test_ranks_descending_within_each_group() {
        let rows = vec![
            count(1990, "Ação", 5),
            count(1990, "Drama", 9),
            count(1990, "Terror", 7),
            count(2000, "Ação", 1),
            count(2000, "Drama", 3),
        ];

        let bump = production_bump(&rows, 10);

        let got: Vec<(i32, &str, usize)> = bump
            .iter()
            .map(|p| (p.decade, p.genre.as_str(), p.rank))
            .collect();
        assert_eq!(
            got,
            vec![
                (1990, "Drama", 1),
                (1990, "Terror", 2),
                (1990, "Ação", 3),
                (2000, "Drama", 1),
                (2000, "Ação", 2),
            ]
        );
    }

    #[test]
    fn test_ties_take_distinct_ranks_in_input_order() {
        let rows = vec![
            count(1990, "Comédia", 4),
            count(1990, "Drama", 4),
            count(1990, "Romance", 4),
        ];

        let bump = production_bump(&rows, 10);

        let got: Vec<(&str, usize)> = bump.iter().map(|p| (p.genre.as_str(), p.rank)).collect();
        assert_eq!(got, vec![("Comédia", 1), ("Drama", 2), ("Romance", 3)]);
    }

    #[test]
    fn test_truncates_to_top_k_per_group() {
        let rows: Vec<DecadeGenreCount> = (0..12)
            .map(|i| count(1990, &format!("g{:02}", i), i))
            .chain((0..3).map(|i| count(2000, &format!("g{:02}", i), i)))
            .collect();

        let bump = production_bump(&rows, 8);

        assert_eq!(bump.iter().filter(|p| p.decade == 1990).count(), 8);
        assert_eq!(bump.iter().filter(|p| p.decade == 2000).count(), 3);
        assert!(bump.iter().all(|p| p.rank <= 8));
    }

    #[test]
    fn test_top_k_zero_is_empty() {
        let rows = vec![count(1990, "Drama", 1)];
        assert!(production_bump(&rows, 0).is_empty());
    }

    #[test]
    fn test_ascending_direction() {
        let values = vec![(1, 3.0), (1, 1.0), (1, 2.0)];

        let ranked = rank_within_groups(
            &values,
            |row| row.0,
            |row| row.1,
            RankDirection::Ascending,
            10,
        );

        let order: Vec<f64> = ranked.iter().map(|r| r.item.1).collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_prestige_bump_uses_mean_rating() {
        let rows = vec![
            DecadeGenreRating {
                decade: 1990,
                genre: "Drama".into(),
                mean_rating: 6.5,
            },
            DecadeGenreRating {
                decade: 1990,
                genre: "Noir".into(),
                mean_rating: 7.9,
            },
        ];

        let bump = prestige_bump(&rows, 8);

        assert_eq!(bump[0].genre, "Noir");
        assert_eq!(bump[0].rank, 1);
        assert_eq!(bump[0].value, 7.9);
    }
}
