//! Leaderboard selection over the crew table.

use crate::core::{CrewMetric, CrewProfile, Role};
use serde::{Deserialize, Serialize};

/// Minimum activity a crew profile needs before it can enter the
/// "most acclaimed" ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationThresholds {
    /// Inclusive lower bound on `total_movies`
    pub min_movies: u32,
    /// `total_votes` must be strictly greater than this
    pub min_votes: u64,
}

impl Default for QualificationThresholds {
    fn default() -> Self {
        Self {
            min_movies: 2,
            min_votes: 1000,
        }
    }
}

impl QualificationThresholds {
    pub fn qualifies(&self, profile: &CrewProfile) -> bool {
        profile.total_movies >= self.min_movies && profile.total_votes > self.min_votes
    }
}

/// Result of [`top_n_qualified`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualifiedLeaderboard<'a> {
    pub entries: Vec<&'a CrewProfile>,
    /// True when nobody qualified and the unqualified slice was ranked instead
    pub fell_back: bool,
}

/// Crew profiles of one role and decade, in input order.
pub fn crew_slice<'a, I>(crew: I, role: Role, decade: i32) -> Vec<&'a CrewProfile>
where
    I: IntoIterator<Item = &'a CrewProfile>,
{
    crew.into_iter()
        .filter(|profile| profile.role == role && profile.decade == decade)
        .collect()
}

/// Stable descending sort by `metric`, truncated to `n`.
fn rank_by_metric(mut profiles: Vec<&CrewProfile>, metric: CrewMetric, n: usize) -> Vec<&CrewProfile> {
    profiles.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
    profiles.truncate(n);
    profiles
}

/// Top `n` crew profiles of `role` in `decade` by `metric`.
///
/// Equal metric values keep their input order. The output length is
/// `min(n, eligible)`.
pub fn top_n<'a, I>(
    crew: I,
    role: Role,
    decade: i32,
    metric: CrewMetric,
    n: usize,
) -> Vec<&'a CrewProfile>
where
    I: IntoIterator<Item = &'a CrewProfile>,
{
    rank_by_metric(crew_slice(crew, role, decade), metric, n)
}

/// Top `n` by mean rating among profiles meeting `thresholds`.
///
/// Falls back to ranking the whole (role, decade) slice when no profile
/// qualifies, so a sparse decade still gets a leaderboard.
pub fn top_n_qualified<'a, I>(
    crew: I,
    role: Role,
    decade: i32,
    thresholds: &QualificationThresholds,
    n: usize,
) -> QualifiedLeaderboard<'a>
where
    I: IntoIterator<Item = &'a CrewProfile>,
{
    let slice = crew_slice(crew, role, decade);
    let qualified: Vec<&CrewProfile> = slice
        .iter()
        .copied()
        .filter(|profile| thresholds.qualifies(profile))
        .collect();

    let fell_back = qualified.is_empty();
    let pool = if fell_back { slice } else { qualified };

    QualifiedLeaderboard {
        entries: rank_by_metric(pool, CrewMetric::Rating, n),
        fell_back,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TopMovie;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn profile(name: &str, role: Role, decade: i32, rating: f64, votes: u64, movies: u32) -> CrewProfile {
        CrewProfile::new(name, role, decade, TopMovie::new("T", Some(decade)))
            .with_stats(rating, votes, movies)
    }

    fn names(entries: &[&CrewProfile]) -> Vec<String> {
        entries.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_top_n_stable_on_ties() {
        let crew = vec![
            profile("a", Role::Actor, 1990, 7.0, 500, 3),
            profile("b", Role::Actor, 1990, 7.0, 500, 3),
            profile("c", Role::Actor, 1990, 7.0, 100, 3),
        ];

        let top = top_n(&crew, Role::Actor, 1990, CrewMetric::Votes, 2);

        assert_eq!(names(&top), vec!["a", "b"]);
    }

    #[test]
    fn test_top_n_ignores_other_roles_and_decades() {
        let crew = vec![
            profile("director", Role::Director, 1990, 9.0, 9_000, 3),
            profile("old", Role::Actress, 1980, 9.0, 9_000, 3),
            profile("match", Role::Actress, 1990, 5.0, 10, 1),
        ];

        let top = top_n(&crew, Role::Actress, 1990, CrewMetric::Rating, 15);

        assert_eq!(names(&top), vec!["match"]);
    }

    #[test]
    fn test_qualified_filters_before_ranking() {
        let crew = vec![
            profile("one-hit", Role::Director, 2000, 9.8, 50_000, 1),
            profile("tiny", Role::Director, 2000, 9.5, 1_000, 4),
            profile("steady", Role::Director, 2000, 8.1, 20_000, 5),
            profile("solid", Role::Director, 2000, 7.9, 1_001, 2),
        ];

        let board = top_n_qualified(
            &crew,
            Role::Director,
            2000,
            &QualificationThresholds::default(),
            15,
        );

        assert!(!board.fell_back);
        assert_eq!(names(&board.entries), vec!["steady", "solid"]);
    }

    #[test]
    fn test_qualified_falls_back_when_nobody_qualifies() {
        let crew = vec![
            profile("x", Role::Actor, 1950, 6.0, 10, 1),
            profile("y", Role::Actor, 1950, 8.0, 20, 1),
        ];

        let board = top_n_qualified(
            &crew,
            Role::Actor,
            1950,
            &QualificationThresholds::default(),
            15,
        );

        assert!(board.fell_back);
        assert_eq!(names(&board.entries), vec!["y", "x"]);
    }

    #[test]
    fn test_empty_slice_is_empty_leaderboard() {
        let crew: Vec<CrewProfile> = vec![];
        assert!(top_n(&crew, Role::Actor, 1990, CrewMetric::Votes, 15).is_empty());

        let board = top_n_qualified(&crew, Role::Actor, 1990, &QualificationThresholds::default(), 15);
        assert!(board.entries.is_empty());
    }

    proptest! {
        #[test]
        fn top_n_length_and_order(
            votes in prop::collection::vec(0u64..5_000, 0..40),
            n in 0usize..20,
        ) {
            let crew: Vec<CrewProfile> = votes
                .iter()
                .enumerate()
                .map(|(i, v)| profile(&format!("p{}", i), Role::Actor, 1990, 5.0, *v, 1))
                .collect();

            let top = top_n(&crew, Role::Actor, 1990, CrewMetric::Votes, n);

            prop_assert_eq!(top.len(), n.min(crew.len()));
            for pair in top.windows(2) {
                prop_assert!(pair[0].total_votes >= pair[1].total_votes);
            }
        }
    }
}
