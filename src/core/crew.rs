use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Crew role category as it appears in the crew table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Director,
    Actor,
    Actress,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Director, Role::Actor, Role::Actress];

    /// Category string used by the crew table
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Director => "director",
            Role::Actor => "actor",
            Role::Actress => "actress",
        }
    }

    /// Label for display
    pub fn label(&self) -> &'static str {
        match self {
            Role::Director => "Director",
            Role::Actor => "Actor",
            Role::Actress => "Actress",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "director" => Ok(Role::Director),
            "actor" => Ok(Role::Actor),
            "actress" => Ok(Role::Actress),
            other => Err(format!(
                "unknown role '{}' (expected director, actor or actress)",
                other
            )),
        }
    }
}

/// The representative movie of a crew profile.
///
/// Used for display and as the join key into the movie table's genre sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMovie {
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
}

impl TopMovie {
    pub fn new(title: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            title: title.into(),
            year,
            rating: None,
        }
    }
}

/// Pre-aggregated statistics for one (person, role, decade).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewProfile {
    pub name: String,
    pub role: Role,
    /// Aggregation bucket, independent of the top movie's own year
    pub decade: i32,
    pub mean_rating: f64,
    pub total_votes: u64,
    pub total_movies: u32,
    pub top_movie: TopMovie,
}

impl CrewProfile {
    pub fn new(name: impl Into<String>, role: Role, decade: i32, top_movie: TopMovie) -> Self {
        Self {
            name: name.into(),
            role,
            decade,
            mean_rating: 0.0,
            total_votes: 0,
            total_movies: 0,
            top_movie,
        }
    }

    pub fn with_stats(mut self, mean_rating: f64, total_votes: u64, total_movies: u32) -> Self {
        self.mean_rating = mean_rating;
        self.total_votes = total_votes;
        self.total_movies = total_movies;
        self
    }
}

/// Metric used to order crew members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrewMetric {
    /// Popularity: total votes
    #[default]
    Votes,
    /// Prestige: mean rating
    Rating,
}

impl CrewMetric {
    pub fn value(&self, profile: &CrewProfile) -> f64 {
        match self {
            CrewMetric::Votes => profile.total_votes as f64,
            CrewMetric::Rating => profile.mean_rating,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CrewMetric::Votes => "Popularity (votes)",
            CrewMetric::Rating => "Prestige (mean rating)",
        }
    }
}

impl FromStr for CrewMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "votes" | "popularity" => Ok(CrewMetric::Votes),
            "rating" | "prestige" => Ok(CrewMetric::Rating),
            other => Err(format!(
                "unknown metric '{}' (expected votes or rating)",
                other
            )),
        }
    }
}
