//! Formatting of prepared views into format-neutral sections.
//!
//! ```text
//! prepare_*() → view struct → Renderable::sections() → writer
//!                      │                                 ├→ TerminalWriter
//!                      │                                 └→ MarkdownWriter
//!                      └→ Renderable::to_json() ────────→ JsonWriter
//! ```
//!
//! Every number is formatted here once, so terminal and markdown output
//! always agree.

use crate::core::CrewProfile;
use crate::pipeline::{BumpPoint, DurationClass, ReachClass};
use crate::views::{
    DashboardReport, DurationView, GalleryCard, GenreView, HallOfFameView, MarketView,
    OverviewView, TrendsView,
};
use std::collections::BTreeMap;

/// A titled block of notes and an optional table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub title: String,
    pub notes: Vec<String>,
    pub table: Option<TableBlock>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableBlock {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn table<H: Into<String>>(mut self, headers: impl IntoIterator<Item = H>, rows: Vec<Vec<String>>) -> Self {
        self.table = Some(TableBlock {
            headers: headers.into_iter().map(Into::into).collect(),
            rows,
        });
        self
    }

    /// Table with a placeholder note when there are no rows.
    pub fn table_or_empty<H: Into<String>>(
        self,
        headers: impl IntoIterator<Item = H>,
        rows: Vec<Vec<String>>,
        empty: &str,
    ) -> Self {
        if rows.is_empty() {
            self.note(empty)
        } else {
            self.table(headers, rows)
        }
    }
}

/// A view that can be written by any [`crate::io::output::OutputWriter`].
pub trait Renderable {
    fn heading(&self) -> String;
    fn sections(&self) -> Vec<Section>;
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
}

const NO_ROWS: &str = "No titles match the current selection.";

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

/// Compact vote counts: 1234 → "1.2K", 2500000 → "2.5M".
pub fn fmt_votes(votes: f64) -> String {
    if votes >= 1_000_000.0 {
        format!("{:.1}M", votes / 1_000_000.0)
    } else if votes >= 1_000.0 {
        format!("{:.1}K", votes / 1_000.0)
    } else {
        format!("{:.0}", votes)
    }
}

fn duration_label(class: DurationClass) -> String {
    class.label().to_string()
}

fn reach_label(class: ReachClass) -> String {
    class.label().to_string()
}

// ============================================================================
// OVERVIEW
// ============================================================================

impl Renderable for OverviewView {
    fn heading(&self) -> String {
        format!(
            "Movie dashboard ({}-{})",
            self.criteria.years.min, self.criteria.years.max
        )
    }

    fn sections(&self) -> Vec<Section> {
        let genres: Vec<&str> = self.criteria.genres.iter().map(String::as_str).collect();
        let kpis = &self.kpis;
        let rows = vec![
            vec!["Titles".to_string(), kpis.titles.to_string()],
            vec!["Mean rating".to_string(), fmt_opt(kpis.mean_rating, 2)],
            vec!["Votes".to_string(), fmt_votes(kpis.total_votes as f64)],
            vec![
                "Mean runtime".to_string(),
                kpis.mean_runtime
                    .map_or_else(|| "-".to_string(), |m| format!("{} min", m.trunc())),
            ],
            vec![
                "Best year".to_string(),
                kpis.best_year.map_or_else(|| "-".to_string(), |y| y.to_string()),
            ],
        ];

        vec![Section::new("Key figures")
            .note(format!("Genres: {}", genres.join(", ")))
            .note(format!(
                "Rows kept {} of {} ({} outside the years, {} outside the genres)",
                self.filter.rows_kept,
                self.filter.rows_seen,
                self.filter.dropped_by_year,
                self.filter.dropped_by_genre
            ))
            .table(["Metric", "Value"], rows)]
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

// ============================================================================
// TRENDS
// ============================================================================

/// Pivot a bump series to one row per decade, genres in rank order.
fn bump_rows(points: &[BumpPoint], precision: usize) -> Vec<Vec<String>> {
    let mut by_decade: BTreeMap<i32, Vec<&BumpPoint>> = BTreeMap::new();
    for point in points {
        by_decade.entry(point.decade).or_default().push(point);
    }
    by_decade
        .into_iter()
        .map(|(decade, mut ranked)| {
            ranked.sort_by_key(|p| p.rank);
            std::iter::once(format!("{}s", decade))
                .chain(
                    ranked
                        .iter()
                        .map(|p| format!("{} ({:.*})", p.genre, precision, p.value)),
                )
                .collect()
        })
        .collect()
}

fn bump_headers(top_k: usize, rows: &[Vec<String>]) -> Vec<String> {
    let width = rows.iter().map(|r| r.len().saturating_sub(1)).max().unwrap_or(0);
    std::iter::once("Decade".to_string())
        .chain((1..=width.min(top_k)).map(|rank| format!("#{}", rank)))
        .collect()
}

fn card_cell(card: Option<&GalleryCard>) -> String {
    match card {
        None => "no match".to_string(),
        Some(card) => {
            let profile = &card.profile;
            let year = profile
                .top_movie
                .year
                .map_or_else(String::new, |y| format!(" ({})", y));
            format!(
                "{} | {} votes, {:.1} | {}{}",
                profile.name,
                fmt_votes(profile.total_votes as f64),
                profile.mean_rating,
                profile.top_movie.title,
                year
            )
        }
    }
}

impl Renderable for TrendsView {
    fn heading(&self) -> String {
        "Temporal trends".to_string()
    }

    fn sections(&self) -> Vec<Section> {
        let production = bump_rows(&self.production, 0);
        let prestige = bump_rows(&self.prestige, 2);

        let yearly: Vec<Vec<String>> = self
            .yearly
            .iter()
            .map(|y| vec![y.year.to_string(), y.count.to_string(), format!("{:.2}", y.mean_rating)])
            .collect();

        let gallery: Vec<Vec<String>> = self
            .gallery
            .iter()
            .map(|row| {
                vec![
                    format!("{}s", row.decade),
                    card_cell(row.director.as_ref()),
                    card_cell(row.actor.as_ref()),
                    card_cell(row.actress.as_ref()),
                ]
            })
            .collect();

        vec![
            Section::new("Most produced genres per decade").table_or_empty(
                bump_headers(self.top_k, &production),
                production,
                NO_ROWS,
            ),
            Section::new("Highest rated genres per decade").table_or_empty(
                bump_headers(self.top_k, &prestige),
                prestige,
                NO_ROWS,
            ),
            Section::new("Volume and quality per year").table_or_empty(
                ["Year", "Titles", "Mean rating"],
                yearly,
                NO_ROWS,
            ),
            Section::new("Decade gallery").table_or_empty(
                ["Decade", "Director", "Actor", "Actress"],
                gallery,
                "No crew member matches the selected genres.",
            ),
        ]
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

// ============================================================================
// GENRES
// ============================================================================

impl Renderable for GenreView {
    fn heading(&self) -> String {
        "Genre analysis".to_string()
    }

    fn sections(&self) -> Vec<Section> {
        let summary: Vec<Vec<String>> = self
            .summary
            .iter()
            .map(|g| {
                vec![
                    g.genre.clone(),
                    g.titles.to_string(),
                    format!("{:.2}", g.mean_rating),
                    fmt_votes(g.mean_votes),
                ]
            })
            .collect();

        let decades: Vec<Vec<String>> = self
            .counts
            .iter()
            .zip(&self.ratings)
            .map(|(count, rating)| {
                vec![
                    format!("{}s", count.decade),
                    count.genre.clone(),
                    count.count.to_string(),
                    format!("{:.2}", rating.mean_rating),
                ]
            })
            .collect();

        vec![
            Section::new("Popularity vs. prestige")
                .note("Titles with several genres count once in each genre.")
                .table_or_empty(["Genre", "Titles", "Mean rating", "Mean votes"], summary, NO_ROWS),
            Section::new("Genres per decade").table_or_empty(
                ["Decade", "Genre", "Rows", "Mean rating"],
                decades,
                NO_ROWS,
            ),
        ]
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

// ============================================================================
// DURATION
// ============================================================================

impl Renderable for DurationView {
    fn heading(&self) -> String {
        "Duration and format".to_string()
    }

    fn sections(&self) -> Vec<Section> {
        let shares: Vec<Vec<String>> = self
            .shares
            .iter()
            .map(|s| {
                vec![
                    format!("{}s", s.decade),
                    duration_label(s.class),
                    s.count.to_string(),
                    format!("{:.1}%", s.pct * 100.0),
                ]
            })
            .collect();

        let engagement: Vec<Vec<String>> = self
            .engagement
            .iter()
            .map(|e| {
                vec![
                    duration_label(e.class),
                    e.count.to_string(),
                    fmt_votes(e.mean_votes),
                    format!("{:.2}", e.mean_rating),
                ]
            })
            .collect();

        let mut format_mix = Section::new("Format mix per decade");
        if self.unknown_runtime > 0 {
            format_mix = format_mix.note(format!(
                "{} rows without a runtime are left out.",
                self.unknown_runtime
            ));
        }

        vec![
            format_mix.table_or_empty(["Decade", "Class", "Rows", "Share"], shares, NO_ROWS),
            Section::new("Engagement by duration").table_or_empty(
                ["Class", "Rows", "Mean votes", "Mean rating"],
                engagement,
                NO_ROWS,
            ),
        ]
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

// ============================================================================
// MARKET
// ============================================================================

impl Renderable for MarketView {
    fn heading(&self) -> String {
        "Global market reach".to_string()
    }

    fn sections(&self) -> Vec<Section> {
        let mut comparison = Section::new("Market comparison");
        comparison = match &self.comparison {
            None => comparison.note("Market data unavailable for this selection."),
            Some(cmp) => {
                let rows: Vec<Vec<String>> = [&cmp.primary, &cmp.secondary]
                    .iter()
                    .map(|share| {
                        vec![
                            share.market.to_uppercase(),
                            share.titles.to_string(),
                            format!("{:.1}%", share.pct),
                        ]
                    })
                    .collect();
                let ratio = match cmp.ratio {
                    Some(ratio) => format!(
                        "{} receives {:.1}x as many titles as {}.",
                        cmp.primary.market.to_uppercase(),
                        ratio,
                        cmp.secondary.market.to_uppercase()
                    ),
                    None => format!(
                        "No title in the selection was released in {}.",
                        cmp.secondary.market.to_uppercase()
                    ),
                };
                comparison
                    .note(ratio)
                    .table(["Market", "Titles", "Share of titles"], rows)
            }
        };

        let reach: Vec<Vec<String>> = self
            .reach_classes
            .iter()
            .map(|r| {
                vec![
                    reach_label(r.class),
                    r.titles.to_string(),
                    format!("{:.2}", r.mean_rating),
                    format!("{:.1}-{:.1}", r.min_rating, r.max_rating),
                ]
            })
            .collect();

        let export: Vec<Vec<String>> = self
            .exportability
            .iter()
            .map(|e| {
                vec![
                    e.genre.clone(),
                    format!("{:.1}", e.mean_reach),
                    format!("{:.2}", e.mean_rating),
                    e.rows.to_string(),
                ]
            })
            .collect();

        let regions: Vec<Vec<String>> = self
            .macro_regions
            .iter()
            .chain(&self.regions)
            .map(|r| {
                vec![
                    r.region.clone(),
                    r.titles.to_string(),
                    format!("{:.2}", r.mean_rating),
                    fmt_votes(r.mean_votes),
                    fmt_opt(r.mean_reach, 1),
                ]
            })
            .collect();

        vec![
            comparison,
            Section::new("Reach vs. quality").table_or_empty(
                ["Reach", "Titles", "Mean rating", "Rating range"],
                reach,
                "No title reports a distribution count.",
            ),
            Section::new("Exportability by genre")
                .note(format!("Overall mean reach: {} countries", fmt_opt(self.mean_reach, 1)))
                .table_or_empty(
                    ["Genre", "Mean reach", "Mean rating", "Rows"],
                    export,
                    "No genre has enough rows.",
                ),
            Section::new("Regions").table_or_empty(
                ["Region", "Titles", "Mean rating", "Mean votes", "Mean reach"],
                regions,
                "No region data.",
            ),
        ]
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

// ============================================================================
// HALL OF FAME
// ============================================================================

fn leaderboard_rows(entries: &[CrewProfile], podium: usize) -> Vec<Vec<String>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let place = if i < podium {
                format!("*{}", i + 1)
            } else {
                (i + 1).to_string()
            };
            vec![
                place,
                p.name.clone(),
                fmt_votes(p.total_votes as f64),
                format!("{:.2}", p.mean_rating),
                p.total_movies.to_string(),
                p.top_movie.title.clone(),
            ]
        })
        .collect()
}

impl Renderable for HallOfFameView {
    fn heading(&self) -> String {
        format!("Hall of fame: {} ({}s)", self.role.label(), self.decade)
    }

    fn sections(&self) -> Vec<Section> {
        const HEADERS: [&str; 6] = ["#", "Name", "Votes", "Mean rating", "Movies", "Top movie"];

        let mut acclaimed = Section::new("Most acclaimed");
        if self.fell_back {
            acclaimed = acclaimed.note("Nobody meets the qualification thresholds; ranking everyone.");
        }

        vec![
            Section::new("Most popular").table_or_empty(
                HEADERS,
                leaderboard_rows(&self.popular, self.podium),
                "No crew profiles for this role and decade.",
            ),
            acclaimed.table_or_empty(
                HEADERS,
                leaderboard_rows(&self.acclaimed, self.podium),
                "No crew profiles for this role and decade.",
            ),
        ]
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

// ============================================================================
// FULL REPORT
// ============================================================================

/// Prefix every section title with its view heading.
fn nest(view: &dyn Renderable) -> Vec<Section> {
    let heading = view.heading();
    view.sections()
        .into_iter()
        .map(|mut section| {
            section.title = format!("{}: {}", heading, section.title);
            section
        })
        .collect()
}

impl Renderable for DashboardReport {
    fn heading(&self) -> String {
        self.overview.heading()
    }

    fn sections(&self) -> Vec<Section> {
        let mut sections = self.overview.sections();
        sections.extend(nest(&self.trends));
        sections.extend(nest(&self.genres));
        sections.extend(nest(&self.duration));
        sections.extend(nest(&self.market));
        for view in &self.hall_of_fame {
            sections.extend(nest(view));
        }
        sections
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
