use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cinemap")]
#[command(about = "Movie dataset analytics: trends, genres, markets and crew leaderboards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv)
    /// -v: debug logs
    /// -vv: trace logs
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the source tables and configuration come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Movies table (one row per title and genre)
    #[arg(long, env = "CINEMAP_MOVIES", default_value = "imdb_movies_final.csv")]
    pub movies: PathBuf,

    /// Crew profiles table (one row per person, role and decade)
    #[arg(long, env = "CINEMAP_CREW", default_value = "imdb_crew_profiles.csv")]
    pub crew: PathBuf,

    /// Configuration file (defaults to searching for .cinemap.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Year range and genre selection.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// First year of the range (clamped to the data)
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year of the range (clamped to the data)
    #[arg(long)]
    pub to: Option<i32>,

    /// Genres to include (comma-separated display labels or raw codes)
    #[arg(long, value_delimiter = ',', conflicts_with = "all_genres")]
    pub genres: Option<Vec<String>>,

    /// Include every genre present in the data
    #[arg(long = "all-genres")]
    pub all_genres: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Key figures for the selection
    Overview {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Genre rank over decades, yearly volume and the decade gallery
    Trends {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Genre summary and decade by genre tables
    Genres {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Runtime mix per decade and engagement per duration class
    Duration {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Market presence, international reach and regions
    Market {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Crew leaderboards for one role and decade (ignores the selection)
    HallOfFame {
        #[command(flatten)]
        source: SourceArgs,

        /// Crew role
        #[arg(long, value_enum, default_value = "director")]
        role: RoleArg,

        /// Decade, e.g. 1990 (defaults to the most recent in the crew table)
        #[arg(long)]
        decade: Option<i32>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Every view in one document
    Report {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Load the tables and list rows that were dropped
    Check {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Director,
    Actor,
    Actress,
}

impl From<RoleArg> for crate::core::Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Director => crate::core::Role::Director,
            RoleArg::Actor => crate::core::Role::Actor,
            RoleArg::Actress => crate::core::Role::Actress,
        }
    }
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
