use super::write_file;
use crate::config::CONFIG_FILE_NAME;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Commented default configuration written by `cinemap init`.
pub const DEFAULT_CONFIG: &str = r#"# Cinemap Configuration

[genres]
# Genres selected when --genres is not given
default_selection = ["Ação", "Drama", "Ficção Científica", "Terror", "Romance", "Comédia"]

# Extra or replacement raw code -> display label entries
# [genres.translation]
# Thriller = "Thriller"

[filter]
default_from = 1960
default_to = 2025

[ranking]
# Genres kept per decade in the rank charts
top_k = 8

[leaderboard]
size = 15
podium = 3
# Acclaimed list: at least this many movies and strictly more votes than min_votes
min_movies = 2
min_votes = 1000

[gallery]
# composite | title_only | composite_then_title
title_match = "composite"
# votes | rating
metric = "votes"

[market]
primary = "us"
secondary = "br"
# A genre needs more rows than this to appear in the exportability table
min_genre_rows = 50
"#;

/// Write `.cinemap.toml` in the current directory.
pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

/// Write the default config into `dir`, returning the file path.
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    write_file(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
