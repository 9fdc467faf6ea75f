use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::core::DashboardConfig;
use crate::errors::{Error, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".cinemap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<DashboardConfig> {
    let config: DashboardConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly named config file. Any failure is an error.
pub fn load_config_from(path: &Path) -> Result<DashboardConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config = parse_and_validate_config(&contents).map_err(|e| {
        Error::configuration(format!("{}: {}", path.display(), e))
    })?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Try one candidate path; missing files are silent, broken ones warn.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<DashboardConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %config_path.display(), error = %e, "failed to read config file");
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!(path = %config_path.display(), "loaded config");
            Some(config)
        }
        Err(e) => {
            warn!(path = %config_path.display(), error = %e, "invalid config, using defaults");
            None
        }
    }
}

/// `start` and its parents, nearest first, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        parent.pop().then_some(parent)
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for [`CONFIG_FILE_NAME`].
pub fn discover_config(start: PathBuf) -> DashboardConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                depth = MAX_TRAVERSAL_DEPTH,
                "no config found, using defaults"
            );
            DashboardConfig::default()
        })
}

/// Config for this run: the explicit path if given, otherwise discovery
/// from the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<DashboardConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }
    match std::env::current_dir() {
        Ok(dir) => Ok(discover_config(dir)),
        Err(e) => {
            warn!(error = %e, "failed to get current directory, using default config");
            Ok(DashboardConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_ancestors_limits_depth() {
        let dirs: Vec<PathBuf> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b"),
            ]
        );
    }

    #[test]
    fn test_discover_config_from_parent() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("x").join("y");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join(CONFIG_FILE_NAME), "[ranking]\ntop_k = 5\n").unwrap();

        let config = discover_config(nested);

        assert_eq!(config.ranking.top_k, 5);
    }

    #[test]
    fn test_discover_falls_back_on_invalid_file() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(CONFIG_FILE_NAME), "[ranking]\ntop_k = 0\n").unwrap();

        let config = discover_config(root.path().to_path_buf());

        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_explicit_config_must_parse() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("custom.toml");
        fs::write(&path, "[ranking\n").unwrap();

        assert!(load_config(Some(&path)).is_err());
        assert!(load_config(Some(&root.path().join("missing.toml"))).is_err());
    }
}
