//! CLI command implementations.
//!
//! - **dashboard**: load the tables, apply the selection and write one view
//! - **check**: load the tables and report dropped rows
//! - **init**: write a default `.cinemap.toml`
//!
//! Commands take plain request structs, not clap types, so they can be
//! driven from tests without parsing arguments.

pub mod check;
pub mod dashboard;
pub mod init;

pub use check::{run_check, CheckReport};
pub use dashboard::{build_criteria, prepare_view, run_dashboard, DashboardRequest, Selection, ViewKind};
pub use init::{init_config, init_config_in, DEFAULT_CONFIG};

use crate::io::{create_writer, OutputFormat, Renderable};
use crate::observability::{set_phase, DashboardPhase};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where and how a command writes its result.
#[derive(Debug, Clone)]
pub struct OutputTarget {
    pub format: OutputFormat,
    /// `None` writes to stdout
    pub path: Option<PathBuf>,
}

/// Where the tables and configuration come from.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub movies: PathBuf,
    pub crew: PathBuf,
    pub config: Option<PathBuf>,
}

pub(crate) fn write_view(view: &dyn Renderable, target: &OutputTarget) -> Result<()> {
    let _phase = set_phase(DashboardPhase::Rendering);
    match &target.path {
        Some(path) => {
            // No escape codes in files.
            colored::control::set_override(false);
            let file = create_output_file(path)?;
            create_writer(target.format, BufWriter::new(file)).write_view(view)
        }
        None => {
            let stdout = std::io::stdout();
            create_writer(target.format, stdout.lock()).write_view(view)
        }
    }
}

fn create_output_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}

/// Write raw text to a file, creating parent directories.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = create_output_file(path)?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))
}
