//! gradetrack configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::SubjectCatalog;
use crate::model::Subject;
use crate::persistence::DataDir;

/// Top-level gradetrack configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradetrackConfig {
    /// Directory holding `exams.json` and `goals.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Substitute the example exams when no exams are saved.
    #[serde(default = "default_true")]
    pub seed_when_empty: bool,
    /// Subject catalog override. Empty means the built-in catalog.
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./gradetrack-data")
}

fn default_true() -> bool {
    true
}

impl Default for GradetrackConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            seed_when_empty: true,
            subjects: Vec::new(),
        }
    }
}

impl GradetrackConfig {
    /// Build the subject catalog, validating any configured subjects.
    pub fn catalog(&self) -> Result<SubjectCatalog> {
        if self.subjects.is_empty() {
            return Ok(SubjectCatalog::default());
        }
        SubjectCatalog::new(self.subjects.clone()).context("invalid [[subjects]] in config")
    }

    pub fn data(&self) -> DataDir {
        DataDir::new(&self.data_dir)
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradetrack.toml` in the current directory
/// 2. `~/.config/gradetrack/config.toml`
pub fn load_config() -> Result<GradetrackConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradetrackConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradetrack.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_file(&path)
        }
        None => Ok(GradetrackConfig::default()),
    }
}

fn parse_config_file(path: &Path) -> Result<GradetrackConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<GradetrackConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradetrack"))
}
