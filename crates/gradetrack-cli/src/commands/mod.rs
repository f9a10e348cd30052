//! Subcommand implementations and the shared workspace they operate on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gradetrack_core::config::load_config_from;
use gradetrack_core::persistence::DataDir;
use gradetrack_core::{ExamStore, GoalSet, SubjectCatalog};

pub mod exams;
pub mod goals;
pub mod init;
pub mod radar;
pub mod report;
pub mod stats;
pub mod trend;

/// Catalog plus data location, resolved from config and flags.
pub struct Workspace {
    pub catalog: SubjectCatalog,
    pub data: DataDir,
    pub seed_when_empty: bool,
}

impl Workspace {
    pub fn load(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let catalog = config.catalog()?;
        let data = match data_dir {
            Some(dir) => DataDir::new(dir),
            None => config.data(),
        };
        tracing::debug!(
            "using data dir {} with {} subjects",
            data.root().display(),
            catalog.len()
        );
        Ok(Self {
            catalog,
            data,
            seed_when_empty: config.seed_when_empty,
        })
    }

    /// Current exams, seeded when nothing is saved and seeding is enabled.
    pub fn exams(&self) -> Result<ExamStore> {
        if self.seed_when_empty {
            self.data.load_exams_or_seed()
        } else {
            self.data.load_exams()
        }
    }

    pub fn goals(&self) -> Result<GoalSet> {
        let goals = self.data.load_goals()?;
        for (subject_id, _) in goals.iter() {
            if !self.catalog.contains(subject_id) {
                tracing::warn!("ignoring goal for '{subject_id}', not in the subject catalog");
            }
        }
        Ok(goals)
    }

    pub fn save_exams(&self, store: &ExamStore) -> Result<()> {
        self.data
            .save_exams(store)
            .context("failed to save exams")
    }

    pub fn save_goals(&self, goals: &GoalSet) -> Result<()> {
        self.data.save_goals(goals).context("failed to save goals")
    }
}

/// Format a number without trailing zeros, or "-" for a missing value.
pub fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => "-".to_string(),
    }
}
