//! JSON persistence for exams and goals.
//!
//! Each collection is one blob in the data directory: `exams.json` holds the
//! exam records in insertion order, `goals.json` the subject → target map.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::ExamRecord;
use crate::seed::seed_exams;
use crate::store::{ExamStore, GoalSet};

const EXAMS_FILE: &str = "exams.json";
const GOALS_FILE: &str = "goals.json";

/// A directory holding the persisted collections.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exams_path(&self) -> PathBuf {
        self.root.join(EXAMS_FILE)
    }

    pub fn goals_path(&self) -> PathBuf {
        self.root.join(GOALS_FILE)
    }

    /// Load the exam store. A missing file yields an empty store.
    pub fn load_exams(&self) -> Result<ExamStore> {
        let records: Vec<ExamRecord> = read_json(&self.exams_path())?.unwrap_or_default();
        Ok(ExamStore::from_records(records))
    }

    /// Load the exam store, substituting the seed exams when nothing is saved.
    pub fn load_exams_or_seed(&self) -> Result<ExamStore> {
        let store = self.load_exams()?;
        if store.is_empty() {
            tracing::info!("no saved exams in {}, using seed data", self.root.display());
            return Ok(ExamStore::from_records(seed_exams()));
        }
        Ok(store)
    }

    pub fn save_exams(&self, store: &ExamStore) -> Result<()> {
        write_json(&self.exams_path(), store.list())
    }

    /// Load the goal set. A missing file yields no goals.
    pub fn load_goals(&self) -> Result<GoalSet> {
        Ok(read_json(&self.goals_path())?.unwrap_or_default())
    }

    pub fn save_goals(&self, goals: &GoalSet) -> Result<()> {
        write_json(&self.goals_path(), goals)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    let value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
    Ok(Some(value))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize data")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExamDraft, ExamId};
    use crate::statistics::total_score;
    use chrono::NaiveDate;

    #[test]
    fn missing_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        assert!(data.load_exams().unwrap().is_empty());
        assert!(data.load_goals().unwrap().is_empty());
    }

    #[test]
    fn exams_and_goals_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path().join("nested"));

        let mut store = ExamStore::new();
        let date = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
        let id = store
            .add(ExamDraft::new("Quiz", date).with_score("math", "94"))
            .unwrap();
        data.save_exams(&store).unwrap();

        let mut goals = GoalSet::new();
        goals.set("math", 130.0).unwrap();
        data.save_goals(&goals).unwrap();

        let loaded = data.load_exams().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(id).unwrap().name, "Quiz");
        assert_eq!(data.load_goals().unwrap(), goals);
    }

    #[test]
    fn seed_substituted_for_empty_blob() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        std::fs::write(data.exams_path(), "[]").unwrap();

        let store = data.load_exams_or_seed().unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn saved_exams_are_not_replaced_by_seed() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let mut store = ExamStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        store.add(ExamDraft::new("Only", date)).unwrap();
        data.save_exams(&store).unwrap();

        let loaded = data.load_exams_or_seed().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.list()[0].name, "Only");
    }

    #[test]
    fn unusable_score_values_read_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        std::fs::write(
            data.exams_path(),
            r#"[{"id": 1, "name": "Quiz", "type": "月考", "date": "2025-10-10",
                "scores": {"math": "94", "english": null, "physics": true, "chemistry": {}}},
               {"id": 2, "name": "Blank", "date": "2025-10-11", "scores": null}]"#,
        )
        .unwrap();
        std::fs::write(data.goals_path(), r#"{"math": null, "english": "120"}"#).unwrap();

        let store = data.load_exams().unwrap();
        assert_eq!(store.len(), 2);
        let quiz = store.get(ExamId(1)).unwrap();
        assert_eq!(quiz.scores.len(), 1);
        assert_eq!(total_score(quiz), 94.0);
        assert!(store.get(ExamId(2)).unwrap().scores.is_empty());

        let goals = data.load_goals().unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals.get("english"), Some(120.0));
    }

    #[test]
    fn malformed_blob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        std::fs::write(data.exams_path(), "{not json").unwrap();

        let err = data.load_exams().unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse JSON"));
    }
}
