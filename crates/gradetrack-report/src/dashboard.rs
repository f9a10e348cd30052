//! A point-in-time snapshot of every derived view, ready for rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use gradetrack_core::goals::{progress_all, GoalProgress};
use gradetrack_core::radar::{build_profile, RadarPoint};
use gradetrack_core::statistics::{
    exam_overview, subject_summaries, total_score, ExamOverview, RateBand, SubjectSummary,
};
use gradetrack_core::trend::{build_series, TrendPoint};
use gradetrack_core::{ExamId, ExamRecord, GoalSet, SubjectCatalog};

/// Everything a presentation layer needs, computed once from a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
    /// `(subject_id, name, full_score)` in catalog order.
    pub subjects: Vec<(String, String, f64)>,
    /// Totals across exams; absent when there are none.
    pub overview: Option<ExamOverview>,
    /// Per-subject statistics in catalog order.
    pub summaries: Vec<SubjectSummary>,
    /// Exams newest first.
    pub exams: Vec<ExamRow>,
    /// Trend series oldest first.
    pub trend: Vec<TrendPoint>,
    /// Radar profile of the latest exam.
    pub radar: Vec<RadarPoint>,
    /// Goal progress in catalog order.
    pub goals: Vec<GoalProgress>,
}

/// One row of the exam table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamRow {
    pub id: ExamId,
    pub name: String,
    pub date: NaiveDate,
    /// "<grade> <semester> · <type>" label.
    pub category: String,
    pub total: f64,
    /// Parsed score and band per catalog subject; `None` when not a number.
    pub cells: Vec<Option<(f64, RateBand)>>,
}

impl Dashboard {
    /// Compute every view from the given snapshot.
    pub fn build(catalog: &SubjectCatalog, exams: &[ExamRecord], goals: &GoalSet) -> Self {
        let mut newest: Vec<&ExamRecord> = exams.iter().collect();
        newest.sort_by(|a, b| b.date.cmp(&a.date));

        let rows = newest
            .into_iter()
            .map(|exam| ExamRow {
                id: exam.id,
                name: exam.name.clone(),
                date: exam.date,
                category: format!("{} {} · {}", exam.grade, exam.semester, exam.exam_type),
                total: total_score(exam),
                cells: catalog
                    .iter()
                    .map(|s| {
                        let score = exam.score(&s.id);
                        let value = score.and_then(|v| v.parse())?;
                        let band = RateBand::for_score(score, s.full_score)?;
                        Some((value, band))
                    })
                    .collect(),
            })
            .collect();

        Self {
            created_at: Utc::now(),
            subjects: catalog
                .iter()
                .map(|s| (s.id.clone(), s.name.clone(), s.full_score))
                .collect(),
            overview: exam_overview(exams),
            summaries: subject_summaries(catalog, exams),
            exams: rows,
            trend: build_series(catalog, exams),
            radar: build_profile(catalog, exams),
            goals: progress_all(catalog, goals, exams),
        }
    }

    /// Display name for a subject id, falling back to the id.
    pub fn subject_name<'a>(&'a self, subject_id: &'a str) -> &'a str {
        self.subjects
            .iter()
            .find(|(id, _, _)| id == subject_id)
            .map(|(_, name, _)| name.as_str())
            .unwrap_or(subject_id)
    }

    /// Save the dashboard as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize dashboard")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write dashboard to {}", path.display()))?;
        Ok(())
    }
}
