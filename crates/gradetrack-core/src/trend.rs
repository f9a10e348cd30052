//! Chronological trend series for charting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::SubjectCatalog;
use crate::model::{ExamId, ExamRecord};
use crate::statistics::{subject_value, total_score};

/// One exam's point on the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub exam_id: ExamId,
    /// The exam name.
    pub label: String,
    pub date: NaiveDate,
    /// Lenient total score.
    pub total: f64,
    /// `(subject_id, lenient value)` for every catalog subject, in catalog order.
    pub values: Vec<(String, f64)>,
}

impl TrendPoint {
    pub fn value(&self, subject_id: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(id, _)| id == subject_id)
            .map(|(_, v)| *v)
    }
}

/// Exams in ascending date order. Same-date exams keep list order.
fn chronological(exams: &[ExamRecord]) -> Vec<&ExamRecord> {
    let mut sorted: Vec<&ExamRecord> = exams.iter().collect();
    sorted.sort_by_key(|e| e.date);
    sorted
}

/// Build the trend series, one point per exam, oldest first.
///
/// Missing or unparseable subject scores read as 0. The series is rebuilt
/// from the given snapshot on every call.
pub fn build_series(catalog: &SubjectCatalog, exams: &[ExamRecord]) -> Vec<TrendPoint> {
    chronological(exams)
        .into_iter()
        .map(|exam| TrendPoint {
            exam_id: exam.id,
            label: exam.name.clone(),
            date: exam.date,
            total: total_score(exam),
            values: catalog
                .iter()
                .map(|s| (s.id.clone(), subject_value(exam, &s.id)))
                .collect(),
        })
        .collect()
}

/// Chronological `(date, value)` series for a single subject.
///
/// `None` when the subject is not in the catalog.
pub fn subject_series(
    catalog: &SubjectCatalog,
    exams: &[ExamRecord],
    subject_id: &str,
) -> Option<Vec<(NaiveDate, f64)>> {
    catalog.get(subject_id)?;
    Some(
        chronological(exams)
            .into_iter()
            .map(|exam| (exam.date, subject_value(exam, subject_id)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExamDraft;

    fn exam(id: u64, name: &str, date: &str, math: &str) -> ExamRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        ExamRecord::from_draft(ExamId(id), ExamDraft::new(name, date).with_score("math", math))
    }

    #[test]
    fn empty_store_gives_empty_series() {
        assert!(build_series(&SubjectCatalog::default(), &[]).is_empty());
    }

    #[test]
    fn sorted_by_date_with_stable_ties() {
        let exams = vec![
            exam(1, "late", "2025-12-01", "90"),
            exam(2, "tie-a", "2025-10-01", "80"),
            exam(3, "early", "2025-09-01", "70"),
            exam(4, "tie-b", "2025-10-01", "85"),
        ];
        let series = build_series(&SubjectCatalog::default(), &exams);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["early", "tie-a", "tie-b", "late"]);
        assert_eq!(series.len(), exams.len());
        assert!(series.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn values_are_lenient_and_cover_catalog() {
        let exams = vec![exam(1, "quiz", "2025-10-01", "oops")];
        let catalog = SubjectCatalog::default();
        let series = build_series(&catalog, &exams);
        let point = &series[0];
        assert_eq!(point.values.len(), catalog.len());
        assert_eq!(point.value("math"), Some(0.0));
        assert_eq!(point.value("english"), Some(0.0));
        assert_eq!(point.value("art"), None);
        assert_eq!(point.total, 0.0);
    }

    #[test]
    fn single_subject_series() {
        let exams = vec![
            exam(1, "b", "2025-11-11", "97"),
            exam(2, "a", "2025-10-10", "94"),
        ];
        let catalog = SubjectCatalog::default();
        let series = subject_series(&catalog, &exams, "math").unwrap();
        assert_eq!(series[0].1, 94.0);
        assert_eq!(series[1].1, 97.0);
        assert!(subject_series(&catalog, &exams, "art").is_none());
    }
}
