//! Normalized ability profile of the latest exam.

use serde::{Deserialize, Serialize};

use crate::catalog::SubjectCatalog;
use crate::model::ExamRecord;
use crate::statistics::{round1, subject_value};

/// Fixed chart-axis ceiling for every radar point.
pub const RADAR_FULL_MARK: f64 = 100.0;

/// The exam with the greatest date.
///
/// Among exams sharing the greatest date, the first one in list order wins.
pub fn latest_exam(exams: &[ExamRecord]) -> Option<&ExamRecord> {
    exams.iter().fold(None, |best: Option<&ExamRecord>, exam| match best {
        Some(b) if b.date >= exam.date => Some(b),
        _ => Some(exam),
    })
}

/// One subject's share of full score in the latest exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub subject_id: String,
    pub subject: String,
    /// Lenient score over full score, as a percentage rounded to one decimal.
    pub percentage: f64,
    /// Always [`RADAR_FULL_MARK`].
    pub full_mark: f64,
}

/// Radar profile for every catalog subject; empty when there are no exams.
pub fn build_profile(catalog: &SubjectCatalog, exams: &[ExamRecord]) -> Vec<RadarPoint> {
    let Some(latest) = latest_exam(exams) else {
        return Vec::new();
    };

    catalog
        .iter()
        .map(|subject| RadarPoint {
            subject_id: subject.id.clone(),
            subject: subject.name.clone(),
            percentage: round1(subject_value(latest, &subject.id) / subject.full_score * 100.0),
            full_mark: RADAR_FULL_MARK,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExamDraft, ExamId};
    use chrono::NaiveDate;

    fn exam(id: u64, date: &str, math: &str) -> ExamRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        ExamRecord::from_draft(
            ExamId(id),
            ExamDraft::new(format!("exam-{id}"), date).with_score("math", math),
        )
    }

    #[test]
    fn latest_is_by_date_not_insertion() {
        let exams = vec![exam(1, "2025-11-11", "97"), exam(2, "2025-10-10", "94")];
        assert_eq!(latest_exam(&exams).unwrap().id, ExamId(1));
    }

    #[test]
    fn latest_tie_prefers_first_in_list() {
        let exams = vec![
            exam(1, "2025-10-10", "90"),
            exam(2, "2025-11-11", "91"),
            exam(3, "2025-11-11", "92"),
        ];
        assert_eq!(latest_exam(&exams).unwrap().id, ExamId(2));
    }

    #[test]
    fn profile_of_latest_exam() {
        let exams = vec![exam(1, "2025-10-10", "94"), exam(2, "2025-11-11", "97")];
        let profile = build_profile(&SubjectCatalog::default(), &exams);
        assert_eq!(profile.len(), 9);

        let math = profile.iter().find(|p| p.subject_id == "math").unwrap();
        assert_eq!(math.percentage, 64.7);
        assert_eq!(math.full_mark, 100.0);

        let english = profile.iter().find(|p| p.subject_id == "english").unwrap();
        assert_eq!(english.percentage, 0.0);
    }

    #[test]
    fn empty_store_gives_empty_profile() {
        assert!(latest_exam(&[]).is_none());
        assert!(build_profile(&SubjectCatalog::default(), &[]).is_empty());
    }
}
