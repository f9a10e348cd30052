//! Per-exam totals and cross-exam per-subject statistics.
//!
//! All functions are pure reads over a snapshot of exam records. Totals use
//! the lenient parse-or-0 reading; averages and extrema use the stricter
//! validity reading that drops zero. See [`crate::score`] for both.

use serde::{Deserialize, Serialize};

use crate::catalog::SubjectCatalog;
use crate::model::ExamRecord;
use crate::score::{lenient_value, valid_value, Score};

/// Lenient sum of every score present in the record.
///
/// Unparseable entries contribute 0, as does a present zero. Keys unknown to
/// the catalog are still summed.
pub fn total_score(record: &ExamRecord) -> f64 {
    record.scores.values().map(Score::lenient).sum()
}

/// Valid scores for a subject across all exams, in list order.
fn valid_scores<'a>(
    exams: &'a [ExamRecord],
    subject_id: &'a str,
) -> impl Iterator<Item = f64> + 'a {
    exams
        .iter()
        .filter_map(move |e| valid_value(e.score(subject_id)))
}

/// Mean of the valid scores for a subject; `0` if there are none.
pub fn average_for_subject(exams: &[ExamRecord], subject_id: &str) -> f64 {
    let (sum, count) = valid_scores(exams, subject_id)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Highest valid score for a subject; `0` if there are none.
pub fn max_for_subject(exams: &[ExamRecord], subject_id: &str) -> f64 {
    valid_scores(exams, subject_id).reduce(f64::max).unwrap_or(0.0)
}

/// Lowest valid score for a subject; `0` if there are none.
pub fn min_for_subject(exams: &[ExamRecord], subject_id: &str) -> f64 {
    valid_scores(exams, subject_id).reduce(f64::min).unwrap_or(0.0)
}

/// Average as a percentage of the subject's full score.
///
/// `None` when the average is 0 (no valid data) or the subject is unknown.
pub fn scoring_rate(catalog: &SubjectCatalog, exams: &[ExamRecord], subject_id: &str) -> Option<f64> {
    let subject = catalog.get(subject_id)?;
    let average = average_for_subject(exams, subject_id);
    if average == 0.0 {
        return None;
    }
    Some(average / subject.full_score * 100.0)
}

/// Round half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Performance band for a percentage of full score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateBand {
    Excellent,
    Good,
    Pass,
    Fail,
}

impl RateBand {
    /// Classify a percentage: 90 and up is excellent, 80 good, 60 pass.
    pub fn classify(percent: f64) -> Self {
        if percent >= 90.0 {
            RateBand::Excellent
        } else if percent >= 80.0 {
            RateBand::Good
        } else if percent >= 60.0 {
            RateBand::Pass
        } else {
            RateBand::Fail
        }
    }

    /// Band for a single entered score, or `None` when it does not parse.
    pub fn for_score(score: Option<&Score>, full_score: f64) -> Option<Self> {
        let value = score.and_then(Score::parse)?;
        Some(Self::classify(value / full_score * 100.0))
    }

    pub fn label(self) -> &'static str {
        match self {
            RateBand::Excellent => "excellent",
            RateBand::Good => "good",
            RateBand::Pass => "pass",
            RateBand::Fail => "fail",
        }
    }
}

/// Cross-exam statistics for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub subject_id: String,
    pub subject: String,
    pub full_score: f64,
    /// Mean of valid scores; 0 if none.
    pub average: f64,
    /// Highest valid score; 0 if none.
    pub max: f64,
    /// Lowest valid score; 0 if none.
    pub min: f64,
    /// Average as a percentage of full score; absent when average is 0.
    pub rate: Option<f64>,
    /// Number of valid data points.
    pub valid_count: usize,
}

/// Summary for one subject; `None` when it is not in the catalog.
pub fn subject_summary(
    catalog: &SubjectCatalog,
    exams: &[ExamRecord],
    subject_id: &str,
) -> Option<SubjectSummary> {
    let subject = catalog.get(subject_id)?;
    Some(SubjectSummary {
        subject_id: subject.id.clone(),
        subject: subject.name.clone(),
        full_score: subject.full_score,
        average: average_for_subject(exams, subject_id),
        max: max_for_subject(exams, subject_id),
        min: min_for_subject(exams, subject_id),
        rate: scoring_rate(catalog, exams, subject_id),
        valid_count: valid_scores(exams, subject_id).count(),
    })
}

/// Summaries for every catalog subject, in catalog order.
pub fn subject_summaries(catalog: &SubjectCatalog, exams: &[ExamRecord]) -> Vec<SubjectSummary> {
    catalog
        .ids()
        .filter_map(|id| subject_summary(catalog, exams, id))
        .collect()
}

/// Totals across all exams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamOverview {
    pub exam_count: usize,
    pub highest_total: f64,
    pub lowest_total: f64,
    pub average_total: f64,
}

/// Highest, lowest, and mean total score; `None` for an empty store.
pub fn exam_overview(exams: &[ExamRecord]) -> Option<ExamOverview> {
    if exams.is_empty() {
        return None;
    }
    let totals: Vec<f64> = exams.iter().map(total_score).collect();
    let sum: f64 = totals.iter().sum();
    Some(ExamOverview {
        exam_count: totals.len(),
        highest_total: totals.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        lowest_total: totals.iter().copied().fold(f64::INFINITY, f64::min),
        average_total: sum / totals.len() as f64,
    })
}

/// Lenient value for one subject of one exam.
pub fn subject_value(record: &ExamRecord, subject_id: &str) -> f64 {
    lenient_value(record.score(subject_id))
}
