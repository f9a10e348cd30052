//! Goal progress against the latest exam.

use serde::{Deserialize, Serialize};

use crate::catalog::SubjectCatalog;
use crate::model::ExamRecord;
use crate::radar::latest_exam;
use crate::statistics::{round1, subject_value};
use crate::store::GoalSet;

/// Progress toward one subject's target score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub subject_id: String,
    pub target: f64,
    /// Lenient score from the latest exam.
    pub current: f64,
    /// `current / target` as a percentage, rounded to one decimal, capped at 100.
    pub progress_percent: f64,
}

impl GoalProgress {
    pub fn achieved(&self) -> bool {
        self.current >= self.target
    }
}

/// Progress for one subject.
///
/// `None` when no goal (or a zero goal) is set for the subject, or when there
/// are no exams. The percentage is capped from above only.
pub fn progress(goals: &GoalSet, exams: &[ExamRecord], subject_id: &str) -> Option<GoalProgress> {
    let target = goals.get(subject_id).filter(|t| *t != 0.0)?;
    let latest = latest_exam(exams)?;
    let current = subject_value(latest, subject_id);

    Some(GoalProgress {
        subject_id: subject_id.to_string(),
        target,
        current,
        progress_percent: round1(current / target * 100.0).min(100.0),
    })
}

/// Progress for every catalog subject that has a goal, in catalog order.
pub fn progress_all(
    catalog: &SubjectCatalog,
    goals: &GoalSet,
    exams: &[ExamRecord],
) -> Vec<GoalProgress> {
    catalog
        .ids()
        .filter_map(|id| progress(goals, exams, id))
        .collect()
}
