//! Example exams used when no data has been saved yet.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{ExamId, ExamRecord, ExamType, Grade, Semester};
use crate::score::Score;

fn scores(entries: &[(&str, &str)]) -> BTreeMap<String, Score> {
    entries
        .iter()
        .map(|(subject, value)| (subject.to_string(), Score::from(*value)))
        .collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid calendar dates")
}

/// Two first-term senior-one exams with every subject filled in.
pub fn seed_exams() -> Vec<ExamRecord> {
    vec![
        ExamRecord {
            id: ExamId(1),
            name: "第一次段考".into(),
            exam_type: ExamType::Monthly,
            grade: Grade::Senior1,
            semester: Semester::First,
            date: date(2025, 10, 10),
            scores: scores(&[
                ("chinese", "98"),
                ("math", "94"),
                ("english", "102.5"),
                ("physics", "76"),
                ("chemistry", "89"),
                ("biology", "88"),
                ("politics", "68"),
                ("history", "63"),
                ("geography", "75"),
            ]),
        },
        ExamRecord {
            id: ExamId(2),
            name: "期中考试".into(),
            exam_type: ExamType::Midterm,
            grade: Grade::Senior1,
            semester: Semester::First,
            date: date(2025, 11, 11),
            scores: scores(&[
                ("chinese", "87"),
                ("math", "97"),
                ("english", "100.5"),
                ("physics", "77"),
                ("chemistry", "48"),
                ("biology", "70"),
                ("politics", "98"),
                ("history", "96"),
                ("geography", "95"),
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::{average_for_subject, total_score};

    #[test]
    fn seed_totals() {
        let exams = seed_exams();
        assert_eq!(total_score(&exams[0]), 753.5);
        assert_eq!(total_score(&exams[1]), 768.5);
        assert_eq!(average_for_subject(&exams, "math"), 95.5);
    }
}
