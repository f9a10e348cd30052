//! The exam store and the goal set.
//!
//! Both are plain owned collections handed to the analytics functions by
//! reference. Neither caches derived values, so a mutation never leaves stale
//! statistics behind.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{GradeError, Result};
use crate::model::{ExamDraft, ExamId, ExamRecord, Grade, Semester};
use crate::score::lenient_map;

/// An insertion-ordered collection of exam records with unique ids.
#[derive(Debug, Clone, Default)]
pub struct ExamStore {
    records: Vec<ExamRecord>,
    /// Highest id ever loaded or issued. Fresh ids must exceed it.
    last_id: Option<u64>,
}

impl ExamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted records.
    ///
    /// A record whose id repeats an earlier one is dropped with a warning.
    pub fn from_records(records: Vec<ExamRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            if store.get(record.id).is_some() {
                tracing::warn!("dropping exam '{}' with duplicate id {}", record.name, record.id);
                continue;
            }
            store.last_id = store.last_id.max(Some(record.id.0));
            store.records.push(record);
        }
        store
    }

    /// Append a new record and return its freshly assigned id.
    pub fn add(&mut self, draft: ExamDraft) -> Result<ExamId> {
        validate_draft(&draft)?;

        let id = self.next_id()?;
        self.last_id = Some(id.0);
        tracing::debug!("adding exam {id} '{}' dated {}", draft.name, draft.date);
        self.records.push(ExamRecord::from_draft(id, draft));
        Ok(id)
    }

    /// Replace the whole record for `id`, keeping its position and id.
    pub fn update(&mut self, id: ExamId, draft: ExamDraft) -> Result<()> {
        validate_draft(&draft)?;

        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(GradeError::NotFound(id))?;
        tracing::debug!("updating exam {id}");
        *slot = ExamRecord::from_draft(id, draft);
        Ok(())
    }

    /// Remove the record for `id` and return it.
    pub fn remove(&mut self, id: ExamId) -> Result<ExamRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(GradeError::NotFound(id))?;
        tracing::debug!("removing exam {id}");
        Ok(self.records.remove(index))
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[ExamRecord] {
        &self.records
    }

    pub fn get(&self, id: ExamId) -> Option<&ExamRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching `filter`, in insertion order.
    pub fn filtered(&self, filter: &ExamFilter) -> Vec<&ExamRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Records matching `filter` sorted by date, newest first. Same-date
    /// records keep insertion order.
    pub fn newest_first(&self, filter: &ExamFilter) -> Vec<&ExamRecord> {
        let mut sorted = self.filtered(filter);
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Time-derived id that is strictly greater than every id seen so far.
    fn next_id(&self) -> Result<ExamId> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let floor = match self.last_id {
            Some(last) => last
                .checked_add(1)
                .ok_or_else(|| GradeError::InvalidInput("exam id space exhausted".into()))?,
            None => 0,
        };
        Ok(ExamId(now.max(floor)))
    }
}

fn validate_draft(draft: &ExamDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(GradeError::InvalidInput("exam name must not be empty".into()));
    }
    Ok(())
}

/// Optional grade/semester restriction for listing exams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExamFilter {
    pub grade: Option<Grade>,
    pub semester: Option<Semester>,
}

impl ExamFilter {
    pub fn matches(&self, record: &ExamRecord) -> bool {
        self.grade.map_or(true, |g| g == record.grade)
            && self.semester.map_or(true, |s| s == record.semester)
    }
}

/// Per-subject target scores. May be partially populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GoalSet {
    targets: BTreeMap<String, f64>,
}

impl GoalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target for a subject, replacing any previous one.
    pub fn set(&mut self, subject_id: impl Into<String>, target: f64) -> Result<()> {
        if !target.is_finite() {
            return Err(GradeError::InvalidInput(format!(
                "goal target must be a finite number, got {target}"
            )));
        }
        let subject_id = subject_id.into();
        tracing::debug!("setting goal for {subject_id} to {target}");
        self.targets.insert(subject_id, target);
        Ok(())
    }

    /// Clear the target for a subject. Returns the previous target, if any.
    pub fn clear(&mut self, subject_id: &str) -> Option<f64> {
        self.targets.remove(subject_id)
    }

    pub fn get(&self, subject_id: &str) -> Option<f64> {
        self.targets.get(subject_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.targets.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<'de> Deserialize<'de> for GoalSet {
    /// Targets may be stored as numbers or as entered text; entries that do
    /// not read as a number are dropped.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let targets = lenient_map(deserializer)?
            .into_iter()
            .filter_map(|(subject, score)| score.parse().map(|v| (subject, v)))
            .collect();
        Ok(Self { targets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(name: &str, d: NaiveDate) -> ExamDraft {
        ExamDraft::new(name, d).with_score("math", "90")
    }

    #[test]
    fn add_assigns_unique_increasing_ids() {
        let mut store = ExamStore::new();
        let a = store.add(draft("A", date(2025, 1, 1))).unwrap();
        let b = store.add(draft("B", date(2025, 1, 1))).unwrap();
        let c = store.add(draft("C", date(2024, 1, 1))).unwrap();
        assert!(a < b && b < c);
        assert_eq!(store.len(), 3);
        assert_eq!(store.list()[2].name, "C");
    }

    #[test]
    fn add_rejects_blank_name() {
        let mut store = ExamStore::new();
        let err = store.add(draft("   ", date(2025, 1, 1))).unwrap_err();
        assert!(matches!(err, GradeError::InvalidInput(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = ExamStore::new();
        let a = store.add(draft("A", date(2025, 1, 1))).unwrap();
        store.remove(a).unwrap();
        let b = store.add(draft("B", date(2025, 1, 1))).unwrap();
        assert!(b > a);
    }

    #[test]
    fn update_replaces_whole_record_in_place() {
        let mut store = ExamStore::new();
        let a = store.add(draft("A", date(2025, 1, 1))).unwrap();
        let b = store.add(draft("B", date(2025, 2, 1))).unwrap();

        let replacement = ExamDraft::new("A2", date(2025, 3, 1)).with_score("english", "100");
        store.update(a, replacement).unwrap();

        let record = store.get(a).unwrap();
        assert_eq!(record.name, "A2");
        assert_eq!(record.score("math"), None);
        assert_eq!(store.list()[0].id, a);
        assert_eq!(store.list()[1].id, b);
    }

    #[test]
    fn update_unknown_or_blank_leaves_store_unchanged() {
        let mut store = ExamStore::new();
        let a = store.add(draft("A", date(2025, 1, 1))).unwrap();
        let before = store.list().to_vec();

        let err = store.update(ExamId(1), draft("X", date(2025, 1, 1))).unwrap_err();
        assert!(err.is_not_found());

        let err = store.update(a, draft("", date(2025, 1, 1))).unwrap_err();
        assert!(matches!(err, GradeError::InvalidInput(_)));

        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn remove_missing_id_is_not_found_and_no_op() {
        let mut store = ExamStore::new();
        store.add(draft("A", date(2025, 1, 1))).unwrap();
        let before = store.list().to_vec();

        let err = store.remove(ExamId(3)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.len(), 1);
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn from_records_drops_duplicates_and_raises_floor() {
        let mut r1 = ExamRecord::from_draft(ExamId(u64::MAX - 10), draft("A", date(2025, 1, 1)));
        let r2 = r1.clone();
        r1.name = "First".into();
        let mut store = ExamStore::from_records(vec![r1, r2]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].name, "First");

        let id = store.add(draft("B", date(2025, 1, 2))).unwrap();
        assert_eq!(id, ExamId(u64::MAX - 9));
    }

    #[test]
    fn add_fails_once_id_space_is_exhausted() {
        let last = ExamRecord::from_draft(ExamId(u64::MAX), draft("A", date(2025, 1, 1)));
        let mut store = ExamStore::from_records(vec![last]);

        let err = store.add(draft("B", date(2025, 1, 2))).unwrap_err();
        assert!(matches!(err, GradeError::InvalidInput(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].id, ExamId(u64::MAX));
    }

    #[test]
    fn newest_first_is_stable_for_ties() {
        let mut store = ExamStore::new();
        let a = store.add(draft("A", date(2025, 1, 1))).unwrap();
        let b = store.add(draft("B", date(2025, 5, 1))).unwrap();
        let c = store.add(draft("C", date(2025, 5, 1))).unwrap();
        let ids: Vec<ExamId> = store
            .newest_first(&ExamFilter::default())
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![b, c, a]);
    }

    #[test]
    fn filter_by_grade_and_semester() {
        let mut store = ExamStore::new();
        store.add(draft("A", date(2025, 1, 1))).unwrap();
        let mut second = draft("B", date(2025, 3, 1));
        second.grade = Grade::Senior2;
        second.semester = Semester::Second;
        store.add(second).unwrap();

        let all = store.filtered(&ExamFilter::default());
        assert_eq!(all.len(), 2);

        let senior2 = store.filtered(&ExamFilter {
            grade: Some(Grade::Senior2),
            semester: None,
        });
        assert_eq!(senior2.len(), 1);
        assert_eq!(senior2[0].name, "B");

        let none = store.filtered(&ExamFilter {
            grade: Some(Grade::Senior1),
            semester: Some(Semester::Second),
        });
        assert!(none.is_empty());

        let first_term = store.newest_first(&ExamFilter {
            grade: None,
            semester: Some(Semester::First),
        });
        assert_eq!(first_term.len(), 1);
        assert_eq!(first_term[0].name, "A");
    }

    #[test]
    fn goal_set_and_clear() {
        let mut goals = GoalSet::new();
        goals.set("math", 130.0).unwrap();
        goals.set("math", 135.0).unwrap();
        assert_eq!(goals.get("math"), Some(135.0));
        assert!(goals.set("english", f64::NAN).is_err());
        assert_eq!(goals.clear("math"), Some(135.0));
        assert_eq!(goals.clear("math"), None);
        assert!(goals.is_empty());
    }

    #[test]
    fn goal_set_reads_text_targets() {
        let goals: GoalSet =
            serde_json::from_str(r#"{"math": "130", "english": 120, "physics": ""}"#).unwrap();
        assert_eq!(goals.get("math"), Some(130.0));
        assert_eq!(goals.get("english"), Some(120.0));
        assert_eq!(goals.get("physics"), None);
        assert_eq!(goals.len(), 2);
    }
}
