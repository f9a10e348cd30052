//! Core data model types for gradetrack.
//!
//! These are the fundamental types the whole system uses to represent
//! subjects, exam records, and their category metadata.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::score::{lenient_map, Score};

/// An academic subject with its maximum attainable score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique key (e.g. "math").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Maximum attainable score. Always positive.
    pub full_score: f64,
}

impl Subject {
    pub fn new(id: impl Into<String>, name: impl Into<String>, full_score: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            full_score,
        }
    }
}

/// Stable identifier of an exam record. Assigned at creation, never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExamId(pub u64);

impl fmt::Display for ExamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExamId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ExamId)
            .map_err(|_| format!("invalid exam id: {s}"))
    }
}

/// Category of an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ExamType {
    #[default]
    Monthly,
    Midterm,
    Final,
    Mock,
    Weekly,
    Other,
}

impl ExamType {
    pub const ALL: [ExamType; 6] = [
        ExamType::Monthly,
        ExamType::Midterm,
        ExamType::Final,
        ExamType::Mock,
        ExamType::Weekly,
        ExamType::Other,
    ];

    fn key(self) -> &'static str {
        match self {
            ExamType::Monthly => "monthly",
            ExamType::Midterm => "midterm",
            ExamType::Final => "final",
            ExamType::Mock => "mock",
            ExamType::Weekly => "weekly",
            ExamType::Other => "other",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExamType::Monthly => "月考",
            ExamType::Midterm => "期中",
            ExamType::Final => "期末",
            ExamType::Mock => "模拟考",
            ExamType::Weekly => "周测",
            ExamType::Other => "其他",
        };
        f.write_str(label)
    }
}

impl TryFrom<String> for ExamType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ExamType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(s) || t.to_string() == s)
            .ok_or_else(|| format!("unknown exam type: {s}"))
    }
}

/// School year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Grade {
    #[default]
    Senior1,
    Senior2,
    Senior3,
}

impl Grade {
    pub const ALL: [Grade; 3] = [Grade::Senior1, Grade::Senior2, Grade::Senior3];

    fn key(self) -> &'static str {
        match self {
            Grade::Senior1 => "senior1",
            Grade::Senior2 => "senior2",
            Grade::Senior3 => "senior3",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Grade::Senior1 => "高一",
            Grade::Senior2 => "高二",
            Grade::Senior3 => "高三",
        };
        f.write_str(label)
    }
}

impl TryFrom<String> for Grade {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Grade::ALL
            .into_iter()
            .find(|g| g.key().eq_ignore_ascii_case(s) || g.to_string() == s)
            .ok_or_else(|| format!("unknown grade: {s}"))
    }
}

/// School term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Semester {
    #[default]
    First,
    Second,
}

impl Semester {
    pub const ALL: [Semester; 2] = [Semester::First, Semester::Second];

    fn key(self) -> &'static str {
        match self {
            Semester::First => "first",
            Semester::Second => "second",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Semester::First => "上学期",
            Semester::Second => "下学期",
        };
        f.write_str(label)
    }
}

impl TryFrom<String> for Semester {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Semester::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(s) || t.to_string() == s)
            .ok_or_else(|| format!("unknown semester: {s}"))
    }
}

/// One scored exam attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Unique identifier within the store.
    pub id: ExamId,
    /// Display label. Never blank.
    pub name: String,
    /// Exam category.
    #[serde(default, rename = "type")]
    pub exam_type: ExamType,
    /// School year.
    #[serde(default)]
    pub grade: Grade,
    /// School term.
    #[serde(default)]
    pub semester: Semester,
    /// Calendar date used for chronological ordering. Not unique.
    pub date: NaiveDate,
    /// Raw scores keyed by subject id. Absent key means not yet entered.
    #[serde(default, deserialize_with = "lenient_map")]
    pub scores: BTreeMap<String, Score>,
}

impl ExamRecord {
    /// Build a record from a draft and an assigned id.
    pub fn from_draft(id: ExamId, draft: ExamDraft) -> Self {
        Self {
            id,
            name: draft.name,
            exam_type: draft.exam_type,
            grade: draft.grade,
            semester: draft.semester,
            date: draft.date,
            scores: draft.scores,
        }
    }

    /// The raw score entered for a subject, if any.
    pub fn score(&self, subject_id: &str) -> Option<&Score> {
        self.scores.get(subject_id)
    }
}

/// Everything needed to create or replace an exam record, minus the id.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamDraft {
    pub name: String,
    pub exam_type: ExamType,
    pub grade: Grade,
    pub semester: Semester,
    pub date: NaiveDate,
    pub scores: BTreeMap<String, Score>,
}

impl ExamDraft {
    /// A draft with default category metadata and no scores.
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            exam_type: ExamType::default(),
            grade: Grade::default(),
            semester: Semester::default(),
            date,
            scores: BTreeMap::new(),
        }
    }

    /// Builder-style score entry.
    pub fn with_score(mut self, subject_id: impl Into<String>, score: impl Into<Score>) -> Self {
        self.scores.insert(subject_id.into(), score.into());
        self
    }
}

impl From<&ExamRecord> for ExamDraft {
    fn from(record: &ExamRecord) -> Self {
        Self {
            name: record.name.clone(),
            exam_type: record.exam_type,
            grade: record.grade,
            semester: record.semester,
            date: record.date,
            scores: record.scores.clone(),
        }
    }
}
