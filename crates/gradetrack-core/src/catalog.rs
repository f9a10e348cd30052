//! The subject catalog: a fixed, validated list of subjects.
//!
//! The catalog is immutable once built. Its length is arbitrary, and it can be
//! replaced wholesale from configuration without code changes.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{GradeError, Result};
use crate::model::Subject;

/// An ordered list of subjects with unique ids and positive full scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectCatalog {
    subjects: Vec<Subject>,
}

impl SubjectCatalog {
    /// Build a catalog, rejecting empty lists, blank or duplicate ids, and
    /// non-positive full scores.
    pub fn new(subjects: Vec<Subject>) -> Result<Self> {
        if subjects.is_empty() {
            return Err(GradeError::InvalidCatalog("no subjects defined".into()));
        }

        let mut seen = HashSet::new();
        for subject in &subjects {
            if subject.id.trim().is_empty() {
                return Err(GradeError::InvalidCatalog("subject id is empty".into()));
            }
            if !seen.insert(subject.id.as_str()) {
                return Err(GradeError::InvalidCatalog(format!(
                    "duplicate subject id: {}",
                    subject.id
                )));
            }
            if !(subject.full_score.is_finite() && subject.full_score > 0.0) {
                return Err(GradeError::InvalidCatalog(format!(
                    "full score for {} must be positive, got {}",
                    subject.id, subject.full_score
                )));
            }
        }

        Ok(Self { subjects })
    }

    /// Look up a subject by id.
    pub fn get(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Look up a subject, failing with [`GradeError::UnknownSubject`].
    pub fn require(&self, id: &str) -> Result<&Subject> {
        self.get(id)
            .ok_or_else(|| GradeError::UnknownSubject(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Subjects in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Subject> {
        self.subjects.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(|s| s.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl Default for SubjectCatalog {
    /// The nine-subject senior high school catalog.
    fn default() -> Self {
        let subjects = [
            ("chinese", "语文", 150.0),
            ("math", "数学", 150.0),
            ("english", "英语", 150.0),
            ("physics", "物理", 100.0),
            ("chemistry", "化学", 100.0),
            ("biology", "生物", 100.0),
            ("history", "历史", 100.0),
            ("geography", "地理", 100.0),
            ("politics", "政治", 100.0),
        ]
        .into_iter()
        .map(|(id, name, full)| Subject::new(id, name, full))
        .collect();

        Self { subjects }
    }
}

impl<'a> IntoIterator for &'a SubjectCatalog {
    type Item = &'a Subject;
    type IntoIter = std::slice::Iter<'a, Subject>;

    fn into_iter(self) -> Self::IntoIter {
        self.subjects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_nine_subjects() {
        let catalog = SubjectCatalog::default();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.get("math").unwrap().full_score, 150.0);
        assert_eq!(catalog.get("physics").unwrap().full_score, 100.0);
        assert_eq!(catalog.ids().next(), Some("chinese"));
    }

    #[test]
    fn custom_catalog_of_any_length() {
        let catalog = SubjectCatalog::new(vec![Subject::new("art", "Art", 50.0)]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("art"));
        assert!(!catalog.contains("math"));
    }

    #[test]
    fn rejects_duplicates() {
        let err = SubjectCatalog::new(vec![
            Subject::new("math", "Math", 150.0),
            Subject::new("math", "Maths", 100.0),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_bad_full_score_and_empty() {
        assert!(SubjectCatalog::new(vec![Subject::new("math", "Math", 0.0)]).is_err());
        assert!(SubjectCatalog::new(vec![Subject::new("math", "Math", f64::NAN)]).is_err());
        assert!(SubjectCatalog::new(vec![Subject::new(" ", "Blank", 10.0)]).is_err());
        assert!(SubjectCatalog::new(vec![]).is_err());
    }

    #[test]
    fn require_reports_unknown_subject() {
        let catalog = SubjectCatalog::default();
        assert!(matches!(
            catalog.require("art"),
            Err(GradeError::UnknownSubject(id)) if id == "art"
        ));
    }
}
