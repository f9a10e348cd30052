//! gradetrack-core: exam store, score policy, and aggregation engine.
//!
//! This crate defines the data model, the exam and goal collections, and the
//! pure analytics (totals, per-subject statistics, trend series, radar
//! profile, goal progress) that the rest of gradetrack builds on.

pub mod catalog;
pub mod config;
pub mod error;
pub mod goals;
pub mod model;
pub mod persistence;
pub mod radar;
pub mod score;
pub mod seed;
pub mod statistics;
pub mod store;
pub mod trend;

pub use catalog::SubjectCatalog;
pub use error::GradeError;
pub use model::{ExamDraft, ExamId, ExamRecord, ExamType, Grade, Semester, Subject};
pub use score::Score;
pub use store::{ExamFilter, ExamStore, GoalSet};
