//! gradetrack-report: dashboard rendering for gradetrack.
//!
//! Builds a [`Dashboard`] snapshot from the core engine and renders it as a
//! self-contained HTML page, a Markdown summary, or JSON.

pub mod dashboard;
pub mod html;
pub mod markdown;

pub use dashboard::{Dashboard, ExamRow};
