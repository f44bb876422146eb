//! Data behind the downloadable assessment report.

use itertools::Itertools;
use serde::Serialize;

use crate::model::{CompletedAttempt, StudentProfile, Submission, Test, Timestamp};
use crate::review::percentage;

/// Longest time shown next to a ranked student: 3 hours.
const MAX_DISPLAYED_SECONDS: i64 = 3 * 60 * 60;

/// Letter grade for an overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum Grade {
    #[strum(serialize = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 90.0 => Grade::APlus,
            p if p >= 80.0 => Grade::A,
            p if p >= 70.0 => Grade::B,
            p if p >= 60.0 => Grade::C,
            p if p >= 50.0 => Grade::D,
            _ => Grade::F,
        }
    }
}

/// One category's line in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category_name: String,
    pub marks: u32,
    pub total: usize,
    pub percentage: f64,
}

/// Summary of one student's completed attempt at a test.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub student: StudentProfile,
    pub test_name: String,
    pub categories: Vec<CategoryBreakdown>,
    pub obtained_marks: u64,
    pub total_marks: usize,
    pub percentage: f64,
    pub grade: Grade,
    pub completed_at: Option<Timestamp>,
}

impl AssessmentReport {
    /// Build a report, walking categories in test order. Marks for categories
    /// the test does not define are ignored.
    pub fn build(student: &StudentProfile, test: &Test, attempt: &CompletedAttempt) -> Self {
        let categories = test
            .categories
            .iter()
            .map(|c| {
                let marks = attempt.marks.get(&c.category_name).copied().unwrap_or(0);
                let total = c.questions.len();
                CategoryBreakdown {
                    category_name: c.category_name.clone(),
                    marks,
                    total,
                    percentage: percentage(u64::from(marks), total),
                }
            })
            .collect_vec();
        let obtained_marks = categories.iter().map(|c| u64::from(c.marks)).sum();
        let total_marks = test.total_questions();
        let percentage = percentage(obtained_marks, total_marks);

        Self {
            student: student.clone(),
            test_name: test.test_name.clone(),
            categories,
            obtained_marks,
            total_marks,
            percentage,
            grade: Grade::from_percentage(percentage),
            completed_at: match &attempt.submission {
                Submission::At(ts) => Some(ts.clone()),
                Submission::Missing => None,
            },
        }
    }

    /// `{rollno}_{test name}_Report.pdf`, whitespace runs in the test name
    /// replaced by `_`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_Report.pdf",
            self.student.rollno,
            self.test_name.split_whitespace().join("_")
        )
    }
}

/// Render elapsed milliseconds as `HH:MM:SS`, capped at 3 hours.
///
/// Negative durations render as `00:00:00`.
pub fn format_time_taken(millis: i64) -> String {
    let seconds = (millis / 1000).clamp(0, MAX_DISPLAYED_SECONDS);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
