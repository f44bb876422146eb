use serde::{Deserialize, Serialize};

use crate::model::{Attempt, CompletedAttempt};

/// Identity and classification attributes of a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub rollno: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub year: u32,
    pub branch: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub semester: u8,
}

impl StudentProfile {
    /// Composite class-section key, `{year}-{branch}-{section}`.
    pub fn section_key(&self) -> String {
        format!("{}-{}-{}", self.year, self.branch, self.section)
    }
}

/// A student record as returned by the roster endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(flatten)]
    pub profile: StudentProfile,
    #[serde(default)]
    pub assigned_tests: Vec<Attempt>,
}

impl Student {
    /// The first attempt record for `test_id`, whatever its status.
    pub fn attempt(&self, test_id: &str) -> Option<&Attempt> {
        self.assigned_tests.iter().find(|a| a.test_id() == test_id)
    }

    /// The first completed attempt at `test_id`, skipping unfinished ones.
    pub fn completed_attempt(&self, test_id: &str) -> Option<&CompletedAttempt> {
        self.assigned_tests
            .iter()
            .filter_map(Attempt::as_completed)
            .find(|a| a.test_id == test_id)
    }
}
