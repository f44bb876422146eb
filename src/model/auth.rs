use serde::{Deserialize, Serialize};

use crate::model::{Marks, StudentProfile};

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub rollno: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
    pub student: StudentProfile,
}

/// New student sign-up for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub rollno: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub year: u32,
    pub branch: String,
    pub section: String,
    pub semester: u8,
}

/// An authenticated student.
///
/// Created by [`PortalClient::login`](crate::PortalClient::login) and handed
/// to every call made on the student's behalf. Logging out consumes it.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub student: StudentProfile,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StartTestRequest<'a> {
    pub student_id: &'a str,
    pub test_id: &'a str,
    pub year: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitTestRequest<'a> {
    pub student_id: &'a str,
    pub test_id: &'a str,
    pub year: u32,
    pub marks: &'a Marks,
}

/// Error body the API returns alongside non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of asking the API to start a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// The student's attempt is already completed; nothing was sent.
    AlreadyCompleted,
    /// The API refused to start the test.
    Rejected { message: Option<String> },
}

/// Result of handing in an answer sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { marks: Marks },
    /// Some categories still have unsubmitted questions; nothing was sent.
    Incomplete { completed_categories: Vec<String> },
}
