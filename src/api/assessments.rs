use tracing::{debug, instrument};

use crate::api::{endpoint, get_json, post_json};
use crate::error::{PortalError, Result};
use crate::model::{
    AttemptStatus, Marks, Session, StartOutcome, StartTestRequest, Student, SubmitTestRequest,
    Test,
};

#[instrument(skip(client))]
pub(crate) async fn get_tests(client: &reqwest::Client, base_url: &str) -> Result<Vec<Test>> {
    let url = endpoint(base_url, "tests/all");
    let tests: Vec<Test> = get_json(client, &url).await?;
    debug!(count = tests.len(), "fetched tests");
    Ok(tests)
}

#[instrument(skip(client))]
pub(crate) async fn get_test(
    client: &reqwest::Client,
    base_url: &str,
    test_id: &str,
) -> Result<Test> {
    let url = endpoint(base_url, &format!("tests/{test_id}"));
    let test: Test = get_json(client, &url).await?;
    debug!(categories = test.categories.len(), "fetched test");
    Ok(test)
}

/// Start `test_id` for the session's student unless their own record already
/// shows it completed.
#[instrument(skip(client, session, student), fields(student_id = %session.student.id))]
pub(crate) async fn start_test(
    client: &reqwest::Client,
    base_url: &str,
    session: &Session,
    student: &Student,
    test_id: &str,
) -> Result<StartOutcome> {
    if student
        .attempt(test_id)
        .is_some_and(|a| a.status() == AttemptStatus::Completed)
    {
        debug!("attempt already completed, not starting");
        return Ok(StartOutcome::AlreadyCompleted);
    }

    let url = endpoint(base_url, &format!("tests/{test_id}/start"));
    let body = StartTestRequest {
        student_id: &session.student.id,
        test_id,
        year: session.student.year,
    };
    match post_json::<_, serde_json::Value>(client, &url, &body, Some(&session.token)).await {
        Ok(_) => Ok(StartOutcome::Started),
        Err(PortalError::UnexpectedStatus {
            status, message, ..
        }) => {
            debug!(%status, "start rejected");
            Ok(StartOutcome::Rejected { message })
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip(client, session, marks), fields(student_id = %session.student.id))]
pub(crate) async fn submit_marks(
    client: &reqwest::Client,
    base_url: &str,
    session: &Session,
    test_id: &str,
    marks: &Marks,
) -> Result<()> {
    let url = endpoint(base_url, &format!("tests/{test_id}/submit"));
    let body = SubmitTestRequest {
        student_id: &session.student.id,
        test_id,
        year: session.student.year,
        marks,
    };
    let _: serde_json::Value = post_json(client, &url, &body, Some(&session.token)).await?;
    debug!(categories = marks.len(), "submitted marks");
    Ok(())
}
