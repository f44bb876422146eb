use tracing::{debug, instrument, warn};

use crate::api::{endpoint, get_json};
use crate::error::Result;
use crate::model::Student;

/// Fetch the full roster.
///
/// Records are decoded one at a time; a record that does not decode is
/// skipped so the rest of the roster can still be ranked.
#[instrument(skip(client))]
pub(crate) async fn get_students(client: &reqwest::Client, base_url: &str) -> Result<Vec<Student>> {
    let url = endpoint(base_url, "students");
    let records: Vec<serde_json::Value> = get_json(client, &url).await?;
    let total = records.len();
    let students: Vec<Student> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            serde_json::from_value(record)
                .map_err(|e| warn!(index, error = %e, "skipping undecodable student record"))
                .ok()
        })
        .collect();
    debug!(count = students.len(), skipped = total - students.len(), "fetched roster");
    Ok(students)
}

#[instrument(skip(client))]
pub(crate) async fn get_student(
    client: &reqwest::Client,
    base_url: &str,
    student_id: &str,
    year: u32,
) -> Result<Student> {
    let url = endpoint(base_url, &format!("students/{student_id}?year={year}"));
    let student: Student = get_json(client, &url).await?;
    debug!(assigned = student.assigned_tests.len(), "fetched student");
    Ok(student)
}
