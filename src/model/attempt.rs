use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Marks earned per category, keyed by category name.
pub type Marks = BTreeMap<String, u32>;

/// Time limit applied when an attempt record does not carry one: 3 hours.
pub const DEFAULT_TIME_LIMIT_MS: i64 = 3 * 60 * 60 * 1000;

/// Status of a student's attempt at an assigned test.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AttemptStatus {
    Pending,
    InProgress,
    Completed,
}

/// One student's record of one assigned test.
///
/// Only a completed attempt carries marks and a submission, so code that
/// scores attempts never has to guess at fields an unfinished attempt lacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AttemptRecord", into = "AttemptRecord")]
pub enum Attempt {
    Pending {
        test_id: String,
    },
    InProgress {
        test_id: String,
        start: Option<Timestamp>,
    },
    Completed(CompletedAttempt),
}

/// A finished attempt, eligible for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedAttempt {
    pub test_id: String,
    pub marks: Marks,
    pub start: Timestamp,
    pub submission: Submission,
    pub time_limit: Option<i64>,
}

/// When a completed attempt was handed in.
///
/// `Missing` is a completed attempt the API returned without a submission
/// time. Its elapsed time is measured against the Unix epoch, which is almost
/// certainly wrong; it is kept visible instead of being papered over.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    At(Timestamp),
    Missing,
}

/// A timestamp exactly as the API sent it, parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub String);

impl Timestamp {
    /// Parse as RFC 3339, falling back to a zone-less ISO date-time taken as
    /// UTC. Returns `None` for anything else.
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
            })
            .ok()
    }

    /// Milliseconds since the Unix epoch.
    pub fn millis(&self) -> Option<i64> {
        self.parse().map(|dt| dt.timestamp_millis())
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
    }
}

impl Attempt {
    pub fn test_id(&self) -> &str {
        match self {
            Attempt::Pending { test_id } | Attempt::InProgress { test_id, .. } => test_id,
            Attempt::Completed(c) => &c.test_id,
        }
    }

    pub fn status(&self) -> AttemptStatus {
        match self {
            Attempt::Pending { .. } => AttemptStatus::Pending,
            Attempt::InProgress { .. } => AttemptStatus::InProgress,
            Attempt::Completed(_) => AttemptStatus::Completed,
        }
    }

    pub fn as_completed(&self) -> Option<&CompletedAttempt> {
        match self {
            Attempt::Completed(c) => Some(c),
            _ => None,
        }
    }
}

/// Flat wire shape of an assigned test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttemptRecord {
    test_id: String,
    #[serde(default)]
    status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    marks: Option<Marks>,
    #[serde(default)]
    start: Option<Timestamp>,
    #[serde(default)]
    submitted_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_limit: Option<i64>,
}

impl From<AttemptRecord> for Attempt {
    fn from(record: AttemptRecord) -> Self {
        let status = AttemptStatus::from_str(&record.status).unwrap_or_else(|_| {
            warn!(
                test_id = %record.test_id,
                status = %record.status,
                "unknown attempt status, treating as pending"
            );
            AttemptStatus::Pending
        });
        match status {
            AttemptStatus::Pending => Attempt::Pending {
                test_id: record.test_id,
            },
            AttemptStatus::InProgress => Attempt::InProgress {
                test_id: record.test_id,
                start: record.start,
            },
            AttemptStatus::Completed => Attempt::Completed(CompletedAttempt {
                test_id: record.test_id,
                marks: record.marks.unwrap_or_default(),
                start: record.start.unwrap_or_default(),
                submission: record
                    .submitted_at
                    .map(Submission::At)
                    .unwrap_or(Submission::Missing),
                // zero means "not set" on the wire
                time_limit: record.time_limit.filter(|&limit| limit != 0),
            }),
        }
    }
}

impl From<Attempt> for AttemptRecord {
    fn from(attempt: Attempt) -> Self {
        let status = attempt.status().to_string();
        match attempt {
            Attempt::Pending { test_id } => AttemptRecord {
                test_id,
                status,
                ..Default::default()
            },
            Attempt::InProgress { test_id, start } => AttemptRecord {
                test_id,
                status,
                start,
                ..Default::default()
            },
            Attempt::Completed(c) => AttemptRecord {
                test_id: c.test_id,
                status,
                marks: Some(c.marks),
                start: Some(c.start),
                submitted_at: match c.submission {
                    Submission::At(ts) => Some(ts),
                    Submission::Missing => None,
                },
                time_limit: c.time_limit,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_attempt_from_wire() {
        let attempt: Attempt = serde_json::from_str(
            r#"{
                "testId": "t1",
                "status": "completed",
                "marks": {"Aptitude": 4, "Reasoning": 3},
                "start": "2025-03-01T10:00:00.000Z",
                "submittedAt": "2025-03-01T10:30:00.000Z"
            }"#,
        )
        .unwrap();

        let completed = attempt.as_completed().unwrap();
        assert_eq!(completed.test_id, "t1");
        assert_eq!(completed.marks["Aptitude"], 4);
        assert_eq!(completed.time_limit, None);
        assert!(matches!(completed.submission, Submission::At(_)));
    }

    #[test]
    fn test_completed_attempt_without_submission_is_flagged() {
        let attempt: Attempt = serde_json::from_str(
            r#"{
                "testId": "t1",
                "status": "completed",
                "start": "2025-03-01T10:00:00Z",
                "submittedAt": null
            }"#,
        )
        .unwrap();

        let completed = attempt.as_completed().unwrap();
        assert_eq!(completed.submission, Submission::Missing);
        assert!(completed.marks.is_empty());
    }

    #[test]
    fn test_zero_time_limit_is_unset() {
        let attempt: Attempt = serde_json::from_str(
            r#"{
                "testId": "t1",
                "status": "completed",
                "start": "2025-03-01T10:00:00Z",
                "submittedAt": "2025-03-01T11:00:00Z",
                "timeLimit": 0
            }"#,
        )
        .unwrap();
        assert_eq!(attempt.as_completed().unwrap().time_limit, None);

        let attempt: Attempt = serde_json::from_str(
            r#"{"testId": "t1", "status": "completed", "timeLimit": 600000}"#,
        )
        .unwrap();
        assert_eq!(attempt.as_completed().unwrap().time_limit, Some(600_000));
    }

    #[test]
    fn test_pending_attempt_drops_marks() {
        let attempt: Attempt = serde_json::from_str(
            r#"{"testId": "t2", "status": "pending", "marks": {"Aptitude": 9}}"#,
        )
        .unwrap();
        assert_eq!(
            attempt,
            Attempt::Pending {
                test_id: "t2".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_status_is_pending() {
        let attempt: Attempt =
            serde_json::from_str(r#"{"testId": "t3", "status": "abandoned"}"#).unwrap();
        assert_eq!(attempt.status(), AttemptStatus::Pending);
    }

    #[test]
    fn test_in_progress_status() {
        let attempt: Attempt = serde_json::from_str(
            r#"{"testId": "t4", "status": "in-progress", "start": "2025-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(attempt.status(), AttemptStatus::InProgress);
        assert_eq!(attempt.status().to_string(), "in-progress");
    }

    #[test]
    fn test_serializes_back_to_wire_shape() {
        let attempt = Attempt::Completed(CompletedAttempt {
            test_id: "t1".to_string(),
            marks: Marks::from([("Aptitude".to_string(), 2)]),
            start: Timestamp::from("2025-03-01T10:00:00Z"),
            submission: Submission::Missing,
            time_limit: None,
        });
        let value = serde_json::to_value(&attempt).unwrap();
        assert_eq!(value["testId"], "t1");
        assert_eq!(value["status"], "completed");
        assert_eq!(value["marks"]["Aptitude"], 2);
        assert!(value["submittedAt"].is_null());
    }

    #[test]
    fn test_timestamp_parsing() {
        assert_eq!(
            Timestamp::from("1970-01-01T00:00:01.500Z").millis(),
            Some(1500)
        );
        assert_eq!(Timestamp::from("1970-01-01T00:00:02").millis(), Some(2000));
        assert_eq!(Timestamp::from("not a date").millis(), None);
        assert_eq!(Timestamp::default().millis(), None);
    }
}
