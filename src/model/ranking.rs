use std::cmp::Ordering;

use serde::Serialize;

use crate::model::StudentProfile;

/// Elapsed time between starting and submitting an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "ms", rename_all = "camelCase")]
pub enum TimeTaken {
    /// `submittedAt - start`, in milliseconds. Can be negative if the API
    /// recorded the timestamps out of order.
    Elapsed(i64),
    /// The attempt has no submission time, so this is `0 - start`: a large
    /// negative number that wins every time tie-break.
    SinceEpoch(i64),
    /// One of the timestamps could not be parsed.
    Unparseable,
}

impl TimeTaken {
    /// The raw millisecond value, if there is one.
    pub fn millis(&self) -> Option<i64> {
        match *self {
            TimeTaken::Elapsed(ms) | TimeTaken::SinceEpoch(ms) => Some(ms),
            TimeTaken::Unparseable => None,
        }
    }

    /// Faster first; unparseable times after every measured one.
    pub fn fastest_first(&self, other: &Self) -> Ordering {
        match (self.millis(), other.millis()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// A completed attempt reduced to what ranking needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredAttempt {
    #[serde(flatten)]
    pub student: StudentProfile,
    /// Sum of the per-category marks.
    pub total_score: u64,
    pub time_taken: TimeTaken,
    pub time_limit: i64,
    pub completed_on_time: bool,
}

/// A scored attempt with its 1-based position in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAttempt {
    #[serde(flatten)]
    pub attempt: ScoredAttempt,
    pub rank: usize,
}

/// Ranked members of one year or branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankGroup {
    pub key: String,
    pub entries: Vec<RankedAttempt>,
}

/// Ranked members of one class section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionGroup {
    /// `{year}-{branch}-{section}`
    pub section_key: String,
    /// The key with `-` shown as ` | `.
    pub section_name: String,
    pub students: Vec<RankedAttempt>,
}

/// Rankings for one test: overall plus independent per-group rankings.
///
/// Groups appear in the order their key was first seen in the roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingView {
    pub overall: Vec<RankedAttempt>,
    pub by_year: Vec<RankGroup>,
    pub by_branch: Vec<RankGroup>,
    pub by_section: Vec<SectionGroup>,
}

/// One student's rank in each ranking they appear in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StudentRanks {
    pub overall: Option<usize>,
    pub year: Option<usize>,
    pub branch: Option<usize>,
    pub section: Option<usize>,
}
