use tracing::debug;

use crate::model::{
    CompletedAttempt, ScoredAttempt, Student, Submission, TimeTaken, DEFAULT_TIME_LIMIT_MS,
};

/// Score every student who has a completed attempt at `test_id`.
///
/// Students without one are left out rather than scored as zero. Roster order
/// is preserved, which later decides the order of exact ties.
pub fn extract_scores(roster: &[Student], test_id: &str) -> Vec<ScoredAttempt> {
    let scored: Vec<ScoredAttempt> = roster
        .iter()
        .filter_map(|student| {
            student
                .completed_attempt(test_id)
                .map(|attempt| score_attempt(student, attempt))
        })
        .collect();
    debug!(
        test_id,
        roster = roster.len(),
        scored = scored.len(),
        "extracted scores"
    );
    scored
}

/// Reduce one completed attempt to its total score and timing.
pub fn score_attempt(student: &Student, attempt: &CompletedAttempt) -> ScoredAttempt {
    let total_score = attempt.marks.values().map(|&m| u64::from(m)).sum();
    let time_limit = attempt.time_limit.unwrap_or(DEFAULT_TIME_LIMIT_MS);
    let time_taken = time_taken(attempt);
    let completed_on_time = time_taken.millis().is_some_and(|ms| ms <= time_limit);

    ScoredAttempt {
        student: student.profile.clone(),
        total_score,
        time_taken,
        time_limit,
        completed_on_time,
    }
}

fn time_taken(attempt: &CompletedAttempt) -> TimeTaken {
    let Some(start) = attempt.start.millis() else {
        return TimeTaken::Unparseable;
    };
    match &attempt.submission {
        Submission::At(submitted) => submitted
            .millis()
            .map(|submitted| TimeTaken::Elapsed(submitted - start))
            .unwrap_or(TimeTaken::Unparseable),
        Submission::Missing => TimeTaken::SinceEpoch(-start),
    }
}
