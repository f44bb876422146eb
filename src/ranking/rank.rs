use std::cmp::Ordering;

use itertools::Itertools;

use crate::model::{RankedAttempt, ScoredAttempt};

/// Highest score first, then fastest.
pub fn compare(a: &ScoredAttempt, b: &ScoredAttempt) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then_with(|| a.time_taken.fastest_first(&b.time_taken))
}

/// Sort attempts and number them `1..=n` by position.
///
/// The sort is stable, so attempts with the same score and time keep their
/// input order and still get distinct, consecutive ranks.
pub fn rank_attempts(attempts: Vec<ScoredAttempt>) -> Vec<RankedAttempt> {
    attempts
        .into_iter()
        .sorted_by(compare)
        .enumerate()
        .map(|(i, attempt)| RankedAttempt {
            attempt,
            rank: i + 1,
        })
        .collect()
}
