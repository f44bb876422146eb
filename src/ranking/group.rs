use std::collections::HashMap;

use tracing::debug;

use crate::model::{
    RankGroup, RankedAttempt, RankingView, ScoredAttempt, SectionGroup, Student, StudentRanks,
};
use crate::ranking::{extract_scores, rank_attempts};

/// Build the full ranking view for one test from a roster snapshot.
pub fn compute_ranking_view(roster: &[Student], test_id: &str) -> RankingView {
    let scored = extract_scores(roster, test_id);
    let view = aggregate(scored);
    debug!(
        test_id,
        ranked = view.overall.len(),
        years = view.by_year.len(),
        branches = view.by_branch.len(),
        sections = view.by_section.len(),
        "computed ranking view"
    );
    view
}

/// Rank `scored` overall and independently within each year, branch and
/// section.
pub fn aggregate(scored: Vec<ScoredAttempt>) -> RankingView {
    let by_year = group_in_order(&scored, |s| s.student.year.to_string())
        .into_iter()
        .map(|(key, members)| RankGroup {
            key,
            entries: rank_attempts(members),
        })
        .collect();

    let by_branch = group_in_order(&scored, |s| s.student.branch.clone())
        .into_iter()
        .map(|(key, members)| RankGroup {
            key,
            entries: rank_attempts(members),
        })
        .collect();

    let by_section = group_in_order(&scored, |s| s.student.section_key())
        .into_iter()
        .map(|(section_key, members)| SectionGroup {
            section_name: section_label(&section_key),
            section_key,
            students: rank_attempts(members),
        })
        .collect();

    RankingView {
        overall: rank_attempts(scored),
        by_year,
        by_branch,
        by_section,
    }
}

/// Human-readable form of a section key: `3-CSE-A` becomes `3 | CSE | A`.
pub fn section_label(section_key: &str) -> String {
    section_key.replace('-', " | ")
}

/// Partition by key, keeping groups in first-seen order and members in input
/// order.
fn group_in_order<F>(scored: &[ScoredAttempt], key_fn: F) -> Vec<(String, Vec<ScoredAttempt>)>
where
    F: Fn(&ScoredAttempt) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<ScoredAttempt>)> = Vec::new();
    for attempt in scored {
        let key = key_fn(attempt);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(attempt.clone());
    }
    groups
}

impl RankingView {
    pub fn year(&self, year: &str) -> Option<&RankGroup> {
        self.by_year.iter().find(|g| g.key == year)
    }

    pub fn branch(&self, branch: &str) -> Option<&RankGroup> {
        self.by_branch.iter().find(|g| g.key == branch)
    }

    pub fn section(&self, section_key: &str) -> Option<&SectionGroup> {
        self.by_section.iter().find(|g| g.section_key == section_key)
    }

    /// Where `student_id` stands in each ranking; `None` where they are not
    /// ranked.
    pub fn student_ranks(&self, student_id: &str) -> StudentRanks {
        let find = |entries: &[RankedAttempt]| {
            entries
                .iter()
                .find(|e| e.attempt.student.id == student_id)
                .map(|e| e.rank)
        };
        StudentRanks {
            overall: find(&self.overall),
            year: self.by_year.iter().find_map(|g| find(&g.entries)),
            branch: self.by_branch.iter().find_map(|g| find(&g.entries)),
            section: self.by_section.iter().find_map(|g| find(&g.students)),
        }
    }
}
