use std::collections::HashMap;

use crate::model::RankingView;

/// Rows shown per ranking before the first "show more".
pub const PAGE_SIZE: usize = 10;

/// Per-list "show more" counters for a ranking view.
///
/// Purely a display concern: the view always holds complete rankings and
/// this only decides how many rows of each one to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleCounts {
    counts: HashMap<String, usize>,
}

impl VisibleCounts {
    /// One counter per list in `view`, each starting at [`PAGE_SIZE`].
    pub fn for_view(view: &RankingView) -> Self {
        let keys = std::iter::once(Self::overall_key())
            .chain(view.by_year.iter().map(|g| Self::year_key(&g.key)))
            .chain(view.by_branch.iter().map(|g| Self::branch_key(&g.key)))
            .chain(view.by_section.iter().map(|g| g.section_key.clone()));
        Self {
            counts: keys.map(|k| (k, PAGE_SIZE)).collect(),
        }
    }

    pub fn overall_key() -> String {
        "Overall".to_string()
    }

    pub fn year_key(year: &str) -> String {
        format!("Year-{year}")
    }

    pub fn branch_key(branch: &str) -> String {
        format!("Branch-{branch}")
    }

    /// Rows to show for `key`.
    pub fn visible(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(PAGE_SIZE)
    }

    /// Whether a list of `len` rows has more than is shown.
    pub fn has_more(&self, key: &str, len: usize) -> bool {
        len > self.visible(key)
    }

    pub fn show_more(&mut self, key: &str) {
        *self.counts.entry(key.to_string()).or_insert(PAGE_SIZE) += PAGE_SIZE;
    }

    /// The visible prefix of `entries`.
    pub fn page<'a, T>(&self, key: &str, entries: &'a [T]) -> &'a [T] {
        &entries[..entries.len().min(self.visible(key))]
    }
}
