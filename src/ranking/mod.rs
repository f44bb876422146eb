//! Client-side ranking of completed attempts.
//!
//! Roster → [`extract_scores`] → [`rank_attempts`] per group →
//! [`RankingView`](crate::model::RankingView). Everything here is pure and
//! recomputed from scratch for each roster snapshot.

mod group;
mod paging;
mod rank;
mod score;

pub use group::{aggregate, compute_ranking_view, section_label};
pub use paging::{VisibleCounts, PAGE_SIZE};
pub use rank::{compare, rank_attempts};
pub use score::{extract_scores, score_attempt};
