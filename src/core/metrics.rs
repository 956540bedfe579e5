//! Reaction counting and the engagement ratio.

use super::reactions::ReactionSummary;

/// Total number of reactions in a possibly-absent summary.
///
/// An absent summary counts as 0, and so does every entry that exposes no
/// count.
///
/// ```
/// use postpack::core::metrics::count_reactions;
/// use postpack::core::reactions::{ReactionEntry, ReactionSummary};
///
/// assert_eq!(count_reactions(None), 0);
///
/// let summary = ReactionSummary::new(vec![ReactionEntry::emoji("👍", Some(7))]);
/// assert_eq!(count_reactions(Some(&summary)), 7);
/// ```
pub fn count_reactions(summary: Option<&ReactionSummary>) -> u64 {
    summary.map_or(0, ReactionSummary::total)
}

/// Reactions per view.
///
/// Returns exactly `0.0` when `views` is zero.
///
/// ```
/// use postpack::core::metrics::engagement;
///
/// assert_eq!(engagement(7, 100), 0.07);
/// assert_eq!(engagement(5, 0), 0.0);
/// ```
pub fn engagement(reactions: u64, views: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    reactions as f64 / views as f64
}
