//! Issue ranking - orders candidates by evidential strength.

use loghound_common::Issue;
use std::cmp::Reverse;

/// Ranking score: keyword hits weigh double, evidence lines single.
pub fn score(issue: &Issue) -> usize {
    issue.keyword_hits.len() * 2 + issue.evidence.len()
}

/// Stable-sort issues descending by score.
///
/// Ties keep their original order, which is catalog declaration order for
/// freshly detected issues.
pub fn rank_issues(mut issues: Vec<Issue>) -> Vec<Issue> {
    issues.sort_by_key(|issue| Reverse(score(issue)));
    issues
}
