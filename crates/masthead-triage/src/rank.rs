//! Reviewer ranking with conflict-of-interest exclusion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use masthead_core::sla::days_between;

use crate::score::{MatchInputs, MatchWeights, keyword_overlap, match_score};

/// What the matcher knows about the submission being assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionProfile {
    pub keywords: Vec<String>,
    /// Affiliations of every listed author, for conflict checks.
    pub author_affiliations: Vec<String>,
    /// Author ids, matched against candidates' co-author history.
    pub author_ids: Vec<String>,
}

/// One reviewer under consideration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewerCandidate {
    pub id: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub affiliation: Option<String>,
    /// Ids of everyone this reviewer has published with.
    #[serde(default)]
    pub coauthor_ids: Vec<String>,
    #[serde(default)]
    pub open_assignments: u32,
    #[serde(default)]
    pub last_completed_review_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub declined_recently: bool,
}

/// A scored, conflict-free candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedReviewer {
    pub id: String,
    pub score: f64,
    pub expertise_overlap: f64,
}

/// Conflict of interest: shared affiliation with any author, or prior
/// co-authorship with any author.
#[must_use]
pub fn has_conflict(candidate: &ReviewerCandidate, profile: &SubmissionProfile) -> bool {
    if let Some(affiliation) = &candidate.affiliation {
        let affiliation = affiliation.trim().to_ascii_lowercase();
        if !affiliation.is_empty()
            && profile
                .author_affiliations
                .iter()
                .any(|a| a.trim().eq_ignore_ascii_case(&affiliation))
        {
            return true;
        }
    }

    profile
        .author_ids
        .iter()
        .any(|author| candidate.coauthor_ids.iter().any(|co| co == author))
}

/// Score and rank candidates for a submission at `now`.
///
/// Conflicted candidates are excluded before scoring. Results are sorted
/// by score descending, id ascending on ties, so rankings are stable
/// across runs.
#[must_use]
pub fn rank_reviewers(
    profile: &SubmissionProfile,
    candidates: &[ReviewerCandidate],
    now: DateTime<Utc>,
    weights: &MatchWeights,
) -> Vec<RankedReviewer> {
    let mut ranked: Vec<RankedReviewer> = candidates
        .iter()
        .filter(|candidate| {
            if has_conflict(candidate, profile) {
                tracing::debug!(reviewer = %candidate.id, "excluded for conflict of interest");
                return false;
            }
            true
        })
        .map(|candidate| {
            let expertise_overlap = keyword_overlap(&profile.keywords, &candidate.keywords);
            let days_since_last_review = candidate
                .last_completed_review_at
                .map_or(f64::INFINITY, |at| days_between(at, now) as f64);
            let inputs = MatchInputs {
                expertise_overlap,
                open_assignments: candidate.open_assignments,
                days_since_last_review,
                declined_recently: candidate.declined_recently,
            };
            RankedReviewer {
                id: candidate.id.clone(),
                score: match_score(&inputs, weights),
                expertise_overlap,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap()
    }

    fn candidate(id: &str, keywords: &[&str]) -> ReviewerCandidate {
        ReviewerCandidate {
            id: id.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            ..ReviewerCandidate::default()
        }
    }

    fn profile(keywords: &[&str]) -> SubmissionProfile {
        SubmissionProfile {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            ..SubmissionProfile::default()
        }
    }

    #[test]
    fn better_overlap_ranks_first() {
        let profile = profile(&["crdt", "sync", "merge"]);
        let candidates = vec![
            candidate("rev-partial", &["crdt", "databases"]),
            candidate("rev-exact", &["crdt", "sync", "merge"]),
            candidate("rev-none", &["botany"]),
        ];

        let ranked = rank_reviewers(&profile, &candidates, now(), &MatchWeights::default());
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rev-exact", "rev-partial", "rev-none"]);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn shared_affiliation_is_a_conflict() {
        let mut profile = profile(&["crdt"]);
        profile.author_affiliations = vec!["University of Somewhere".to_string()];

        let mut conflicted = candidate("rev-1", &["crdt"]);
        conflicted.affiliation = Some("university of somewhere".to_string());

        let ranked = rank_reviewers(
            &profile,
            &[conflicted, candidate("rev-2", &["crdt"])],
            now(),
            &MatchWeights::default(),
        );
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rev-2"]);
    }

    #[test]
    fn coauthorship_is_a_conflict() {
        let mut profile = profile(&["crdt"]);
        profile.author_ids = vec!["author-9".to_string()];

        let mut conflicted = candidate("rev-1", &["crdt"]);
        conflicted.coauthor_ids = vec!["author-9".to_string()];

        let ranked = rank_reviewers(
            &profile,
            &[conflicted],
            now(),
            &MatchWeights::default(),
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn ties_break_by_id_for_stable_output() {
        let profile = profile(&["crdt"]);
        let ranked = rank_reviewers(
            &profile,
            &[candidate("rev-b", &["crdt"]), candidate("rev-a", &["crdt"])],
            now(),
            &MatchWeights::default(),
        );
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rev-a", "rev-b"]);
    }

    #[test]
    fn busy_reviewer_ranks_below_idle_peer() {
        let profile = profile(&["crdt"]);
        let mut busy = candidate("rev-busy", &["crdt"]);
        busy.open_assignments = 8;
        let idle = candidate("rev-idle", &["crdt"]);

        let ranked = rank_reviewers(
            &profile,
            &[busy, idle],
            now(),
            &MatchWeights::default(),
        );
        assert_eq!(ranked[0].id, "rev-idle");
    }
}
