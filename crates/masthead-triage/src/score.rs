//! Weighted linear reviewer-match scoring.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Workload at or above this many open assignments zeroes availability.
const WORKLOAD_CEILING: f64 = 8.0;

/// Days since the last completed review at which freshness saturates.
const FRESHNESS_WINDOW_DAYS: f64 = 90.0;

/// Raw metric values for one reviewer candidate.
///
/// Metric fields are clamped to `[0, 1]` by [`match_score`]; non-finite
/// inputs score as 0 for their component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchInputs {
    /// Jaccard overlap between submission and reviewer keywords.
    pub expertise_overlap: f64,
    /// Review assignments currently open for this reviewer.
    pub open_assignments: u32,
    /// Days since the reviewer last completed a review; `f64::INFINITY`
    /// for a reviewer who never has.
    pub days_since_last_review: f64,
    /// Declined an invitation within the cool-off period.
    pub declined_recently: bool,
}

/// Configurable weights for the match formula:
///
/// `M(r) = w_e*overlap + w_w*availability + w_f*freshness`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub expertise: f64,
    pub workload: f64,
    pub freshness: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            expertise: 0.6,
            workload: 0.25,
            freshness: 0.15,
        }
    }
}

/// Compute the match score for one candidate.
///
/// Returns 0.0 outright for a candidate who declined recently; invitation
/// fatigue outweighs any topical fit.
#[must_use]
pub fn match_score(inputs: &MatchInputs, weights: &MatchWeights) -> f64 {
    if inputs.declined_recently {
        return 0.0;
    }

    let overlap = normalize_unit(inputs.expertise_overlap);
    let availability = 1.0 - normalize_unit(f64::from(inputs.open_assignments) / WORKLOAD_CEILING);
    let freshness = freshness_component(inputs.days_since_last_review);

    (weights.expertise * overlap)
        + (weights.workload * availability)
        + (weights.freshness * freshness)
}

/// Jaccard overlap of two keyword lists, after trimming and lowercasing.
///
/// Blank keywords are ignored; two empty sets overlap 0.0 (a submission
/// with no keywords matches nobody on expertise).
#[must_use]
pub fn keyword_overlap(a: &[String], b: &[String]) -> f64 {
    let a = normalize_keywords(a);
    let b = normalize_keywords(b);
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(&b).count() as f64;
    let union_size = a.union(&b).count() as f64;
    if union_size == 0.0 {
        0.0
    } else {
        intersection / union_size
    }
}

fn normalize_keywords(keywords: &[String]) -> HashSet<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_ascii_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn normalize_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    value.clamp(0.0, 1.0)
}

fn freshness_component(days_since_last_review: f64) -> f64 {
    // Never-reviewed candidates are maximally fresh.
    if days_since_last_review.is_infinite() && days_since_last_review > 0.0 {
        return 1.0;
    }
    if !days_since_last_review.is_finite() {
        return 0.0;
    }

    normalize_unit(days_since_last_review.max(0.0) / FRESHNESS_WINDOW_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx_eq(actual: f64, expected: f64) {
        let tolerance = 1e-10;
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual ({actual}) != expected ({expected})"
        );
    }

    #[test]
    fn declined_candidates_score_zero() {
        let score = match_score(
            &MatchInputs {
                expertise_overlap: 1.0,
                open_assignments: 0,
                days_since_last_review: 365.0,
                declined_recently: true,
            },
            &MatchWeights::default(),
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn match_score_applies_weighted_sum() {
        let score = match_score(
            &MatchInputs {
                expertise_overlap: 0.5,
                open_assignments: 4,
                days_since_last_review: 45.0,
                declined_recently: false,
            },
            &MatchWeights::default(),
        );

        // 0.6*0.5 + 0.25*(1 - 0.5) + 0.15*0.5
        assert_approx_eq(score, 0.5);
    }

    #[test]
    fn match_score_clamps_hostile_inputs() {
        let score = match_score(
            &MatchInputs {
                expertise_overlap: f64::NAN,
                open_assignments: 100,
                days_since_last_review: -20.0,
                declined_recently: false,
            },
            &MatchWeights::default(),
        );

        // All three components bottom out at 0.
        assert_approx_eq(score, 0.0);
    }

    #[test]
    fn never_reviewed_is_maximally_fresh() {
        let idle = match_score(
            &MatchInputs {
                expertise_overlap: 0.0,
                open_assignments: 0,
                days_since_last_review: f64::INFINITY,
                declined_recently: false,
            },
            &MatchWeights::default(),
        );
        let recent = match_score(
            &MatchInputs {
                expertise_overlap: 0.0,
                open_assignments: 0,
                days_since_last_review: 5.0,
                declined_recently: false,
            },
            &MatchWeights::default(),
        );
        assert!(idle > recent);
    }

    #[test]
    fn keyword_overlap_is_case_insensitive() {
        let a = vec!["Bayesian".to_string(), " inference ".to_string()];
        let b = vec!["bayesian".to_string(), "networks".to_string()];
        // intersection = {bayesian}, union = {bayesian, inference, networks}
        assert_approx_eq(keyword_overlap(&a, &b), 1.0 / 3.0);
    }

    #[test]
    fn keyword_overlap_of_empty_sets_is_zero() {
        assert_eq!(keyword_overlap(&[], &[]), 0.0);
        assert_eq!(
            keyword_overlap(&["  ".to_string()], &[String::new()]),
            0.0
        );
    }

    #[test]
    fn identical_keyword_sets_overlap_fully() {
        let a = vec!["graphs".to_string(), "flows".to_string()];
        assert_approx_eq(keyword_overlap(&a, &a), 1.0);
    }
}
