//! PASS/FAIL classification of a single response

use serde::{Deserialize, Serialize};

use super::abstention::AbstentionDetector;
use super::matching::{contains_all_terms, contains_any_group};
use crate::tasks::{Expectation, MatchRule, TestCase};

pub const REASON_ABSTAINED: &str = "Model abstained (False Negative)";
pub const REASON_FOUND_ALL_KEYWORDS: &str = "Found all keywords";
pub const REASON_MISSING_KEYWORDS: &str = "Missing keywords";
pub const REASON_FOUND_MATCH: &str = "Found match";
pub const REASON_NO_MATCH: &str = "No match found";
pub const REASON_UNKNOWN_MODE: &str = "Unknown mode";
pub const REASON_CORRECTLY_ABSTAINED: &str = "Correctly abstained";
pub const REASON_FAILED_TO_ABSTAIN: &str = "Failed to abstain (Hallucination Risk)";

/// Outcome of scoring one response, with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub passed: bool,
    pub reason: String,
}

impl Verdict {
    pub fn pass(reason: impl Into<String>) -> Self {
        Self {
            passed: true,
            reason: reason.into(),
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: reason.into(),
        }
    }

    fn from_check(ok: bool, pass_reason: &str, fail_reason: &str) -> Self {
        if ok {
            Self::pass(pass_reason)
        } else {
            Self::fail(fail_reason)
        }
    }
}

/// Scores responses against test case expectations
#[derive(Debug, Clone, Default)]
pub struct CaseScorer {
    detector: AbstentionDetector,
}

impl CaseScorer {
    pub fn new(detector: AbstentionDetector) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &AbstentionDetector {
        &self.detector
    }

    /// Score a response for any kind of case
    pub fn score(&self, response: &str, case: &TestCase) -> Verdict {
        match &case.expectation {
            Expectation::Answer(rule) => self.score_answer(response, rule),
            Expectation::Abstain => self.score_abstain(response),
        }
    }

    /// Score a case that expects an answer.
    ///
    /// An abstention fails the case even when the required keywords are present.
    pub fn score_answer(&self, response: &str, rule: &MatchRule) -> Verdict {
        if self.detector.looks_like_abstention(response) {
            tracing::debug!(
                "Abstention on answerable case, matched {:?}",
                self.detector.matching_patterns(response)
            );
            return Verdict::fail(REASON_ABSTAINED);
        }

        match rule {
            MatchRule::All { keywords } => Verdict::from_check(
                contains_all_terms(response, keywords),
                REASON_FOUND_ALL_KEYWORDS,
                REASON_MISSING_KEYWORDS,
            ),
            MatchRule::AnyGroup { groups } => Verdict::from_check(
                contains_any_group(response, groups),
                REASON_FOUND_MATCH,
                REASON_NO_MATCH,
            ),
            MatchRule::Unrecognized { .. } => {
                tracing::debug!("No matcher for mode {}", rule.mode_name());
                Verdict::fail(REASON_UNKNOWN_MODE)
            }
        }
    }

    /// Score a case that expects the system to decline
    pub fn score_abstain(&self, response: &str) -> Verdict {
        Verdict::from_check(
            self.detector.looks_like_abstention(response),
            REASON_CORRECTLY_ABSTAINED,
            REASON_FAILED_TO_ABSTAIN,
        )
    }
}
