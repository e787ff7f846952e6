//! Test case definitions, evaluation records and battery loading

pub mod battery;
pub mod categories;
pub mod loader;

pub use battery::standard_battery;
pub use categories::{Category, ExpectedBehavior};
pub use loader::{
    load_battery_from_file, load_battery_from_json_str, load_battery_from_toml_str, LoadError,
};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::Verdict;

pub const MODE_ALL: &str = "ALL";
pub const MODE_ANY_GROUP: &str = "ANY_GROUP";

/// How a response to an answerable question is checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    /// Every keyword must appear in the response
    All { keywords: Vec<String> },
    /// At least one group must appear in full
    AnyGroup { groups: Vec<Vec<String>> },
    /// A mode name this harness does not recognise. Scored as a failure.
    Unrecognized { mode: String },
}

impl MatchRule {
    pub fn mode_name(&self) -> &str {
        match self {
            MatchRule::All { .. } => MODE_ALL,
            MatchRule::AnyGroup { .. } => MODE_ANY_GROUP,
            MatchRule::Unrecognized { mode } => mode,
        }
    }
}

/// Expected outcome of a case, including how positive answers are matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Answer(MatchRule),
    Abstain,
}

impl Expectation {
    pub fn behavior(&self) -> ExpectedBehavior {
        match self {
            Expectation::Answer(_) => ExpectedBehavior::Answer,
            Expectation::Abstain => ExpectedBehavior::Abstain,
        }
    }
}

/// One evaluation scenario of a battery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// 1-based position in the battery
    pub id: usize,
    pub category: Category,
    /// Sent verbatim to the system under test
    pub question: String,
    pub expectation: Expectation,
}

impl TestCase {
    /// An answerable case that requires every keyword
    pub fn expect_all<S: Into<String>>(
        question: impl Into<String>,
        keywords: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::expect_answer(
            question,
            MatchRule::All {
                keywords: keywords.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// An answerable case satisfied by any one of several term groups
    pub fn expect_any_group<S: Into<String>>(
        question: impl Into<String>,
        groups: impl IntoIterator<Item = Vec<S>>,
    ) -> Self {
        Self::expect_answer(
            question,
            MatchRule::AnyGroup {
                groups: groups
                    .into_iter()
                    .map(|g| g.into_iter().map(Into::into).collect())
                    .collect(),
            },
        )
    }

    /// An answerable case with an explicit match rule
    pub fn expect_answer(question: impl Into<String>, rule: MatchRule) -> Self {
        Self {
            id: 0,
            category: Category::Positive,
            question: question.into(),
            expectation: Expectation::Answer(rule),
        }
    }

    /// A case the system under test must decline to answer
    pub fn expect_abstain(question: impl Into<String>) -> Self {
        Self {
            id: 0,
            category: Category::Negative,
            question: question.into(),
            expectation: Expectation::Abstain,
        }
    }

    pub fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    pub fn behavior(&self) -> ExpectedBehavior {
        self.expectation.behavior()
    }
}

/// Assign 1-based ids in iteration order
pub fn numbered(cases: impl IntoIterator<Item = TestCase>) -> Vec<TestCase> {
    cases
        .into_iter()
        .enumerate()
        .map(|(idx, case)| case.with_id(idx + 1))
        .collect()
}

/// PASS/FAIL outcome of one case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseResult {
    Pass,
    Fail,
}

impl CaseResult {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            CaseResult::Pass
        } else {
            CaseResult::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseResult::Pass => "PASS",
            CaseResult::Fail => "FAIL",
        }
    }

    pub fn is_pass(&self) -> bool {
        *self == CaseResult::Pass
    }
}

impl std::fmt::Display for CaseResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running one test case against the system under test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub test_case_id: usize,
    pub category: Category,
    pub question: String,
    pub expected: ExpectedBehavior,
    /// Response text with surrounding whitespace removed
    pub raw_response: String,
    pub result: CaseResult,
    pub reason: String,
    pub elapsed_seconds: f64,
}

impl EvaluationRecord {
    pub fn new(case: &TestCase, response: &str, verdict: Verdict, elapsed: Duration) -> Self {
        Self {
            test_case_id: case.id,
            category: case.category,
            question: case.question.clone(),
            expected: case.behavior(),
            raw_response: response.trim().to_string(),
            result: CaseResult::from_passed(verdict.passed),
            reason: verdict.reason,
            elapsed_seconds: elapsed.as_secs_f64(),
        }
    }

    pub fn passed(&self) -> bool {
        self.result.is_pass()
    }

    /// Elapsed time as written to the report, e.g. `2.50s`
    pub fn formatted_time(&self) -> String {
        format!("{:.2}s", self.elapsed_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_pick_natural_category() {
        let pos = TestCase::expect_all("What database is used?", ["postgresql"]);
        assert_eq!(pos.category, Category::Positive);
        assert_eq!(pos.behavior(), ExpectedBehavior::Answer);

        let neg = TestCase::expect_abstain("What is the lunch menu for Friday?");
        assert_eq!(neg.category, Category::Negative);
        assert_eq!(neg.behavior(), ExpectedBehavior::Abstain);
    }

    #[test]
    fn test_numbered_assigns_positions() {
        let cases = numbered(vec![
            TestCase::expect_abstain("a"),
            TestCase::expect_abstain("b"),
            TestCase::expect_abstain("c"),
        ]);
        let ids: Vec<usize> = cases.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_record_trims_response_and_formats_time() {
        let case = TestCase::expect_abstain("q").with_id(4);
        let verdict = Verdict::pass("Correctly abstained");
        let record = EvaluationRecord::new(
            &case,
            "  Unknown.\n",
            verdict,
            Duration::from_millis(2_504),
        );
        assert_eq!(record.test_case_id, 4);
        assert_eq!(record.raw_response, "Unknown.");
        assert_eq!(record.result, CaseResult::Pass);
        assert_eq!(record.formatted_time(), "2.50s");
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(MatchRule::All { keywords: vec![] }.mode_name(), "ALL");
        assert_eq!(MatchRule::AnyGroup { groups: vec![] }.mode_name(), "ANY_GROUP");
        let odd = MatchRule::Unrecognized { mode: "FUZZY".to_string() };
        assert_eq!(odd.mode_name(), "FUZZY");
    }
}
