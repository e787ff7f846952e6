//! Accuracy and latency metrics

use serde::{Deserialize, Serialize};

use crate::tasks::{Category, EvaluationRecord};

/// Correct/total counter for one slice of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: usize,
    pub total: usize,
}

impl Tally {
    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.correct += 1;
        }
    }

    /// Percentage of correct cases, `None` when nothing was counted
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 / self.total as f64 * 100.0)
        }
    }
}

/// Running counters kept by the runner while a battery executes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub overall: Tally,
    pub positive: Tally,
    pub negative: Tally,
}

impl RunCounters {
    /// Count one classified case
    pub fn record(&mut self, category: Category, passed: bool) {
        self.overall.record(passed);
        match category {
            Category::Positive => self.positive.record(passed),
            Category::Negative => self.negative.record(passed),
        }
    }

    /// Recompute counters by scanning finished records
    pub fn from_records(records: &[EvaluationRecord]) -> Self {
        let mut counters = Self::default();
        for record in records {
            counters.record(record.category, record.passed());
        }
        counters
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total: usize,
    pub correct: usize,
    /// Overall pass rate in percent
    pub accuracy: f64,
    /// Query Resolution Score. Currently the same ratio as `accuracy`.
    pub query_resolution_score: f64,
    pub positive: Tally,
    pub negative: Tally,
    pub positive_accuracy: Option<f64>,
    pub negative_accuracy: Option<f64>,
}

impl SummaryStatistics {
    pub fn from_counters(counters: &RunCounters) -> Self {
        let accuracy = counters.overall.accuracy().unwrap_or(0.0);
        Self {
            total: counters.overall.total,
            correct: counters.overall.correct,
            accuracy,
            query_resolution_score: accuracy,
            positive: counters.positive,
            negative: counters.negative,
            positive_accuracy: counters.positive.accuracy(),
            negative_accuracy: counters.negative.accuracy(),
        }
    }

    pub fn from_records(records: &[EvaluationRecord]) -> Self {
        Self::from_counters(&RunCounters::from_records(records))
    }
}

/// Descriptive statistics over per-case latencies, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyStatistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl LatencyStatistics {
    /// Compute statistics, `None` for an empty sample
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = sorted.len();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sorted.iter().sum::<f64>() / count as f64,
            median,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Verdict;
    use crate::tasks::TestCase;
    use std::time::Duration;

    fn record(case: TestCase, passed: bool) -> EvaluationRecord {
        let verdict = if passed { Verdict::pass("ok") } else { Verdict::fail("no") };
        EvaluationRecord::new(&case, "r", verdict, Duration::from_secs(1))
    }

    #[test]
    fn test_tally_accuracy() {
        let mut tally = Tally::default();
        assert_eq!(tally.accuracy(), None);
        tally.record(true);
        tally.record(false);
        tally.record(true);
        tally.record(true);
        assert_eq!(tally, Tally { correct: 3, total: 4 });
        assert_eq!(tally.accuracy(), Some(75.0));
    }

    #[test]
    fn test_summary_aliases_qrs() {
        let records = vec![
            record(TestCase::expect_all("a", ["x"]), true),
            record(TestCase::expect_all("b", ["x"]), false),
            record(TestCase::expect_abstain("c"), true),
            record(TestCase::expect_abstain("d"), true),
        ];
        let summary = SummaryStatistics::from_records(&records);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.accuracy, 75.0);
        assert_eq!(summary.query_resolution_score, summary.accuracy);
        assert_eq!(summary.positive_accuracy, Some(50.0));
        assert_eq!(summary.negative_accuracy, Some(100.0));
    }

    #[test]
    fn test_category_accuracy_guarded() {
        let records = vec![record(TestCase::expect_all("a", ["x"]), true)];
        let summary = SummaryStatistics::from_records(&records);
        assert_eq!(summary.positive_accuracy, Some(100.0));
        assert_eq!(summary.negative_accuracy, None);
    }

    #[test]
    fn test_latency_empty() {
        assert_eq!(LatencyStatistics::from_samples(&[]), None);
    }

    #[test]
    fn test_latency_single_value() {
        let stats = LatencyStatistics::from_samples(&[2.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min, 2.5);
        assert_eq!(stats.max, 2.5);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn test_latency_odd_and_even() {
        let odd = LatencyStatistics::from_samples(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!((odd.min, odd.max, odd.mean, odd.median), (1.0, 3.0, 2.0, 2.0));

        let even = LatencyStatistics::from_samples(&[4.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(even.median, 2.5);
        assert_eq!(even.mean, 2.5);
    }
}
