//! Sequential evaluation runner

use std::sync::Arc;
use std::time::Instant;

use crate::analysis::{CaseScorer, RunCounters, SummaryStatistics};
use crate::providers::Answerer;
use crate::tasks::{EvaluationRecord, TestCase};

/// Records and counters produced by one pass over a battery
#[derive(Debug, Clone, Default)]
pub struct EvaluationRun {
    /// One record per case, in battery order
    pub records: Vec<EvaluationRecord>,
    /// Counters accumulated while the run progressed
    pub counters: RunCounters,
}

impl EvaluationRun {
    pub fn summary(&self) -> SummaryStatistics {
        SummaryStatistics::from_counters(&self.counters)
    }
}

/// Runs a battery against an answerer, one question at a time.
///
/// Each call is awaited before the next starts so the measured time is the
/// answerer's own latency. There is no timeout: a call that never completes
/// stalls the run.
pub struct EvaluationRunner {
    answerer: Arc<dyn Answerer>,
    scorer: CaseScorer,
}

impl EvaluationRunner {
    pub fn new(answerer: Arc<dyn Answerer>, scorer: CaseScorer) -> Self {
        Self { answerer, scorer }
    }

    pub fn answerer_name(&self) -> &str {
        self.answerer.name()
    }

    /// Evaluate every case in order. Record ids are 1-based positions in `cases`.
    pub async fn run(&self, cases: &[TestCase], progress: &dyn ProgressCallback) -> EvaluationRun {
        let total = cases.len();
        let mut run = EvaluationRun {
            records: Vec::with_capacity(total),
            counters: RunCounters::default(),
        };

        progress.on_run_start(total);

        for (idx, case) in cases.iter().enumerate() {
            let position = idx + 1;
            progress.on_case_start(position, total, case);

            // Report ids follow battery order, whatever id the case carries
            let mut record = self.run_case(case).await;
            record.test_case_id = position;
            run.counters.record(record.category, record.passed());
            progress.on_case_complete(&record);
            run.records.push(record);
        }

        run
    }

    /// Ask, time and score a single case
    pub async fn run_case(&self, case: &TestCase) -> EvaluationRecord {
        let start = Instant::now();
        let outcome = self.answerer.answer(&case.question).await;
        let elapsed = start.elapsed();

        let response = match outcome {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(
                    "Error on {} for case {}: {}",
                    self.answerer.name(),
                    case.id,
                    e
                );
                format!("Error occurred during query: {}", e)
            }
        };

        let verdict = self.scorer.score(&response, case);
        EvaluationRecord::new(case, &response, verdict, elapsed)
    }
}

/// Progress callback for tracking execution
pub trait ProgressCallback: Send + Sync {
    fn on_run_start(&self, total: usize);
    fn on_case_start(&self, position: usize, total: usize, case: &TestCase);
    fn on_case_complete(&self, record: &EvaluationRecord);
}

/// Default no-op progress callback
pub struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_run_start(&self, _total: usize) {}
    fn on_case_start(&self, _position: usize, _total: usize, _case: &TestCase) {}
    fn on_case_complete(&self, _record: &EvaluationRecord) {}
}

/// Console progress callback
pub struct ConsoleProgress;

impl ProgressCallback for ConsoleProgress {
    fn on_run_start(&self, total: usize) {
        println!("\nRunning {} test cases...\n", total);
    }

    fn on_case_start(&self, position: usize, total: usize, case: &TestCase) {
        println!("[{}/{}] ({}) Q: {}", position, total, case.category, case.question);
    }

    fn on_case_complete(&self, record: &EvaluationRecord) {
        let status = if record.passed() { "✅ PASS" } else { "❌ FAIL" };
        println!("  -> {}: {} | {}", status, record.reason, record.formatted_time());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{AnswerError, AnswerResult, ScriptedAnswerer};
    use crate::tasks::{numbered, CaseResult, Category};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FailingAnswerer;

    #[async_trait]
    impl Answerer for FailingAnswerer {
        fn name(&self) -> &str {
            "failing"
        }

        async fn answer(&self, _question: &str) -> AnswerResult<String> {
            Err(AnswerError::Api {
                status: 500,
                message: "index offline".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ProgressCallback for RecordingProgress {
        fn on_run_start(&self, total: usize) {
            self.events.lock().unwrap().push(format!("start {}", total));
        }

        fn on_case_start(&self, position: usize, total: usize, _case: &TestCase) {
            self.events.lock().unwrap().push(format!("case {}/{}", position, total));
        }

        fn on_case_complete(&self, record: &EvaluationRecord) {
            self.events.lock().unwrap().push(format!("done {} {}", record.test_case_id, record.result));
        }
    }

    fn battery() -> Vec<TestCase> {
        numbered(vec![
            TestCase::expect_all("What database is used?", ["postgresql"]),
            TestCase::expect_any_group("Who is the project lead?", vec![vec!["evelyn reed"], vec!["dr reed"]]),
            TestCase::expect_abstain("What is the lunch menu for Friday?"),
        ])
    }

    fn scripted() -> Arc<dyn Answerer> {
        Arc::new(
            ScriptedAnswerer::new()
                .with_answer("What database is used?", "The backend uses PostgreSQL for storage.")
                .with_answer("Who is the project lead?", "  I cannot find who leads it.  ")
                .with_answer("What is the lunch menu for Friday?", "Unknown — not mentioned in the document."),
        )
    }

    #[tokio::test]
    async fn test_run_preserves_order_and_scores() {
        let runner = EvaluationRunner::new(scripted(), CaseScorer::default());
        let run = runner.run(&battery(), &NoOpProgress).await;

        let ids: Vec<usize> = run.records.iter().map(|r| r.test_case_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        assert_eq!(run.records[0].result, CaseResult::Pass);
        assert_eq!(run.records[0].reason, "Found all keywords");
        assert_eq!(run.records[1].result, CaseResult::Fail);
        assert_eq!(run.records[1].reason, "Model abstained (False Negative)");
        assert_eq!(run.records[1].raw_response, "I cannot find who leads it.");
        assert_eq!(run.records[2].result, CaseResult::Pass);
        assert_eq!(run.records[2].category, Category::Negative);

        for record in &run.records {
            assert!(record.elapsed_seconds >= 0.0);
        }
    }

    #[tokio::test]
    async fn test_incremental_counters_match_recomputed() {
        let runner = EvaluationRunner::new(scripted(), CaseScorer::default());
        let run = runner.run(&battery(), &NoOpProgress).await;

        assert_eq!(run.counters, RunCounters::from_records(&run.records));
        assert_eq!(run.counters.overall.correct, 2);
        assert_eq!(run.counters.overall.total, 3);
        assert_eq!(run.counters.positive.correct, 1);
        assert_eq!(run.counters.negative.correct, 1);

        let summary = run.summary();
        assert_eq!(summary, SummaryStatistics::from_records(&run.records));
        assert_eq!(summary.query_resolution_score, summary.accuracy);
    }

    #[tokio::test]
    async fn test_answer_failures_become_records() {
        let runner = EvaluationRunner::new(Arc::new(FailingAnswerer), CaseScorer::default());
        let run = runner.run(&battery(), &NoOpProgress).await;

        assert_eq!(run.records.len(), 3);
        for record in &run.records {
            assert!(record.raw_response.starts_with("Error occurred during query:"));
            assert!(record.raw_response.contains("index offline"));
            assert_eq!(record.result, CaseResult::Fail);
        }
        assert_eq!(run.records[0].reason, "Missing keywords");
        assert_eq!(run.records[1].reason, "No match found");
        assert_eq!(run.records[2].reason, "Failed to abstain (Hallucination Risk)");
    }

    #[tokio::test]
    async fn test_unscripted_question_is_recorded_not_raised() {
        let answerer: Arc<dyn Answerer> = Arc::new(ScriptedAnswerer::new());
        let runner = EvaluationRunner::new(answerer, CaseScorer::default());
        let case = TestCase::expect_all("What cloud provider is used?", ["aws"]).with_id(1);

        let record = runner.run_case(&case).await;
        assert_eq!(record.result, CaseResult::Fail);
        assert!(record.raw_response.contains("No scripted answer"));
    }

    #[tokio::test]
    async fn test_record_ids_follow_position() {
        let answerer: Arc<dyn Answerer> = Arc::new(
            ScriptedAnswerer::new()
                .with_answer("a", "Not available.")
                .with_answer("b", "Unknown."),
        );
        let runner = EvaluationRunner::new(answerer, CaseScorer::default());

        let unnumbered = vec![TestCase::expect_abstain("a"), TestCase::expect_abstain("b")];
        let run = runner.run(&unnumbered, &NoOpProgress).await;
        let ids: Vec<usize> = run.records.iter().map(|r| r.test_case_id).collect();
        assert_eq!(ids, vec![1, 2]);

        let stale = vec![
            TestCase::expect_abstain("b").with_id(7),
            TestCase::expect_abstain("a").with_id(3),
        ];
        let run = runner.run(&stale, &NoOpProgress).await;
        let ids: Vec<usize> = run.records.iter().map(|r| r.test_case_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(run.records[0].question, "b");
    }

    #[tokio::test]
    async fn test_progress_events() {
        let runner = EvaluationRunner::new(scripted(), CaseScorer::default());
        let progress = RecordingProgress::default();
        runner.run(&battery(), &progress).await;

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "start 3",
                "case 1/3",
                "done 1 PASS",
                "case 2/3",
                "done 2 FAIL",
                "case 3/3",
                "done 3 PASS",
            ]
        );
    }
}
