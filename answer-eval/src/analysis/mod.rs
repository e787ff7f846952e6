//! Response analysis: normalization, abstention detection, matching and scoring

pub mod abstention;
pub mod matching;
pub mod metrics;
pub mod normalize;
pub mod scoring;

pub use abstention::{AbstentionDetector, STANDARD_ABSTENTION_PATTERNS};
pub use matching::{contains_all_terms, contains_any_group};
pub use metrics::{LatencyStatistics, RunCounters, SummaryStatistics, Tally};
pub use normalize::{normalize, normalize_str};
pub use scoring::{CaseScorer, Verdict};
