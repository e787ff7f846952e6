//! Case category and expected-behaviour tags

use serde::{Deserialize, Serialize};

/// Whether a case belongs to the answerable or the unanswerable half of a battery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(alias = "positive", alias = "POSITIVE")]
    Positive,
    #[serde(alias = "negative", alias = "NEGATIVE")]
    Negative,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Positive => "Positive",
            Category::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the system under test is supposed to do with a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpectedBehavior {
    /// Answer with specific content
    Answer,
    /// Decline because the document does not contain the information
    Abstain,
}

impl ExpectedBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedBehavior::Answer => "ANSWER",
            ExpectedBehavior::Abstain => "ABSTAIN",
        }
    }
}

impl std::fmt::Display for ExpectedBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
