//! Detection of refusals and "not in the document" answers

use regex::RegexSet;

use super::normalize::normalize_str;

/// Phrases that signal the system could not find an answer.
///
/// Patterns are matched against normalized text, so they are written in
/// lowercase with punctuation already turned into spaces (`can t find`).
pub const STANDARD_ABSTENTION_PATTERNS: &[&str] = &[
    r"\bdo not have information\b",
    r"\bi do not have information\b",
    r"\bnot available\b",
    r"\bnot provided\b",
    r"\bnot in (the|this) (document|context)\b",
    r"\bno information\b",
    r"\bcan t find\b",
    r"\bcannot find\b",
    r"\bnot found\b",
    r"\bunknown\b",
    r"\bno mention\b",
];

/// Pattern-based abstention detector
#[derive(Debug, Clone)]
pub struct AbstentionDetector {
    patterns: RegexSet,
}

impl AbstentionDetector {
    /// Compile a detector from an ordered list of patterns
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            patterns: RegexSet::new(patterns)?,
        })
    }

    /// Detector using [`STANDARD_ABSTENTION_PATTERNS`]
    pub fn standard() -> Self {
        Self::new(STANDARD_ABSTENTION_PATTERNS)
            .expect("standard abstention patterns are valid regexes")
    }

    /// True if any pattern occurs in the normalized response
    pub fn looks_like_abstention(&self, response: &str) -> bool {
        self.patterns.is_match(&normalize_str(response))
    }

    /// Patterns that matched, in list order (for diagnostics)
    pub fn matching_patterns(&self, response: &str) -> Vec<&str> {
        let normalized = normalize_str(response);
        self.patterns
            .matches(&normalized)
            .into_iter()
            .map(|idx| self.patterns.patterns()[idx].as_str())
            .collect()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl Default for AbstentionDetector {
    fn default() -> Self {
        Self::standard()
    }
}
