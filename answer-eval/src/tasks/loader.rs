//! Battery loading from JSON and TOML files
//!
//! Both formats use the same case shape:
//!
//! ```json
//! {"cases": [
//!   {"type": "Positive", "question": "Who is the project lead?", "behavior": "ANSWER",
//!    "match_mode": "ANY_GROUP", "acceptable": [["evelyn reed"], ["dr reed"]]},
//!   {"type": "Negative", "question": "What is the price of the stock?", "behavior": "ABSTAIN"}
//! ]}
//! ```
//!
//! `behavior` defaults to `ANSWER` and `match_mode` to `ALL`. Ids are the
//! 1-based position in the file.

use std::path::Path;

use serde::Deserialize;

use super::categories::{Category, ExpectedBehavior};
use super::{numbered, Expectation, MatchRule, TestCase, MODE_ALL, MODE_ANY_GROUP};

/// Error type for battery loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid case {index}: {message}")]
    Invalid { index: usize, message: String },

    #[error("Battery contains no cases")]
    Empty,
}

/// Top-level structure of a battery file
#[derive(Debug, Deserialize)]
struct BatteryFile {
    #[serde(default)]
    cases: Vec<CaseDefinition>,
}

/// A single case as written in a battery file
#[derive(Debug, Deserialize)]
struct CaseDefinition {
    #[serde(rename = "type")]
    category: Option<Category>,
    question: String,
    #[serde(default = "default_behavior")]
    behavior: ExpectedBehavior,
    #[serde(default)]
    match_mode: Option<String>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
    #[serde(default)]
    acceptable: Option<Vec<Vec<String>>>,
}

fn default_behavior() -> ExpectedBehavior { ExpectedBehavior::Answer }

impl CaseDefinition {
    fn into_test_case(self, index: usize) -> Result<TestCase, LoadError> {
        let invalid = |message: &str| LoadError::Invalid {
            index,
            message: message.to_string(),
        };

        let expectation = match self.behavior {
            ExpectedBehavior::Abstain => {
                if self.match_mode.is_some() || self.keywords.is_some() || self.acceptable.is_some() {
                    return Err(invalid("ABSTAIN cases must not carry match fields"));
                }
                Expectation::Abstain
            }
            ExpectedBehavior::Answer => {
                let mode = self.match_mode.unwrap_or_else(|| MODE_ALL.to_string());
                let rule = match mode.as_str() {
                    MODE_ALL => {
                        if self.acceptable.is_some() {
                            return Err(invalid("ALL cases take `keywords`, not `acceptable`"));
                        }
                        let keywords = self
                            .keywords
                            .ok_or_else(|| invalid("ALL cases require `keywords`"))?;
                        MatchRule::All { keywords }
                    }
                    MODE_ANY_GROUP => {
                        if self.keywords.is_some() {
                            return Err(invalid("ANY_GROUP cases take `acceptable`, not `keywords`"));
                        }
                        let groups = self
                            .acceptable
                            .ok_or_else(|| invalid("ANY_GROUP cases require `acceptable`"))?;
                        MatchRule::AnyGroup { groups }
                    }
                    _ => {
                        tracing::warn!(
                            "Case {} uses unknown match mode {:?}; it will be scored as a failure",
                            index,
                            mode
                        );
                        MatchRule::Unrecognized { mode }
                    }
                };
                Expectation::Answer(rule)
            }
        };

        let category = self.category.unwrap_or(match &expectation {
            Expectation::Answer(_) => Category::Positive,
            Expectation::Abstain => Category::Negative,
        });

        Ok(TestCase {
            id: index,
            category,
            question: self.question,
            expectation,
        })
    }
}

fn into_battery(file: BatteryFile) -> Result<Vec<TestCase>, LoadError> {
    if file.cases.is_empty() {
        return Err(LoadError::Empty);
    }

    let cases = file
        .cases
        .into_iter()
        .enumerate()
        .map(|(idx, def)| def.into_test_case(idx + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(numbered(cases))
}

/// Load a battery from a JSON string
pub fn load_battery_from_json_str(content: &str) -> Result<Vec<TestCase>, LoadError> {
    let file: BatteryFile = serde_json::from_str(content)
        .map_err(|e| LoadError::Parse(format!("JSON parse error: {}", e)))?;
    into_battery(file)
}

/// Load a battery from a TOML string (`[[cases]]` tables)
pub fn load_battery_from_toml_str(content: &str) -> Result<Vec<TestCase>, LoadError> {
    let file: BatteryFile = toml::from_str(content)
        .map_err(|e| LoadError::Parse(format!("TOML parse error: {}", e)))?;
    into_battery(file)
}

/// Load a battery file, choosing the parser by extension (`.toml`, otherwise JSON)
pub fn load_battery_from_file(path: impl AsRef<Path>) -> Result<Vec<TestCase>, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let cases = if path.extension().map(|e| e == "toml").unwrap_or(false) {
        load_battery_from_toml_str(&content)?
    } else {
        load_battery_from_json_str(&content)?
    };

    tracing::info!("Loaded {} cases from {}", cases.len(), path.display());
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json_basic() {
        let json = r#"{
            "cases": [
                {"type": "Positive", "question": "Who is the project lead?", "behavior": "ANSWER",
                 "match_mode": "ANY_GROUP", "acceptable": [["evelyn reed"], ["dr reed"]]},
                {"type": "Positive", "question": "What database is used?", "behavior": "ANSWER",
                 "match_mode": "ALL", "keywords": ["postgresql"]},
                {"type": "Negative", "question": "What is the price of the stock?", "behavior": "ABSTAIN"}
            ]
        }"#;

        let cases = load_battery_from_json_str(json).unwrap();
        assert_eq!(cases.len(), 3);
        assert_eq!(cases[0].id, 1);
        assert_eq!(
            cases[0].expectation,
            Expectation::Answer(MatchRule::AnyGroup {
                groups: vec![vec!["evelyn reed".to_string()], vec!["dr reed".to_string()]],
            })
        );
        assert_eq!(
            cases[1].expectation,
            Expectation::Answer(MatchRule::All { keywords: vec!["postgresql".to_string()] })
        );
        assert_eq!(cases[2].expectation, Expectation::Abstain);
        assert_eq!(cases[2].category, Category::Negative);
        assert_eq!(cases[2].id, 3);
    }

    #[test]
    fn test_load_json_defaults() {
        let json = r#"{"cases": [{"question": "What cloud provider is used?", "keywords": ["aws"]}]}"#;

        let cases = load_battery_from_json_str(json).unwrap();
        assert_eq!(cases[0].category, Category::Positive);
        assert_eq!(
            cases[0].expectation,
            Expectation::Answer(MatchRule::All { keywords: vec!["aws".to_string()] })
        );
    }

    #[test]
    fn test_load_toml() {
        let toml = r#"
[[cases]]
type = "Positive"
question = "What encryption standard is required?"
match_mode = "ALL"
keywords = ["aes", "256"]

[[cases]]
type = "Negative"
question = "What is the color of the new logo?"
behavior = "ABSTAIN"
"#;
        let cases = load_battery_from_toml_str(toml).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1].expectation, Expectation::Abstain);
    }

    #[test]
    fn test_abstain_with_match_fields_rejected() {
        let json = r#"{"cases": [
            {"question": "ok", "keywords": ["x"]},
            {"question": "bad", "behavior": "ABSTAIN", "keywords": ["x"]}
        ]}"#;
        match load_battery_from_json_str(json) {
            Err(LoadError::Invalid { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected invalid case error, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_mode_fields_rejected() {
        let json = r#"{"cases": [
            {"question": "q", "match_mode": "ALL", "keywords": ["x"], "acceptable": [["y"]]}
        ]}"#;
        assert!(matches!(
            load_battery_from_json_str(json),
            Err(LoadError::Invalid { index: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_mode_kept_as_data() {
        let json = r#"{"cases": [{"question": "q", "match_mode": "FUZZY", "keywords": ["x"]}]}"#;
        let cases = load_battery_from_json_str(json).unwrap();
        assert_eq!(
            cases[0].expectation,
            Expectation::Answer(MatchRule::Unrecognized { mode: "FUZZY".to_string() })
        );
    }

    #[test]
    fn test_empty_battery_rejected() {
        assert!(matches!(load_battery_from_json_str(r#"{"cases": []}"#), Err(LoadError::Empty)));
    }

    #[test]
    fn test_load_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("battery.toml");
        std::fs::write(
            &path,
            "[[cases]]\nquestion = \"Who is the HR manager?\"\nmatch_mode = \"ANY_GROUP\"\nacceptable = [[\"miller\"]]\n",
        )
        .unwrap();

        let cases = load_battery_from_file(&path).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].question, "Who is the HR manager?");
    }
}
