//! Configuration management for the evaluation harness
//!
//! Loads settings from a TOML file and provides runtime access.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::{AbstentionDetector, CaseScorer, STANDARD_ABSTENTION_PATTERNS};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub answerer: AnswererConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Which system-under-test adapter to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswererKind {
    /// Remote question-answering endpoint
    #[default]
    Http,
    /// Canned answers from a JSON file
    Scripted,
}

impl std::str::FromStr for AnswererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" | "remote" => Ok(AnswererKind::Http),
            "scripted" | "replay" => Ok(AnswererKind::Scripted),
            _ => Err(format!("Unknown answerer: {}", s)),
        }
    }
}

/// System-under-test settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswererConfig {
    #[serde(default)]
    pub kind: AnswererKind,
    /// URL that accepts `{"question": ...}` (http answerer)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Environment variable holding a bearer token (http answerer)
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// JSON file mapping questions to answers (scripted answerer)
    #[serde(default)]
    pub responses_file: Option<String>,
}

/// Battery selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// JSON or TOML battery file; the built-in battery is used when unset
    #[serde(default)]
    pub battery_file: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_report_file")]
    pub report_file: String,
    #[serde(default = "default_true")]
    pub generate_json: bool,
    /// Summary path; defaults to `summary.json` next to the report
    #[serde(default)]
    pub summary_file: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_file: default_report_file(),
            generate_json: true,
            summary_file: None,
        }
    }
}

/// Scoring settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Whole-word regexes matched against normalized responses
    #[serde(default = "default_abstention_patterns")]
    pub abstention_patterns: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            abstention_patterns: default_abstention_patterns(),
        }
    }
}

// Default value functions
fn default_true() -> bool { true }
fn default_report_file() -> String { "evaluation_results.csv".to_string() }
fn default_abstention_patterns() -> Vec<String> {
    STANDARD_ABSTENTION_PATTERNS.iter().map(|p| p.to_string()).collect()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from default config location or return defaults
    pub fn load_or_default() -> Self {
        let config_paths = [
            "config/eval.toml",
            "answer-eval/config/eval.toml",
        ];

        for path in &config_paths {
            if let Ok(config) = Self::from_file(path) {
                tracing::info!("Loaded configuration from {}", path);
                return config;
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    /// Load an explicit file, or fall back to [`Config::load_or_default`]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                tracing::info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::load_or_default()),
        }
    }

    /// Save configuration to a TOML file
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, content)
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Compile the configured abstention patterns
    pub fn abstention_detector(&self) -> Result<AbstentionDetector, ConfigError> {
        let detector = AbstentionDetector::new(&self.scoring.abstention_patterns)
            .map_err(|e| ConfigError::Pattern(e.to_string()))?;
        tracing::debug!("Compiled {} abstention patterns", detector.pattern_count());
        Ok(detector)
    }

    /// Build the scorer used for a whole run
    pub fn scorer(&self) -> Result<CaseScorer, ConfigError> {
        Ok(CaseScorer::new(self.abstention_detector()?))
    }

    /// Where the JSON summary goes for a given report path
    pub fn summary_path(&self, report_path: &Path) -> std::path::PathBuf {
        match &self.output.summary_file {
            Some(file) => std::path::PathBuf::from(file),
            None => report_path.with_file_name("summary.json"),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Pattern(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Pattern(e) => write!(f, "Invalid abstention pattern: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.answerer.kind, AnswererKind::Http);
        assert_eq!(config.output.report_file, "evaluation_results.csv");
        assert!(config.output.generate_json);
        assert_eq!(
            config.scoring.abstention_patterns.len(),
            STANDARD_ABSTENTION_PATTERNS.len()
        );
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[answerer]
kind = "scripted"
responses_file = "fixtures/answers.json"

[output]
report_file = "out/results.csv"
generate_json = false
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.answerer.kind, AnswererKind::Scripted);
        assert_eq!(config.answerer.responses_file.as_deref(), Some("fixtures/answers.json"));
        assert_eq!(config.output.report_file, "out/results.csv");
        assert!(!config.output.generate_json);
        // untouched sections fall back to defaults
        assert!(config.evaluation.battery_file.is_none());
        assert!(!config.scoring.abstention_patterns.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let config = Config::from_toml("[scoring]\nabstention_patterns = [\"(broken\"]\n").unwrap();
        assert!(matches!(config.scorer(), Err(ConfigError::Pattern(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval.toml");
        let mut config = Config::default();
        config.answerer.endpoint = Some("http://localhost:8000/answer".to_string());
        config.save_toml(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.answerer.endpoint, config.answerer.endpoint);
        assert_eq!(loaded.scoring.abstention_patterns, config.scoring.abstention_patterns);
    }

    #[test]
    fn test_summary_path_defaults_next_to_report() {
        let config = Config::default();
        let path = config.summary_path(Path::new("runs/evaluation_results.csv"));
        assert_eq!(path, Path::new("runs/summary.json"));
    }
}
