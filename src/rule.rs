//! Rule definition and metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule category for grouping related rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Idiomatic and consistent style rules
    #[default]
    Style,
    /// Rules that improve runtime performance
    Perf,
    /// Rules that flag dangerous constructs
    Security,
    /// Rails-specific idioms
    Rails,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Style => write!(f, "style"),
            RuleCategory::Perf => write!(f, "perf"),
            RuleCategory::Security => write!(f, "security"),
            RuleCategory::Rails => write!(f, "rails"),
        }
    }
}

impl std::str::FromStr for RuleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "style" => Ok(RuleCategory::Style),
            "perf" | "performance" => Ok(RuleCategory::Perf),
            "security" => Ok(RuleCategory::Security),
            "rails" => Ok(RuleCategory::Rails),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// A refactoring-advice rule definition
///
/// The `pattern` is a regular expression tested for occurrence anywhere in the
/// input. Matching is existence-only: a rule contributes its advice at most
/// once per analysis, no matter how often the pattern occurs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule identifier (e.g., "length-zero-empty")
    pub id: String,

    /// Regular expression source tested against the input text
    pub pattern: String,

    /// Human-readable recommendation shown when the rule matches
    pub advice: String,

    /// Rule category (style, perf, security, rails)
    #[serde(default)]
    pub category: RuleCategory,

    /// Rationale explaining why this rule exists
    #[serde(default)]
    pub rationale: Option<String>,

    /// Example of code that triggers this rule
    #[serde(default)]
    pub example_bad: Option<String>,

    /// Example of the recommended form
    #[serde(default)]
    pub example_good: Option<String>,
}

impl Rule {
    /// Create a new rule with minimal required fields
    pub fn new(id: &str, pattern: &str, advice: &str) -> Self {
        Self {
            id: id.to_string(),
            pattern: pattern.to_string(),
            advice: advice.to_string(),
            category: RuleCategory::default(),
            rationale: None,
            example_bad: None,
            example_good: None,
        }
    }

    /// Set the rule category
    pub fn with_category(mut self, category: RuleCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the rationale
    pub fn with_rationale(mut self, rationale: &str) -> Self {
        self.rationale = Some(rationale.to_string());
        self
    }

    /// Set bad example
    pub fn with_example_bad(mut self, example: &str) -> Self {
        self.example_bad = Some(example.to_string());
        self
    }

    /// Set good example
    pub fn with_example_good(mut self, example: &str) -> Self {
        self.example_good = Some(example.to_string());
        self
    }
}
