//! JSON output formatter

use super::OutputFormatter;
use crate::engine::Report;
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    suggestions: Vec<JsonSuggestion<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSuggestion<'a> {
    rule_id: &'a str,
    advice: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    suggestion_count: usize,
    rules_evaluated: usize,
    duration_ms: u128,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> String {
        let suggestions: Vec<JsonSuggestion> = report
            .suggestions
            .iter()
            .map(|s| JsonSuggestion {
                rule_id: &s.rule_id,
                advice: &s.advice,
                category: s.category.map(|c| c.to_string()),
            })
            .collect();

        let output = JsonOutput {
            suggestions,
            summary: JsonSummary {
                suggestion_count: report.suggestion_count(),
                rules_evaluated: report.rules_evaluated,
                duration_ms: report.duration.as_millis(),
            },
        };

        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_default()
        } else {
            serde_json::to_string(&output).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Suggestion;
    use crate::rule::RuleCategory;
    use pretty_assertions::assert_eq;

    fn sample_report() -> Report {
        Report {
            suggestions: vec![Suggestion {
                rule_id: "eval-usage".to_string(),
                advice: "Avoid `eval`, use `send` or `public_send` instead".to_string(),
                category: Some(RuleCategory::Security),
            }],
            rules_evaluated: 20,
            ..Report::default()
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = JsonFormatter::new();
        let output = formatter.format(&sample_report());

        assert!(output.contains("\"rule_id\":\"eval-usage\""));
        assert!(output.contains("\"category\":\"security\""));
        assert!(output.contains("\"rules_evaluated\":20"));
        assert!(output.contains("\"suggestion_count\":1"));
    }

    #[test]
    fn test_json_is_valid() {
        let formatter = JsonFormatter::new();
        let output = formatter.format(&sample_report());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["suggestions"].as_array().unwrap().len(), 1);
        assert_eq!(value["summary"]["suggestion_count"], 1);
    }

    #[test]
    fn test_json_empty_report() {
        let formatter = JsonFormatter::new();
        let output = formatter.format(&Report::default());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["suggestions"].as_array().unwrap().len(), 0);
        assert_eq!(value["summary"]["suggestion_count"], 0);
    }

    #[test]
    fn test_json_pretty() {
        let formatter = JsonFormatter::new().pretty();
        let output = formatter.format(&sample_report());
        assert!(output.contains('\n'));
    }
}
