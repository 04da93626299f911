//! Human-readable text output

use super::OutputFormatter;
use crate::engine::Report;

/// Text formatter
///
/// The body is always the report's canonical rendering; the statistics
/// footer is opt-in so the default output stays byte-stable for scripting.
#[derive(Default)]
pub struct TextFormatter {
    /// Append evaluation statistics after the report body
    pub show_stats: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the statistics footer
    pub fn with_stats(mut self) -> Self {
        self.show_stats = true;
        self
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report) -> String {
        let mut output = report.render();

        if self.show_stats {
            let count = report.suggestion_count();
            output.push_str(&format!(
                "\n\n{} {}, {} rules evaluated in {:.2}ms",
                count,
                if count == 1 { "suggestion" } else { "suggestions" },
                report.rules_evaluated,
                report.duration.as_secs_f64() * 1000.0
            ));
        }

        output
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
            suggestions: vec![
                Suggestion {
                    rule_id: "length-zero-empty".to_string(),
                    advice: "Use `.empty?` instead of `.length == 0`".to_string(),
                    category: Some(RuleCategory::Style),
                },
                Suggestion {
                    rule_id: "time-now-current".to_string(),
                    advice: "Use `Time.current` instead of `Time.now` for Rails apps".to_string(),
                    category: Some(RuleCategory::Rails),
                },
            ],
            rules_evaluated: 20,
            ..Report::default()
        }
    }

    #[test]
    fn test_default_output_is_canonical() {
        let formatter = TextFormatter::new();
        let report = sample_report();
        assert_eq!(formatter.format(&report), report.render());
    }

    #[test]
    fn test_empty_report_prints_sentinel() {
        let formatter = TextFormatter::new();
        assert_eq!(formatter.format(&Report::default()), "No improvements found.");
    }

    #[test]
    fn test_stats_footer() {
        let formatter = TextFormatter::new().with_stats();
        let output = formatter.format(&sample_report());
        assert!(output.starts_with("Use `.empty?`"));
        assert!(output.contains("2 suggestions, 20 rules evaluated"));
    }
}
