//! Core matching engine and report types

use crate::advisor::Advisor;
use crate::catalog::Catalog;
use crate::rule::RuleCategory;
use std::time::{Duration, Instant};

/// Canonical rendering of an empty report
pub const NO_SUGGESTIONS: &str = "No improvements found.";

/// Synthetic rule id carried by the external advisor's extra entry
pub const ADVISOR_RULE_ID: &str = "external-advisor";

/// One matched rule's contribution to a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Id of the rule that fired
    pub rule_id: String,

    /// The recommendation text
    pub advice: String,

    /// Category of the rule that fired (None for the advisor's entry)
    pub category: Option<RuleCategory>,
}

/// Result of one analysis run
///
/// Suggestions are in catalog order. The report lives only for the duration
/// of one call; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Matched advice, in catalog order
    pub suggestions: Vec<Suggestion>,

    /// Number of rules evaluated
    pub rules_evaluated: usize,

    /// Processing duration
    pub duration: Duration,
}

impl Report {
    /// Check if no rule matched
    pub fn is_clean(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Number of suggestions collected
    pub fn suggestion_count(&self) -> usize {
        self.suggestions.len()
    }

    /// Canonical text form: the fixed sentinel when empty, otherwise the
    /// advice strings joined one per line in match order.
    pub fn render(&self) -> String {
        if self.suggestions.is_empty() {
            return NO_SUGGESTIONS.to_string();
        }

        self.suggestions
            .iter()
            .map(|s| s.advice.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The matching engine
///
/// Holds the immutable catalog; `analyze` takes `&self`, so one engine can
/// serve concurrent callers without locking.
pub struct Engine {
    catalog: Catalog,
}

impl Engine {
    /// Create a new engine over a compiled catalog
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// The catalog this engine evaluates
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Evaluate every rule against the text and collect matched advice
    ///
    /// Total for any string input: rules are tested for occurrence anywhere
    /// in the text, in catalog order, with no early exit; a rule that matches
    /// multiple times still contributes exactly once.
    pub fn analyze(&self, text: &str) -> Report {
        let start = Instant::now();
        let mut suggestions = Vec::new();

        for compiled in self.catalog.rules() {
            if compiled.matches(text) {
                suggestions.push(Suggestion {
                    rule_id: compiled.rule.id.clone(),
                    advice: compiled.rule.advice.clone(),
                    category: Some(compiled.rule.category),
                });
            }
        }

        log::debug!(
            "evaluated {} rules, {} matched",
            self.catalog.len(),
            suggestions.len()
        );

        Report {
            suggestions,
            rules_evaluated: self.catalog.len(),
            duration: start.elapsed(),
        }
    }

    /// Core analysis plus at most one extra entry from the advisor
    ///
    /// The advisor runs after every rule has been evaluated; its entry goes
    /// to the end of the list. A failing advisor changes nothing.
    pub fn analyze_with_advisor(&self, text: &str, advisor: &dyn Advisor) -> Report {
        let mut report = self.analyze(text);

        if let Some(advice) = advisor.advise(text) {
            report.suggestions.push(Suggestion {
                rule_id: ADVISOR_RULE_ID.to_string(),
                advice,
                category: None,
            });
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn engine() -> Engine {
        Engine::new(Catalog::builtin().unwrap())
    }

    struct StaticAdvisor(Option<String>);

    impl Advisor for StaticAdvisor {
        fn advise(&self, _text: &str) -> Option<String> {
            self.0.clone()
        }
    }

    #[test]
    fn test_each_push_scenario() {
        let report = engine().analyze("items.each do |i| result.push(i) end");
        let advice: Vec<&str> = report.suggestions.iter().map(|s| s.advice.as_str()).collect();
        assert!(advice.contains(&"Use `map` instead of `each` + `push`"));
        assert!(report.render().contains("Use `map` instead of `each` + `push`"));
    }

    #[test]
    fn test_length_zero_scenario() {
        let report = engine().analyze("x.length == 0");
        assert!(report
            .render()
            .contains("Use `.empty?` instead of `.length == 0`"));
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        // for-loop text placed first; the nil-check rule still reports first
        // because the suggestion order follows the catalog, not the text.
        let report = engine().analyze("for i in list\nif x.nil?\n");
        let rendered = report.render();

        let nil_pos = rendered
            .find("Use `&.` (safe navigation operator) for nil checks")
            .unwrap();
        let for_pos = rendered
            .find("Avoid `for` loops, use `.each` instead")
            .unwrap();
        assert!(nil_pos < for_pos);
    }

    #[test]
    fn test_no_match_yields_sentinel() {
        let report = engine().analyze("hello world");
        assert!(report.is_clean());
        assert_eq!(report.render(), "No improvements found.");
    }

    #[test]
    fn test_empty_input_yields_sentinel() {
        let report = engine().analyze("");
        assert!(report.is_clean());
        assert_eq!(report.render(), NO_SUGGESTIONS);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let text = "Time.now; puts x; self.save";
        let first = engine().analyze(text);
        let second = engine().analyze(text);
        assert_eq!(first.render(), second.render());
        assert_eq!(first.suggestions, second.suggestions);
    }

    #[test]
    fn test_repeated_matches_fire_once() {
        let report = engine().analyze("Time.now + Time.now + Time.now");
        let hits = report
            .suggestions
            .iter()
            .filter(|s| s.rule_id == "time-now-current")
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_all_rules_evaluated_without_early_exit() {
        let report = engine().analyze("x");
        assert_eq!(report.rules_evaluated, engine().catalog().len());
    }

    #[test]
    fn test_each_rule_in_isolation() {
        // Every bad example is crafted to satisfy exactly one rule's pattern.
        let eng = engine();
        for compiled in eng.catalog().rules() {
            let example = compiled.rule.example_bad.as_deref().unwrap();
            let report = eng.analyze(example);

            assert_eq!(
                report.suggestion_count(),
                1,
                "example for '{}' matched {:?}",
                compiled.rule.id,
                report
                    .suggestions
                    .iter()
                    .map(|s| s.rule_id.as_str())
                    .collect::<Vec<_>>()
            );
            assert_eq!(report.suggestions[0].rule_id, compiled.rule.id);
            assert_eq!(report.render(), compiled.rule.advice);
        }
    }

    #[test]
    fn test_empty_catalog_is_tolerated() {
        let eng = Engine::new(Catalog::compile(Vec::new()).unwrap());
        let report = eng.analyze("Time.now");
        assert_eq!(report.render(), NO_SUGGESTIONS);
        assert_eq!(report.rules_evaluated, 0);
    }

    #[test]
    fn test_advisor_entry_is_appended_last() {
        let eng = engine();
        let advisor = StaticAdvisor(Some("Consider extracting a service object".to_string()));
        let report = eng.analyze_with_advisor("x.length == 0", &advisor);

        let last = report.suggestions.last().unwrap();
        assert_eq!(last.rule_id, ADVISOR_RULE_ID);
        assert_eq!(last.advice, "Consider extracting a service object");
        assert_eq!(
            report.render(),
            "Use `.empty?` instead of `.length == 0`\nConsider extracting a service object"
        );
    }

    #[test]
    fn test_advisor_entry_alone_suppresses_sentinel() {
        let eng = engine();
        let advisor = StaticAdvisor(Some("Looks fine".to_string()));
        let report = eng.analyze_with_advisor("hello world", &advisor);
        assert_eq!(report.render(), "Looks fine");
    }

    #[test]
    fn test_failing_advisor_changes_nothing() {
        let eng = engine();
        let advisor = StaticAdvisor(None);
        let with = eng.analyze_with_advisor("x.length == 0", &advisor);
        let without = eng.analyze("x.length == 0");
        assert_eq!(with.render(), without.render());
    }
}
