//! Built-in rule catalog and pattern compilation
//!
//! The catalog is built once at process start and is read-only afterwards.
//! Pattern compilation happens here, so a malformed pattern is a startup
//! failure rather than a per-call error.

use crate::rule::{Rule, RuleCategory};
use regex::Regex;
use thiserror::Error;

/// Catalog construction error
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid pattern in rule '{rule_id}': {source}")]
    BadPattern {
        rule_id: String,
        source: regex::Error,
    },
}

/// A rule paired with its compiled pattern
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Rule definition
    pub rule: Rule,

    /// Compiled search pattern
    pub regex: Regex,
}

impl CompiledRule {
    /// Test whether this rule's pattern occurs anywhere in the text
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// The ordered, immutable rule catalog
///
/// Iteration order is definition order; the engine relies on it to keep the
/// suggestion list deterministic.
#[derive(Debug, Clone)]
pub struct Catalog {
    rules: Vec<CompiledRule>,
}

impl Catalog {
    /// Compile a set of rules into a catalog
    pub fn compile(rules: Vec<Rule>) -> Result<Self, CatalogError> {
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            let regex = Regex::new(&rule.pattern).map_err(|source| CatalogError::BadPattern {
                rule_id: rule.id.clone(),
                source,
            })?;
            compiled.push(CompiledRule { rule, regex });
        }

        Ok(Self { rules: compiled })
    }

    /// Build the catalog from the built-in rule table
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::compile(builtin_rules())
    }

    /// All rules in definition order
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Number of rules in the catalog
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by id
    pub fn find(&self, rule_id: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .map(|c| &c.rule)
            .find(|r| r.id == rule_id)
    }
}

/// Get all built-in refactoring-advice rules
pub fn builtin_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "each-push-to-map",
            r"\.each\s*do\s*\|.*\|\s*.*\.push",
            "Use `map` instead of `each` + `push`",
        )
        .with_category(RuleCategory::Style)
        .with_rationale("Building an array by pushing inside each hides the transformation")
        .with_example_bad("items.each do |i| out.push(i) end")
        .with_example_good("out = items.map { |i| i }"),

        Rule::new(
            "nil-check-safe-navigation",
            r"if .*\.nil\?",
            "Use `&.` (safe navigation operator) for nil checks",
        )
        .with_category(RuleCategory::Style)
        .with_example_bad("if user.nil?")
        .with_example_good("user&.name"),

        Rule::new(
            "length-zero-empty",
            r"\.length\s*==\s*0",
            "Use `.empty?` instead of `.length == 0`",
        )
        .with_category(RuleCategory::Style)
        .with_example_bad("list.length == 0")
        .with_example_good("list.empty?"),

        Rule::new(
            "not-blank-present",
            r"!\s*.*\.blank\?",
            "Use `.present?` instead of `!blank?`",
        )
        .with_category(RuleCategory::Rails)
        .with_example_bad("! name.blank?")
        .with_example_good("name.present?"),

        Rule::new(
            "select-count-one",
            r"\.select\{.*\}\.count\s*==\s*1",
            "Use `.one?` instead of `.select.count == 1`",
        )
        .with_category(RuleCategory::Perf)
        .with_rationale("one? stops scanning as soon as a second match is found")
        .with_example_bad("users.select{|u| u.admin?}.count == 1")
        .with_example_good("users.one? { |u| u.admin? }"),

        Rule::new(
            "each-block-find-each",
            r"\.each\s*\{\s*\|",
            "Use `.find_each` instead of `.each` for large ActiveRecord queries",
        )
        .with_category(RuleCategory::Rails)
        .with_rationale("find_each loads records in batches instead of all at once")
        .with_example_bad("records.each { |r| r.touch }")
        .with_example_good("records.find_each { |r| r.touch }"),

        Rule::new(
            "time-now-current",
            r"Time\.now",
            "Use `Time.current` instead of `Time.now` for Rails apps",
        )
        .with_category(RuleCategory::Rails)
        .with_rationale("Time.now ignores the application time zone")
        .with_example_bad("Time.now")
        .with_example_good("Time.current"),

        Rule::new(
            "eval-usage",
            r"eval\s*\(",
            "Avoid `eval`, use `send` or `public_send` instead",
        )
        .with_category(RuleCategory::Security)
        .with_rationale("eval executes arbitrary strings as code")
        .with_example_bad("eval(user_input)")
        .with_example_good("public_send(method_name)"),

        Rule::new(
            "puts-logger",
            r"puts",
            "Use `Rails.logger` instead of `puts` in production code",
        )
        .with_category(RuleCategory::Rails)
        .with_example_bad("puts value")
        .with_example_good("Rails.logger.info(value)"),

        Rule::new(
            "downcase-compare-casecmp",
            r"\.downcase\s*==",
            "Use `.casecmp?` instead of `.downcase ==`",
        )
        .with_category(RuleCategory::Perf)
        .with_rationale("casecmp? compares without allocating a lowercased copy")
        .with_example_bad("name.downcase == other")
        .with_example_good("name.casecmp?(other)"),

        Rule::new(
            "select-first-detect",
            r"\.select\{.*\}\.first",
            "Use `.detect` instead of `.select.first`",
        )
        .with_category(RuleCategory::Perf)
        .with_rationale("detect stops at the first match instead of scanning everything")
        .with_example_bad("users.select{|u| u.active}.first")
        .with_example_good("users.detect { |u| u.active }"),

        Rule::new(
            "for-loop-each",
            r"for\s+\w+\s+in\s+",
            "Avoid `for` loops, use `.each` instead",
        )
        .with_category(RuleCategory::Style)
        .with_rationale("for leaks its loop variable into the enclosing scope")
        .with_example_bad("for item in list")
        .with_example_good("list.each { |item| }"),

        Rule::new(
            "nested-hash-dig",
            r"\[\s*:.*\]\s*\[\s*:.*\]",
            "Use `.dig` instead of nested hash access",
        )
        .with_category(RuleCategory::Style)
        .with_rationale("dig returns nil instead of raising on a missing intermediate key")
        .with_example_bad("config[:db][:host]")
        .with_example_good("config.dig(:db, :host)"),

        Rule::new(
            "map-attr-pluck",
            r"\.map\(&:\w+\)",
            "Use `.pluck(:attr)` instead of `.map(&:attr)` for ActiveRecord queries",
        )
        .with_category(RuleCategory::Rails)
        .with_rationale("pluck selects the column in SQL instead of instantiating models")
        .with_example_bad("users.map(&:name)")
        .with_example_good("users.pluck(:name)"),

        Rule::new(
            "each-with-index-unused",
            r"\.each_with_index\s*\{.*\|\w+,\s*\|",
            "Use `.each` instead of `.each_with_index` if index is not used",
        )
        .with_category(RuleCategory::Style)
        .with_example_bad("list.each_with_index { |item, | item.save }")
        .with_example_good("list.each { |item| item.save }"),

        Rule::new(
            "nil-and-exist",
            r"\.nil\?\s*&&\s*.*\.exist\?",
            "Use `!record.exist?` instead of `record.nil?` in ActiveRecord",
        )
        .with_category(RuleCategory::Rails)
        .with_example_bad("user.nil? && User.exist?")
        .with_example_good("!User.exist?"),

        Rule::new(
            "if-not-unless",
            r"if\s+!\s+",
            "Use `unless` instead of `if !condition`",
        )
        .with_category(RuleCategory::Style)
        .with_example_bad("if ! valid")
        .with_example_good("unless valid"),

        Rule::new(
            "select-reject-nil-compact",
            r"\.select\s*\{\s*\|.*\|\s*!.*\.nil\?\s*\}",
            "Use `.compact` instead of `.select { |x| !x.nil? }`",
        )
        .with_category(RuleCategory::Style)
        .with_example_bad("values.select { |v| !v.nil? }")
        .with_example_good("values.compact"),

        Rule::new(
            "array-flatten-wrap",
            r"\[.*\]\.flatten",
            "Use `Array.wrap(value)` instead of `[value].flatten`",
        )
        .with_category(RuleCategory::Rails)
        .with_rationale("Array.wrap handles nil and arrays without a throwaway literal")
        .with_example_bad("[value].flatten")
        .with_example_good("Array.wrap(value)"),

        Rule::new(
            "explicit-self-tap",
            r"self\.",
            "Use `.tap` instead of explicit `self` in method chaining",
        )
        .with_category(RuleCategory::Style)
        .with_example_bad("self.update(name)")
        .with_example_good("tap { |s| s.update(name) }"),
    ]
}
