use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

use crate::builders::rules::{Rule, RuleCatalog};

/// How serious a catalog issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The catalog cannot be used.
    Error,
    /// Suspicious but usable.
    Warning,
    /// Informational only.
    Note,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        };
        write!(f, "{label}: {}", self.message)
    }
}

/// The `CatalogValidator` trait defines the checks run on a rule catalog
/// loaded from disk before any sweep starts.
pub trait CatalogValidator {
    /// Checks the catalog as a whole and every rule in it.
    ///
    /// # Arguments
    /// * `catalog`: The catalog as loaded from disk.
    ///
    /// # Returns
    /// Every issue found, in rule order. An empty vector means the catalog is
    /// clean; only `Severity::Error` issues reject it.
    fn validate_catalog(&self, catalog: &RuleCatalog) -> Vec<Issue>;

    /// Checks a single rule.
    ///
    /// # Arguments
    /// * `position`: 1-based index of the rule in the catalog, only used in messages.
    /// * `rule`: The rule to check.
    ///
    /// # Returns
    /// The issues found for this rule alone.
    fn validate_rule(&self, position: usize, rule: &Rule) -> Vec<Issue>;
}

/// Default validator.
///
/// Empty identifiers and catalogs with nothing enabled are errors. Codes that
/// don't look like pycodestyle codes are warnings. Repeated codes are legal
/// and only reported as notes.
pub struct StandardValidator {
    code_shape: Regex,
}

impl StandardValidator {
    pub fn new() -> Result<Self> {
        let code_shape = Regex::new(r"^[EWC]\d+$").context("Failed to compile rule code pattern")?;
        Ok(Self { code_shape })
    }

    fn check_duplicates(&self, catalog: &RuleCatalog) -> Vec<Issue> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for rule in &catalog.rules {
            *seen.entry(rule.identifier.as_str()).or_default() += 1;
        }

        let mut repeated: Vec<(&str, usize)> = seen
            .into_iter()
            .filter(|(identifier, count)| *count > 1 && !identifier.is_empty())
            .collect();
        repeated.sort();

        repeated
            .into_iter()
            .map(|(identifier, count)| {
                Issue::new(
                    Severity::Note,
                    format!("{identifier} appears {count} times and will be swept {count} times"),
                )
            })
            .collect()
    }
}

impl CatalogValidator for StandardValidator {
    fn validate_catalog(&self, catalog: &RuleCatalog) -> Vec<Issue> {
        let mut issues = Vec::new();

        if catalog.enabled_count() == 0 {
            issues.push(Issue::new(Severity::Error, "catalog has no enabled rules"));
        }

        for (index, rule) in catalog.rules.iter().enumerate() {
            issues.extend(self.validate_rule(index + 1, rule));
        }

        issues.extend(self.check_duplicates(catalog));
        issues
    }

    fn validate_rule(&self, position: usize, rule: &Rule) -> Vec<Issue> {
        let mut issues = Vec::new();
        let identifier = rule.identifier.trim();

        if identifier.is_empty() {
            issues.push(Issue::new(
                Severity::Error,
                format!("rule #{position} has an empty identifier"),
            ));
            return issues;
        }

        if !self.code_shape.is_match(identifier) {
            issues.push(Issue::new(
                Severity::Warning,
                format!("rule #{position} ({identifier}) does not look like a pycodestyle code"),
            ));
        }

        if rule.description.trim().is_empty() {
            issues.push(Issue::new(
                Severity::Warning,
                format!("rule #{position} ({identifier}) has no description"),
            ));
        }

        issues
    }
}
