//! Programmatic configuration for the [`Simplifier`](crate::Simplifier).

use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::error::ConfigurationError;
use crate::lint::knowledge::TypeName;
use crate::lint::rules::RuleCode;

lazy_static! {
    /// `Module.Type` or `Some.Module.Type`: at least one module segment.
    static ref TYPE_NAME: Regex = Regex::new(r"^[A-Z][A-Za-z0-9_]*(\.[A-Z][A-Za-z0-9_]*)+$")
        .unwrap_or_else(|e| panic!("regex: {e}"));
}

/// Which rules run and which custom types keep their `case` expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimplifyConfig {
    /// Rules to enable (if None, all rules are enabled).
    pub select: Option<FxHashSet<RuleCode>>,
    /// Rules to ignore.
    pub ignore: FxHashSet<RuleCode>,
    /// Type names as written by the user, validated by [`Self::validate`].
    pub ignore_case_of_for_types: Vec<String>,
}

impl SimplifyConfig {
    /// Builder: only run the given rules.
    pub fn with_select(mut self, rules: impl IntoIterator<Item = RuleCode>) -> Self {
        self.select = Some(rules.into_iter().collect());
        self
    }

    /// Builder: never run the given rules.
    pub fn with_ignore(mut self, rules: impl IntoIterator<Item = RuleCode>) -> Self {
        self.ignore.extend(rules);
        self
    }

    /// Builder: never collapse `case` expressions over these custom types.
    /// Each entry is a fully qualified name such as `Element.Font.Weight`.
    pub fn ignore_case_of_for_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_case_of_for_types
            .extend(types.into_iter().map(Into::into));
        self
    }

    /// Returns true when a selection was given but contains no rules.
    pub fn has_empty_selection(&self) -> bool {
        matches!(&self.select, Some(set) if set.is_empty())
    }

    /// Check if a rule is enabled.
    pub fn is_rule_enabled(&self, rule: RuleCode) -> bool {
        if self.ignore.contains(&rule) {
            return false;
        }
        match &self.select {
            Some(selected) => selected.contains(&rule),
            None => true,
        }
    }

    /// Parse the ignored type names, dropping repeated entries (the first
    /// one wins). Every malformed entry is reported at once.
    pub fn validate(&self) -> Result<Vec<TypeName>, ConfigurationError> {
        let mut seen = FxHashSet::default();
        let unique: Vec<&str> = self
            .ignore_case_of_for_types
            .iter()
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect();

        let invalid: Vec<String> = unique
            .iter()
            .filter(|name| !TYPE_NAME.is_match(name))
            .map(|name| name.to_string())
            .collect();
        if !invalid.is_empty() {
            return Err(ConfigurationError::InvalidTypeNames(invalid));
        }

        Ok(unique
            .into_iter()
            .filter_map(TypeName::from_dotted)
            .collect())
    }
}
