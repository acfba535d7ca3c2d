//! `$(name)` placeholder substitution over an immutable variable table.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::spec::SpecVariableInfo;

static REGEX_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\(([A-Za-z0-9_.]+)\)").expect("placeholder regex is valid"));

/// Resolves placeholders against a variable table fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct VariableResolver {
    l_variables: Vec<SpecVariableInfo>,
}

impl VariableResolver {
    pub fn new(l_variables: Vec<SpecVariableInfo>) -> Self {
        Self { l_variables }
    }

    /// Case-insensitive lookup; the first matching entry wins.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.l_variables
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
            .map(|v| v.value.as_str())
    }

    /// Replace every `$(name)` in one pass.
    ///
    /// Unknown names, and names bound to an empty value, keep their placeholder text.
    /// Substituted values are not scanned again.
    pub fn resolve(&self, input: &str) -> String {
        REGEX_PLACEHOLDER
            .replace_all(input, |caps: &Captures<'_>| match self.lookup(&caps[1]) {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => caps[0].to_string(),
            })
            .into_owned()
    }
}
