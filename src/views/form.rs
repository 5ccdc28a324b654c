//! Per-form validation
//!
//! Each view validates its fields into a [`FormErrors`] map (field name →
//! first violated rule) before any submit proceeds.

use std::collections::BTreeMap;

/// Validation rule a field can violate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
}

/// Violated rules keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<&'static str, Rule>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `Required` when `value` is blank
    pub fn require(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.entry(field).or_insert(Rule::Required);
        }
        self
    }

    /// Record `Email` when a non-blank `value` is not an address
    pub fn email(&mut self, field: &'static str, value: &str) -> &mut Self {
        if !value.trim().is_empty() && !is_valid_email(value.trim()) {
            self.errors.entry(field).or_insert(Rule::Email);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<Rule> {
        self.errors.get(field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Rule)> + '_ {
        self.errors.iter().map(|(field, rule)| (*field, *rule))
    }
}

/// Loose address check: `local@domain` where the domain is made of
/// alphanumeric/hyphen labels separated by dots.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.is_empty() || domain.len() > 255 {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~.-".contains(c))
    {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
