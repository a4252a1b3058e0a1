use crate::body::Param;
use crate::har::NameValue;
use crate::redaction::{FieldPath, REDACTED, RedactionConfig};
use serde_json::Value;

/// A single allow/deny list entry, kept both literally and as a parsed path.
#[derive(Debug, Clone)]
pub struct FieldRule {
    literal: String,
    path: FieldPath,
}

impl FieldRule {
    fn new(literal: &str) -> Self {
        Self {
            literal: literal.to_owned(),
            path: FieldPath::parse(literal),
        }
    }

    /// Flat fields (headers, query and form params) match on the exact name only;
    /// `user[email]` is one opaque name there.
    fn matches_name(&self, name: &str) -> bool {
        name == self.literal
    }

    /// A JSON value matches when the rule names its leaf key, or is its path or
    /// one of its ancestors.
    fn matches_path(&self, path: &FieldPath) -> bool {
        path.leaf_key() == Some(self.literal.as_str()) || self.path.is_prefix_of(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep,
    Redact,
}

/// Compiled form of a [`RedactionConfig`].
#[derive(Debug, Clone, Default)]
pub enum FieldFilter {
    /// No lists configured.
    #[default]
    PassThrough,
    /// Keep only matching fields.
    Allow(Vec<FieldRule>),
    /// Redact matching fields.
    Deny(Vec<FieldRule>),
}

/// A named field whose value may be redacted.
pub trait RedactableField {
    /// Every name the field answers to (e.g. a sanitized and an original name).
    fn field_names(&self) -> Vec<&str>;

    fn value_mut(&mut self) -> &mut String;
}

impl RedactableField for NameValue {
    fn field_names(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn value_mut(&mut self) -> &mut String {
        &mut self.value
    }
}

impl RedactableField for Param {
    fn field_names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        if self.original_name() != self.name {
            names.push(self.original_name());
        }
        names
    }

    fn value_mut(&mut self) -> &mut String {
        &mut self.value
    }
}

impl FieldFilter {
    pub fn from_config(config: &RedactionConfig) -> Self {
        if !config.allow_list().is_empty() {
            Self::Allow(config.allow_list().iter().map(|s| FieldRule::new(s)).collect())
        } else if !config.deny_list().is_empty() {
            Self::Deny(config.deny_list().iter().map(|s| FieldRule::new(s)).collect())
        } else {
            Self::PassThrough
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::PassThrough)
    }

    /// Decides the fate of a flat, named field.
    pub fn decide(&self, name: &str) -> Decision {
        self.decide_any(&[name])
    }

    fn decide_any(&self, names: &[&str]) -> Decision {
        match self {
            Self::PassThrough => Decision::Keep,
            Self::Allow(rules) if names_match(rules, names) => Decision::Keep,
            Self::Allow(_) => Decision::Redact,
            Self::Deny(rules) if names_match(rules, names) => Decision::Redact,
            Self::Deny(_) => Decision::Keep,
        }
    }

    /// Redacts field values in place. Count and order of fields are untouched.
    pub fn apply<F: RedactableField>(&self, fields: &mut [F]) {
        if !self.is_active() {
            return;
        }

        for field in fields.iter_mut() {
            if self.decide_any(&field.field_names()) == Decision::Redact {
                *field.value_mut() = REDACTED.to_owned();
            }
        }
    }

    /// Owned convenience over [`FieldFilter::apply`].
    pub fn filter<F: RedactableField>(&self, mut fields: Vec<F>) -> Vec<F> {
        self.apply(&mut fields);
        fields
    }

    /// Redacts a JSON document in place, returning whether anything changed.
    ///
    /// Deny mode replaces a matched value (and everything below it). Allow mode keeps
    /// matched values whole, descends into unmatched objects and arrays, and replaces
    /// unmatched scalars. The document root is not a field and is never replaced.
    pub fn apply_json(&self, document: &mut Value) -> bool {
        if !self.is_active() {
            return false;
        }
        self.descend(document, &FieldPath::root())
    }

    fn descend(&self, value: &mut Value, path: &FieldPath) -> bool {
        let mut changed = false;
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter_mut() {
                    changed |= self.visit(child, &path.child_key(key));
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter_mut().enumerate() {
                    changed |= self.visit(child, &path.child_index(i));
                }
            }
            _ => {}
        }
        changed
    }

    fn visit(&self, value: &mut Value, path: &FieldPath) -> bool {
        match self {
            Self::PassThrough => false,
            Self::Deny(rules) if path_matches(rules, path) => redact_json(value),
            Self::Deny(_) => self.descend(value, path),
            Self::Allow(rules) if path_matches(rules, path) => false,
            Self::Allow(_) if value.is_object() || value.is_array() => self.descend(value, path),
            Self::Allow(_) => redact_json(value),
        }
    }
}

fn names_match(rules: &[FieldRule], names: &[&str]) -> bool {
    names
        .iter()
        .any(|name| rules.iter().any(|r| r.matches_name(name)))
}

fn path_matches(rules: &[FieldRule], path: &FieldPath) -> bool {
    rules.iter().any(|r| r.matches_path(path))
}

fn redact_json(value: &mut Value) -> bool {
    *value = Value::String(REDACTED.to_owned());
    true
}
