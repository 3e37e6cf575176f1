//! Collected parameter values
//!
//! Values mirror the shape of the parameter schema: a scalar answer per
//! scalar spec and a nested map per group.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProgenError, ProgenResult};

/// A single collected value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(String),
    Group(ParamValues),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&ParamValues> {
        match self {
            Self::Scalar(_) => None,
            Self::Group(values) => Some(values),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<ParamValues> for ParamValue {
    fn from(values: ParamValues) -> Self {
        Self::Group(values)
    }
}

/// Mapping from parameter name to value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamValues(BTreeMap<String, ParamValue>);

impl ParamValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    /// Look up a value by dotted path, e.g. `author.name`
    pub fn lookup(&self, dotted: &str) -> Option<&ParamValue> {
        let mut parts = dotted.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_group()?.get(part)?;
        }
        Some(current)
    }

    /// Set a scalar by dotted path, creating intermediate groups
    ///
    /// Fails when an intermediate segment already holds a scalar.
    pub fn set_path(&mut self, dotted: &str, value: impl Into<String>) -> ProgenResult<()> {
        debug!(%dotted, "ParamValues::set_path: called");
        let segments: Vec<&str> = dotted.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ProgenError::InvalidValue(format!("'{}' is not a valid parameter path", dotted)));
        }

        let Some((last, parents)) = segments.split_last() else {
            return Err(ProgenError::InvalidValue(format!("'{}' is not a valid parameter path", dotted)));
        };
        let mut current = self;
        for (depth, segment) in parents.iter().enumerate() {
            let entry = current
                .0
                .entry(segment.to_string())
                .or_insert_with(|| ParamValue::Group(ParamValues::new()));
            current = match entry {
                ParamValue::Group(values) => values,
                ParamValue::Scalar(_) => {
                    return Err(ProgenError::InvalidValue(format!(
                        "'{}' is a scalar and cannot hold '{}'",
                        segments[..=depth].join("."),
                        dotted
                    )));
                }
            };
        }
        current.0.insert(last.to_string(), ParamValue::Scalar(value.into()));
        Ok(())
    }

    /// Merge `other` into `self`; values from `other` win, groups merge recursively
    pub fn merge(&mut self, other: ParamValues) {
        for (name, value) in other.0 {
            match (self.0.get_mut(&name), value) {
                (Some(ParamValue::Group(mine)), ParamValue::Group(theirs)) => mine.merge(theirs),
                (_, value) => {
                    self.0.insert(name, value);
                }
            }
        }
    }

    /// Parse `KEY=VALUE` assignments into a value tree
    pub fn from_assignments<S: AsRef<str>>(assignments: &[S]) -> ProgenResult<Self> {
        debug!(count = assignments.len(), "ParamValues::from_assignments: called");
        let mut values = Self::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (key, value) = assignment
                .split_once('=')
                .ok_or_else(|| ProgenError::InvalidValue(format!("expected KEY=VALUE, got '{}'", assignment)))?;
            values.set_path(key.trim(), value)?;
        }
        Ok(values)
    }

    /// Load pre-answered values from a YAML mapping
    pub fn load_yaml(path: &Path) -> ProgenResult<Self> {
        debug!(?path, "ParamValues::load_yaml: called");
        let content = std::fs::read_to_string(path).map_err(|e| ProgenError::io(path, e))?;
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let doc: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| ProgenError::InvalidValue(format!("{} is not valid YAML: {}", path.display(), e)))?;
        match from_yaml(doc)? {
            ParamValue::Group(values) => Ok(values),
            ParamValue::Scalar(_) => Err(ProgenError::InvalidValue(format!(
                "{} must contain a mapping of parameter names",
                path.display()
            ))),
        }
    }
}

/// Convert a YAML node, keeping scalars as their plain string form
fn from_yaml(value: serde_yaml::Value) -> ProgenResult<ParamValue> {
    use serde_yaml::Value;
    match value {
        Value::String(s) => Ok(ParamValue::Scalar(s)),
        Value::Number(n) => Ok(ParamValue::Scalar(n.to_string())),
        Value::Bool(b) => Ok(ParamValue::Scalar(b.to_string())),
        Value::Mapping(map) => {
            let mut values = ParamValues::new();
            for (key, value) in map {
                let key = match key {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    other => {
                        return Err(ProgenError::InvalidValue(format!(
                            "parameter names must be strings, got {:?}",
                            other
                        )));
                    }
                };
                values.insert(key, from_yaml(value)?);
            }
            Ok(ParamValue::Group(values))
        }
        Value::Tagged(tagged) => from_yaml(tagged.value),
        other => Err(ProgenError::InvalidValue(format!(
            "unsupported parameter value {:?}",
            other
        ))),
    }
}

impl FromIterator<(String, ParamValue)> for ParamValues {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_path_creates_groups() {
        let mut values = ParamValues::new();
        values.set_path("title", "Report").unwrap();
        values.set_path("author.name", "Ada").unwrap();
        values.set_path("author.email", "ada@example.com").unwrap();

        assert_eq!(values.len(), 2);
        assert_eq!(values.lookup("title").and_then(ParamValue::as_str), Some("Report"));
        assert_eq!(values.lookup("author.name").and_then(ParamValue::as_str), Some("Ada"));
        assert_eq!(values.lookup("author").and_then(ParamValue::as_group).map(|g| g.len()), Some(2));
        assert!(values.lookup("author.missing").is_none());
    }

    #[test]
    fn test_set_path_through_scalar_fails() {
        let mut values = ParamValues::new();
        values.set_path("author", "Ada").unwrap();
        assert!(matches!(
            values.set_path("author.name", "Ada"),
            Err(ProgenError::InvalidValue(_))
        ));
        assert!(values.set_path("a..b", "x").is_err());
    }

    #[test]
    fn test_from_assignments() {
        let values = ParamValues::from_assignments(&["title=A = B", "author.name=Ada"]).unwrap();
        assert_eq!(values.lookup("title").and_then(ParamValue::as_str), Some("A = B"));
        assert_eq!(values.lookup("author.name").and_then(ParamValue::as_str), Some("Ada"));

        assert!(ParamValues::from_assignments(&["no-equals-sign"]).is_err());
    }

    #[test]
    fn test_merge_prefers_other_and_recurses() {
        let mut base = ParamValues::from_assignments(&["title=Old", "author.name=Ada", "author.email=a@x"]).unwrap();
        let overlay = ParamValues::from_assignments(&["title=New", "author.name=Grace"]).unwrap();
        base.merge(overlay);

        assert_eq!(base.lookup("title").and_then(ParamValue::as_str), Some("New"));
        assert_eq!(base.lookup("author.name").and_then(ParamValue::as_str), Some("Grace"));
        assert_eq!(base.lookup("author.email").and_then(ParamValue::as_str), Some("a@x"));
    }

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("values.yml");
        std::fs::write(&path, "title: Report\nyear: 2024\nauthor:\n  name: Ada\n").unwrap();

        let values = ParamValues::load_yaml(&path).unwrap();
        assert_eq!(values.lookup("title").and_then(ParamValue::as_str), Some("Report"));
        assert_eq!(values.lookup("year").and_then(ParamValue::as_str), Some("2024"));
        assert_eq!(values.lookup("author.name").and_then(ParamValue::as_str), Some("Ada"));
    }

    #[test]
    fn test_load_yaml_rejects_non_mapping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("values.yml");
        std::fs::write(&path, "- just\n- a list\n").unwrap();
        assert!(matches!(ParamValues::load_yaml(&path), Err(ProgenError::InvalidValue(_))));
    }

    #[test]
    fn test_serializes_as_nested_map() {
        let values = ParamValues::from_assignments(&["title=Report", "author.name=Ada"]).unwrap();
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json["title"], "Report");
        assert_eq!(json["author"]["name"], "Ada");
    }
}
