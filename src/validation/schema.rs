use serde_json::{Map, Value};

use super::error::ValidationError;
use super::rule::Rule;

/// Declarative description of an input document: field name -> rule.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, Rule)>,
}

impl Schema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.fields.push((name.into(), rule));
        self
    }

    pub fn optional(self, name: impl Into<String>, rule: Rule) -> Self {
        self.field(name, Rule::optional(rule))
    }

    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, rule)| !rule.is_optional())
            .map(|(name, _)| name.as_str())
    }

    /// Validate `input` and return the normalized projection onto the schema's keys.
    ///
    /// Presence of every required key is checked before any value is looked at,
    /// so a document missing keys always reports the full sorted list first.
    /// Keys the schema does not name are dropped.
    pub fn validate(&self, input: &Value) -> Result<Map<String, Value>, ValidationError> {
        let document = input.as_object().ok_or(ValidationError::NotAnObject)?;

        let missing: Vec<&str> = self
            .required_keys()
            .filter(|key| !document.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::missing_keys(missing));
        }

        let mut normalized = Map::new();
        for (name, rule) in &self.fields {
            if let Some(value) = document.get(name) {
                normalized.insert(name.clone(), rule.evaluate(name, value)?);
            }
        }
        Ok(normalized)
    }
}
