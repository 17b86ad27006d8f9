use thiserror::Error;

/// A single, client-facing validation failure. The engine stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing keys: {}", quote_keys(.0))]
    MissingKeys(Vec<String>),

    #[error("{0}")]
    Field(String),

    #[error("payload should be a json object")]
    NotAnObject,
}

impl ValidationError {
    /// Missing keys are always reported in alphabetical order
    pub fn missing_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        keys.sort();
        ValidationError::MissingKeys(keys)
    }

    pub fn field(message: impl Into<String>) -> Self {
        ValidationError::Field(message.into())
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn quote_keys(keys: &[String]) -> String {
    keys.iter()
        .map(|k| format!("'{}'", k))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_are_sorted_and_quoted() {
        let err = ValidationError::missing_keys(["lon", "data_type", "lat"]);
        assert_eq!(err.message(), "Missing keys: 'data_type', 'lat', 'lon'");
    }

    #[test]
    fn field_error_renders_message_verbatim() {
        let err = ValidationError::field("lat should be either int or float");
        assert_eq!(err.to_string(), "lat should be either int or float");
    }
}
