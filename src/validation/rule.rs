use serde_json::{Number, Value};

use super::error::ValidationError;
use super::schema::Schema;

/// One field rule. Each variant knows its own failure message.
#[derive(Debug, Clone)]
pub enum Rule {
    /// A string with at least one character
    NonEmptyString,
    /// Any string, including the empty one
    String,
    /// An integer or floating point number
    Number,
    /// An integer number; floats are rejected even when whole
    Int,
    /// Anything that converts to an integer: numbers (truncated) and numeric strings
    IntCoercible,
    /// Exactly one of a closed set of string literals
    OneOf(&'static [&'static str]),
    /// Skipped when the key is absent, otherwise the inner rule applies
    Optional(Box<Rule>),
    /// A list whose elements are each validated against a nested schema
    ListOf(Box<Schema>),
}

impl Rule {
    pub fn optional(inner: Rule) -> Self {
        Rule::Optional(Box::new(inner))
    }

    pub fn list_of(schema: Schema) -> Self {
        Rule::ListOf(Box::new(schema))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Rule::Optional(_))
    }

    /// Validate a present value and return its normalized form
    pub fn evaluate(&self, field: &str, value: &Value) -> Result<Value, ValidationError> {
        match self {
            Rule::NonEmptyString => match value {
                Value::String(s) if !s.is_empty() => Ok(value.clone()),
                _ => Err(ValidationError::field(format!("{} should be non-empty string", field))),
            },
            Rule::String => match value {
                Value::String(_) => Ok(value.clone()),
                _ => Err(ValidationError::field(format!("{} should be string", field))),
            },
            Rule::Number => match value {
                Value::Number(_) => Ok(value.clone()),
                _ => Err(ValidationError::field(format!("{} should be either int or float", field))),
            },
            Rule::Int => match value {
                // u64 values beyond i64 are not storable integers
                Value::Number(n) if n.is_i64() => Ok(value.clone()),
                _ => Err(ValidationError::field(format!("{} should be int", field))),
            },
            Rule::IntCoercible => coerce_int(value)
                .map(|i| Value::Number(Number::from(i)))
                .ok_or_else(|| ValidationError::field(format!("{} should be integer", field))),
            Rule::OneOf(choices) => match value {
                Value::String(s) if choices.contains(&s.as_str()) => Ok(value.clone()),
                _ => Err(ValidationError::field(format!(
                    "possible {} values are: {}",
                    field,
                    choices.join(", ")
                ))),
            },
            Rule::Optional(inner) => inner.evaluate(field, value),
            Rule::ListOf(schema) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| ValidationError::field(format!("{} should be a list", field)))?;

                let mut normalized = Vec::with_capacity(items.len());
                for item in items {
                    if !item.is_object() {
                        return Err(ValidationError::field(format!(
                            "{} should be a list of objects",
                            field
                        )));
                    }
                    normalized.push(Value::Object(schema.validate(item)?));
                }
                Ok(Value::Array(normalized))
            }
        }
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if n.is_u64() {
                None
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COLORS: &[&str] = &["red", "green"];

    #[test]
    fn non_empty_string_rejects_empty_and_non_strings() {
        assert!(Rule::NonEmptyString.evaluate("name", &json!("x")).is_ok());
        for bad in [json!(""), json!(1), json!(null), json!(["a"])] {
            let err = Rule::NonEmptyString.evaluate("name", &bad).unwrap_err();
            assert_eq!(err.message(), "name should be non-empty string");
        }
    }

    #[test]
    fn number_accepts_ints_and_floats_only() {
        assert_eq!(Rule::Number.evaluate("lat", &json!(10)).unwrap(), json!(10));
        assert_eq!(Rule::Number.evaluate("lat", &json!(10.5)).unwrap(), json!(10.5));
        let err = Rule::Number.evaluate("lat", &json!("0.0")).unwrap_err();
        assert_eq!(err.message(), "lat should be either int or float");
        assert!(Rule::Number.evaluate("lat", &json!(true)).is_err());
    }

    #[test]
    fn strict_int_rejects_floats_and_out_of_range_values() {
        assert!(Rule::Int.evaluate("radius", &json!(3000)).is_ok());
        let err = Rule::Int.evaluate("radius", &json!(3000.5)).unwrap_err();
        assert_eq!(err.message(), "radius should be int");
        assert!(Rule::Int.evaluate("radius", &json!("3000")).is_err());

        let err = Rule::Int.evaluate("radius", &json!(u64::MAX)).unwrap_err();
        assert_eq!(err.message(), "radius should be int");
        assert!(Rule::Int.evaluate("radius", &json!(i64::MAX)).is_ok());
    }

    #[test]
    fn int_coercible_converts_strings_and_floats() {
        let rule = Rule::IntCoercible;
        assert_eq!(rule.evaluate("ts", &json!(100000)).unwrap(), json!(100000));
        assert_eq!(rule.evaluate("ts", &json!("100000")).unwrap(), json!(100000));
        assert_eq!(rule.evaluate("ts", &json!(" 42 ")).unwrap(), json!(42));
        assert_eq!(rule.evaluate("ts", &json!(12.9)).unwrap(), json!(12));

        for bad in [json!("abc"), json!("1.5"), json!(null), json!(false), json!({})] {
            let err = rule.evaluate("ts", &bad).unwrap_err();
            assert_eq!(err.message(), "ts should be integer");
        }
    }

    #[test]
    fn one_of_requires_exact_match() {
        let rule = Rule::OneOf(COLORS);
        assert!(rule.evaluate("color", &json!("red")).is_ok());
        for bad in [json!("reddish"), json!("ed"), json!("RED"), json!(1)] {
            let err = rule.evaluate("color", &bad).unwrap_err();
            assert_eq!(err.message(), "possible color values are: red, green");
        }
    }

    #[test]
    fn list_of_rejects_non_lists_and_non_objects() {
        let rule = Rule::list_of(Schema::new().field("a", Rule::Number));

        let err = rule.evaluate("data", &json!({"a": 1})).unwrap_err();
        assert_eq!(err.message(), "data should be a list");

        let err = rule.evaluate("data", &json!([1, 2])).unwrap_err();
        assert_eq!(err.message(), "data should be a list of objects");

        let err = rule.evaluate("data", &json!([{"a": 1}, {"a": "x"}])).unwrap_err();
        assert_eq!(err.message(), "a should be either int or float");

        assert_eq!(rule.evaluate("data", &json!([])).unwrap(), json!([]));
    }
}
