use serde_json::{Map, Value};
use std::cmp::Ordering;

use super::error::FilterError;
use super::types::{FilterOp, FilterWhereInfo};

pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Parse `{ field: value }` / `{ field: { "$op": value } }` into flat conditions
    pub fn parse(where_data: &Value) -> Result<Vec<FilterWhereInfo>, FilterError> {
        match where_data {
            Value::Null => Ok(vec![]),
            Value::Object(obj) => {
                let mut conditions = Vec::new();
                for (key, value) in obj {
                    if key.starts_with('$') {
                        return Err(FilterError::UnsupportedOperator(key.clone()));
                    }
                    super::filter::Filter::validate_column(key)?;
                    Self::parse_field_condition(key, value, &mut conditions)?;
                }
                Ok(conditions)
            }
            _ => Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        }
    }

    fn parse_field_condition(
        field: &str,
        value: &Value,
        conditions: &mut Vec<FilterWhereInfo>,
    ) -> Result<(), FilterError> {
        match value {
            Value::Object(obj) if obj.keys().any(|k| k.starts_with('$')) => {
                for (op_key, op_val) in obj {
                    let operator = Self::map_operator(op_key)?;
                    if operator == FilterOp::In && !op_val.is_array() {
                        return Err(FilterError::InvalidOperatorData("$in requires array".to_string()));
                    }
                    conditions.push(FilterWhereInfo { column: field.to_string(), operator, data: op_val.clone() });
                }
            }
            // Implicit equality: { field: value }
            _ => conditions.push(FilterWhereInfo { column: field.to_string(), operator: FilterOp::Eq, data: value.clone() }),
        }
        Ok(())
    }

    fn map_operator(op_key: &str) -> Result<FilterOp, FilterError> {
        Ok(match op_key {
            "$eq" => FilterOp::Eq,
            "$ne" | "$neq" => FilterOp::Ne,
            "$gt" => FilterOp::Gt,
            "$gte" => FilterOp::Gte,
            "$lt" => FilterOp::Lt,
            "$lte" => FilterOp::Lte,
            "$in" => FilterOp::In,
            other => return Err(FilterError::UnsupportedOperator(other.to_string())),
        })
    }

    /// Compile conditions into a predicate over the JSONB `doc` column
    pub fn generate(conditions: &[FilterWhereInfo], starting_param_index: usize) -> (String, Vec<Value>) {
        let mut filter_where = Self::new(starting_param_index);
        let sql_conditions: Vec<String> = conditions
            .iter()
            .map(|condition| filter_where.build_sql_condition(condition))
            .collect();
        (sql_conditions.join(" AND "), filter_where.param_values)
    }

    fn build_sql_condition(&mut self, condition: &FilterWhereInfo) -> String {
        let field = format!("\"doc\"->'{}'", condition.column);
        match condition.operator {
            FilterOp::Eq => {
                if condition.data.is_null() { format!("({0} IS NULL OR {0} = 'null'::jsonb)", field) }
                else { format!("{} = {}", field, self.param(condition.data.clone())) }
            }
            FilterOp::Ne => {
                if condition.data.is_null() { format!("({0} IS NOT NULL AND {0} <> 'null'::jsonb)", field) }
                else { format!("{} IS DISTINCT FROM {}", field, self.param(condition.data.clone())) }
            }
            FilterOp::Gt => format!("{} > {}", field, self.param(condition.data.clone())),
            FilterOp::Gte => format!("{} >= {}", field, self.param(condition.data.clone())),
            FilterOp::Lt => format!("{} < {}", field, self.param(condition.data.clone())),
            FilterOp::Lte => format!("{} <= {}", field, self.param(condition.data.clone())),
            FilterOp::In => {
                let values = condition.data.as_array().cloned().unwrap_or_default();
                if values.is_empty() { return "1=0".to_string(); }
                let params: Vec<String> = values.into_iter().map(|v| self.param(v)).collect();
                format!("{} IN ({})", field, params.join(", "))
            }
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }

    /// Evaluate conditions against an in-memory document (all must hold)
    pub fn matches(conditions: &[FilterWhereInfo], document: &Map<String, Value>) -> bool {
        conditions.iter().all(|condition| {
            let actual = document.get(&condition.column).unwrap_or(&Value::Null);
            match condition.operator {
                FilterOp::Eq => values_equal(actual, &condition.data),
                FilterOp::Ne => !values_equal(actual, &condition.data),
                FilterOp::Gt => compare_values(actual, &condition.data) == Some(Ordering::Greater),
                FilterOp::Gte => matches!(compare_values(actual, &condition.data), Some(Ordering::Greater | Ordering::Equal)),
                FilterOp::Lt => compare_values(actual, &condition.data) == Some(Ordering::Less),
                FilterOp::Lte => matches!(compare_values(actual, &condition.data), Some(Ordering::Less | Ordering::Equal)),
                FilterOp::In => condition
                    .data
                    .as_array()
                    .map(|values| values.iter().any(|v| values_equal(actual, v)))
                    .unwrap_or(false),
            }
        })
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_values(a, b) == Some(Ordering::Equal),
        _ => a == b,
    }
}

/// Ordering between two scalars of the same JSON type; `None` across types
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(i), Some(j)) => Some(i.cmp(&j)),
            _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
        },
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
