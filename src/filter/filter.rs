use serde_json::{Map, Value};

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterData, FilterOrderInfo, FilterWhereInfo, SqlResult};

/// A validated query over one collection: equality/range conditions plus sort order.
///
/// The same filter compiles to SQL for the Postgres store and evaluates
/// directly for the in-memory store.
#[derive(Debug, Clone)]
pub struct Filter {
    collection: String,
    where_data: Vec<FilterWhereInfo>,
    order_data: Vec<FilterOrderInfo>,
}

impl Filter {
    pub fn new(collection: impl Into<String>) -> Result<Self, FilterError> {
        let collection = collection.into();
        Self::validate_collection_name(&collection)?;
        Ok(Self {
            collection,
            where_data: vec![],
            order_data: vec![],
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn assign(&mut self, data: FilterData) -> Result<&mut Self, FilterError> {
        if let Some(where_clause) = data.where_clause { self.where_clause(where_clause)?; }
        if let Some(order) = data.order { self.order(order)?; }
        Ok(self)
    }

    pub fn where_clause(&mut self, conditions: Value) -> Result<&mut Self, FilterError> {
        self.where_data = FilterWhere::parse(&conditions)?;
        Ok(self)
    }

    pub fn order(&mut self, order_spec: Value) -> Result<&mut Self, FilterError> {
        self.order_data = FilterOrder::validate_and_parse(&order_spec)?;
        Ok(self)
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.where_data, 0);
        let order_clause = FilterOrder::generate(&self.order_data);

        let query = [
            format!("SELECT \"doc\" FROM \"{}\"", self.collection),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            order_clause,
        ].into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ");

        SqlResult { query, params }
    }

    pub fn to_delete_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.where_data, 0);
        let query = if where_clause.is_empty() {
            format!("DELETE FROM \"{}\"", self.collection)
        } else {
            format!("DELETE FROM \"{}\" WHERE {}", self.collection, where_clause)
        };
        SqlResult { query, params }
    }

    pub fn matches(&self, document: &Map<String, Value>) -> bool {
        FilterWhere::matches(&self.where_data, document)
    }

    /// Stable sort, so documents with equal keys keep insertion order
    pub fn sort(&self, documents: &mut [Map<String, Value>]) {
        if self.order_data.is_empty() { return; }
        documents.sort_by(|a, b| FilterOrder::compare(&self.order_data, a, b));
    }

    fn validate_collection_name(name: &str) -> Result<(), FilterError> {
        if !Self::is_identifier(name) {
            return Err(FilterError::InvalidCollectionName(format!("Invalid collection name format: {:?}", name)));
        }
        Ok(())
    }

    pub(crate) fn validate_column(column: &str) -> Result<(), FilterError> {
        if !Self::is_identifier(column) {
            return Err(FilterError::InvalidColumn(format!("Invalid column name format: {:?}", column)));
        }
        Ok(())
    }

    fn is_identifier(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }
}
