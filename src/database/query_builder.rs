use serde_json::{Map, Value};
use sqlx::{self, postgres::PgArguments, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::filter::types::SqlResult;
use crate::filter::Filter;

/// Executes a compiled `Filter` against a JSONB collection table
pub struct QueryBuilder<'a> {
    filter: &'a Filter,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(filter: &'a Filter) -> Self {
        Self { filter }
    }

    pub async fn select_all(self, pool: &PgPool) -> Result<Vec<Map<String, Value>>, DatabaseError> {
        let sql_result = self.filter.to_sql();
        tracing::debug!("select: {} {:?}", sql_result.query, sql_result.params);

        let rows = bind_params(sqlx::query(&sql_result.query), &sql_result)
            .fetch_all(pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                let doc: Value = row.try_get("doc")?;
                match doc {
                    Value::Object(map) => Ok(map),
                    other => Err(DatabaseError::QueryError(format!(
                        "expected object document in {}, got {}",
                        self.filter.collection(),
                        other
                    ))),
                }
            })
            .collect()
    }

    pub async fn delete(self, pool: &PgPool) -> Result<u64, DatabaseError> {
        let sql_result = self.filter.to_delete_sql();
        tracing::debug!("delete: {} {:?}", sql_result.query, sql_result.params);

        let result = bind_params(sqlx::query(&sql_result.query), &sql_result)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Every filter parameter is compared against a JSONB path, so it binds as JSONB
fn bind_params<'q>(
    mut q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    sql_result: &SqlResult,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    for p in sql_result.params.iter() {
        q = q.bind(p.clone());
    }
    q
}
