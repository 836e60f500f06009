use serde_json::{Number, Value};
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, PgPool, Postgres,
};

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config;
use crate::database::manager::DatabaseError;

/// A statement whose positional parameters come from compiled JSON values.
///
/// Values are bound in order, so `params[i]` always lands on `$i+1`.
pub struct QueryBuilder<T> {
    sql: String,
    params: Vec<Value>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: vec![],
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn bind(mut self, param: impl Into<Value>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn bind_all(mut self, params: impl IntoIterator<Item = Value>) -> Self {
        self.params.extend(params);
        self
    }

    pub async fn fetch_all(self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        Ok(self.query().fetch_all(pool).await?)
    }

    pub async fn fetch_optional(self, pool: &PgPool) -> Result<Option<T>, DatabaseError> {
        Ok(self.query().fetch_optional(pool).await?)
    }

    fn query(&self) -> QueryAs<'_, Postgres, T, PgArguments> {
        self.log();
        self.params
            .iter()
            .fold(sqlx::query_as::<_, T>(&self.sql), bind_value)
    }

    fn log(&self) {
        if config::config().database.enable_query_logging {
            tracing::debug!(sql = %self.sql.trim(), params = ?self.params, "executing query");
        }
    }
}

fn bind_value<'q, O>(
    q: QueryAs<'q, Postgres, O, PgArguments>,
    v: &'q Value,
) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        Value::Null => q.bind(None::<String>),
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => q.bind(i),
            // Numbers keep their source text, so fractions bind exactly as NUMERIC
            None => match exact_decimal(n) {
                Some(d) => q.bind(d),
                None => q.bind(n.as_f64()),
            },
        },
        Value::String(s) => q.bind(s.as_str()),
        // Still bound (as JSON) so later placeholders keep their positions
        Value::Array(_) | Value::Object(_) => q.bind(sqlx::types::Json(v)),
    }
}

fn exact_decimal(n: &Number) -> Option<Decimal> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
