use sqlx::PgPool;

use super::ServiceError;
use crate::database::models::{Job, JobSearch, JobUpdate, NewJob};
use crate::database::QueryBuilder;
use crate::sql::{self, ColumnAliasMap, CompiledClause, FilterKeySpec, FilterOp, FilterRule};

/// Recognized `GET /jobs` filters
pub const JOB_FILTERS: FilterKeySpec = FilterKeySpec::new(&[
    FilterRule::new("title", "title", FilterOp::ILike),
    FilterRule::new("minSalary", "salary", FilterOp::Gte),
    FilterRule::new("hasEquity", "equity", FilterOp::Positive),
]);

const JOB_COLUMNS_SQL: &str = "id, title, salary, equity, company_handle";

/// Job record access
pub struct JobService;

impl JobService {
    pub async fn create(pool: &PgPool, data: NewJob) -> Result<Job, ServiceError> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs (title, salary, equity, company_handle)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            JOB_COLUMNS_SQL
        ))
        .bind(&data.title)
        .bind(data.salary)
        .bind(data.equity)
        .bind(&data.company_handle)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                ServiceError::BadRequest(format!("No company: {}", data.company_handle))
            }
            other => ServiceError::Database(other.into()),
        })?;

        tracing::info!("Created job {} for {}", job.id, job.company_handle);
        Ok(job)
    }

    /// All jobs matching the search, ordered by title
    pub async fn find_all(pool: &PgPool, search: &JobSearch) -> Result<Vec<Job>, ServiceError> {
        let filter = sql::compile_filter(&search.to_filter_request(), &JOB_FILTERS);
        super::log_clause("jobs filter", &filter);

        let jobs = QueryBuilder::<Job>::new(format!(
            "SELECT {} FROM jobs {} ORDER BY title, id",
            JOB_COLUMNS_SQL,
            filter.where_sql()
        ))
        .bind_all(filter.params)
        .fetch_all(pool)
        .await?;
        Ok(jobs)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Job, ServiceError> {
        QueryBuilder::<Job>::new(format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS_SQL))
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// SET list for title, salary and equity; fails on an empty payload
    pub fn update_clause(data: &JobUpdate) -> Result<CompiledClause, ServiceError> {
        let set = sql::compile_partial_update(&data.to_update_request(), &ColumnAliasMap::EMPTY)?;
        super::log_clause("jobs update", &set);
        Ok(set)
    }

    pub async fn update(pool: &PgPool, id: i32, set: CompiledClause) -> Result<Job, ServiceError> {

        let query = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            set.sql,
            set.next_placeholder(),
            JOB_COLUMNS_SQL
        );

        QueryBuilder::<Job>::new(query)
            .bind_all(set.params)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn remove(pool: &PgPool, id: i32) -> Result<(), ServiceError> {
        QueryBuilder::<(i32,)>::new("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Removed job {}", id);
        Ok(())
    }
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("No job: {}", id))
}
