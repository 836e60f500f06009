use sqlx::PgPool;

use super::ServiceError;
use crate::database::models::{Company, CompanyDetail, CompanyJob, CompanySearch, CompanyUpdate, NewCompany};
use crate::database::QueryBuilder;
use crate::sql::{self, ColumnAliasMap, CompiledClause, FilterKeySpec, FilterOp, FilterRule};

/// API field names stored under a different column
pub const COMPANY_COLUMNS: ColumnAliasMap =
    ColumnAliasMap::new(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")]);

/// Recognized `GET /companies` filters
pub const COMPANY_FILTERS: FilterKeySpec = FilterKeySpec::new(&[
    FilterRule::new("nameLike", "name", FilterOp::ILike),
    FilterRule::new("minEmployees", "num_employees", FilterOp::Gte),
    FilterRule::new("maxEmployees", "num_employees", FilterOp::Lte),
]);

const COMPANY_COLUMNS_SQL: &str = "handle, name, description, num_employees, logo_url";

/// Company record access
pub struct CompanyService;

impl CompanyService {
    /// Insert a company; a taken handle is a client error
    pub async fn create(pool: &PgPool, data: NewCompany) -> Result<Company, ServiceError> {
        let duplicate = QueryBuilder::<(String,)>::new("SELECT handle FROM companies WHERE handle = $1")
            .bind(data.handle.clone())
            .fetch_optional(pool)
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::BadRequest(format!("Duplicate company: {}", data.handle)));
        }

        let company = sqlx::query_as::<_, Company>(&format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            COMPANY_COLUMNS_SQL
        ))
        .bind(&data.handle)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.num_employees)
        .bind(&data.logo_url)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent insert, or the name is taken
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ServiceError::BadRequest(format!("Duplicate company: {}", data.handle))
            }
            other => ServiceError::Database(other.into()),
        })?;

        tracing::info!("Created company {}", company.handle);
        Ok(company)
    }

    /// All companies matching the search, ordered by name
    pub async fn find_all(pool: &PgPool, search: &CompanySearch) -> Result<Vec<Company>, ServiceError> {
        let filter = sql::compile_filter(&search.to_filter_request(), &COMPANY_FILTERS);
        super::log_clause("companies filter", &filter);

        let companies = QueryBuilder::<Company>::new(format!(
            "SELECT {} FROM companies {} ORDER BY name",
            COMPANY_COLUMNS_SQL,
            filter.where_sql()
        ))
        .bind_all(filter.params)
        .fetch_all(pool)
        .await?;
        Ok(companies)
    }

    /// One company with its jobs
    pub async fn get(pool: &PgPool, handle: &str) -> Result<CompanyDetail, ServiceError> {
        let company = QueryBuilder::<Company>::new(format!(
            "SELECT {} FROM companies WHERE handle = $1",
            COMPANY_COLUMNS_SQL
        ))
        .bind(handle)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(handle))?;

        let jobs = QueryBuilder::<CompanyJob>::new(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(pool)
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    /// SET list for a partial update; fails on an empty payload without touching the database
    pub fn update_clause(data: &CompanyUpdate) -> Result<CompiledClause, ServiceError> {
        let set = sql::compile_partial_update(&data.to_update_request(), &COMPANY_COLUMNS)?;
        super::log_clause("companies update", &set);
        Ok(set)
    }

    /// Partial update: only the fields in `set` change
    pub async fn update(pool: &PgPool, handle: &str, set: CompiledClause) -> Result<Company, ServiceError> {

        let query = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
            set.sql,
            set.next_placeholder(),
            COMPANY_COLUMNS_SQL
        );

        QueryBuilder::<Company>::new(query)
            .bind_all(set.params)
            .bind(handle)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found(handle))
    }

    pub async fn remove(pool: &PgPool, handle: &str) -> Result<(), ServiceError> {
        QueryBuilder::<(String,)>::new("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found(handle))?;

        tracing::info!("Removed company {}", handle);
        Ok(())
    }
}

fn not_found(handle: &str) -> ServiceError {
    ServiceError::NotFound(format!("No company: {}", handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_update_uses_company_columns() {
        let update = CompanyUpdate {
            name: Some("New".to_string()),
            num_employees: Some(1),
            ..Default::default()
        };
        let set = sql::compile_partial_update(&update.to_update_request(), &COMPANY_COLUMNS).unwrap();

        assert_eq!(set.sql, r#""name"=$1, "num_employees"=$2"#);
        assert_eq!(set.params, vec![json!("New"), json!(1)]);
        assert_eq!(set.next_placeholder(), 3);
    }

    #[test]
    fn empty_update_fails_before_touching_the_database() {
        let err = CompanyService::update_clause(&CompanyUpdate::default()).unwrap_err();
        assert_eq!(err.to_string(), "No data");
    }

    #[test]
    fn search_compiles_to_where_clause() {
        let search = CompanySearch {
            name_like: Some("net".to_string()),
            min_employees: Some(2),
            max_employees: Some(300),
        };
        let filter = sql::compile_filter(&search.to_filter_request(), &COMPANY_FILTERS);

        assert_eq!(
            filter.where_sql(),
            r#"WHERE "name" ILIKE $1 AND "num_employees" >= $2 AND "num_employees" <= $3"#
        );
        assert_eq!(filter.params, vec![json!("%net%"), json!(2), json!(300)]);
    }

    #[test]
    fn empty_search_has_no_where() {
        let filter = sql::compile_filter(&CompanySearch::default().to_filter_request(), &COMPANY_FILTERS);
        assert_eq!(filter.where_sql(), "");
    }
}
