pub mod company_service;
pub mod job_service;

pub use company_service::CompanyService;
pub use job_service::JobService;

use thiserror::Error;

use crate::database::DatabaseError;
use crate::sql::{CompiledClause, SqlError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Sql(#[from] SqlError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

fn log_clause(label: &str, clause: &CompiledClause) {
    if crate::config::config().filter.debug_logging {
        tracing::debug!("{}: {} {:?}", label, clause.sql, clause.params);
    }
}
