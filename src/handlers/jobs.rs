use axum::extract::Path;
use serde_json::{json, Value};

use crate::database::models::{Job, JobSearch, JobUpdate, NewJob};
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult, ValidJson, ValidQuery};
use crate::services::JobService;

/// POST /jobs - create a job for an existing company (admin)
pub async fn create(ValidJson(data): ValidJson<NewJob>) -> ApiResult<Job> {
    data.validate()?;

    let pool = DatabaseManager::pool().await?;
    let job = JobService::create(&pool, data).await?;
    Ok(ApiResponse::created(job))
}

/// GET /jobs - list jobs, optionally filtered by `title`, `minSalary`, `hasEquity`
pub async fn list(ValidQuery(search): ValidQuery<JobSearch>) -> ApiResult<Vec<Job>> {
    search.validate()?;

    let pool = DatabaseManager::pool().await?;
    let jobs = JobService::find_all(&pool, &search).await?;
    Ok(ApiResponse::success(jobs))
}

/// GET /jobs/:id
pub async fn get(Path(id): Path<i32>) -> ApiResult<Job> {
    let pool = DatabaseManager::pool().await?;
    let job = JobService::get(&pool, id).await?;
    Ok(ApiResponse::success(job))
}

/// PATCH /jobs/:id - change title, salary or equity (admin)
pub async fn update(Path(id): Path<i32>, ValidJson(data): ValidJson<JobUpdate>) -> ApiResult<Job> {
    data.validate()?;
    let set = JobService::update_clause(&data)?;

    let pool = DatabaseManager::pool().await?;
    let job = JobService::update(&pool, id, set).await?;
    Ok(ApiResponse::success(job))
}

/// DELETE /jobs/:id (admin)
pub async fn remove(Path(id): Path<i32>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    JobService::remove(&pool, id).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
