use axum::extract::Path;
use serde_json::{json, Value};

use crate::database::models::{Company, CompanyDetail, CompanySearch, CompanyUpdate, NewCompany};
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult, ValidJson, ValidQuery};
use crate::services::CompanyService;

/// POST /companies - create a company (admin)
pub async fn create(ValidJson(data): ValidJson<NewCompany>) -> ApiResult<Company> {
    data.validate()?;

    let pool = DatabaseManager::pool().await?;
    let company = CompanyService::create(&pool, data).await?;
    Ok(ApiResponse::created(company))
}

/// GET /companies - list companies, optionally filtered by
/// `nameLike`, `minEmployees` and `maxEmployees`
pub async fn list(ValidQuery(search): ValidQuery<CompanySearch>) -> ApiResult<Vec<Company>> {
    search.validate()?;

    let pool = DatabaseManager::pool().await?;
    let companies = CompanyService::find_all(&pool, &search).await?;
    Ok(ApiResponse::success(companies))
}

/// GET /companies/:handle - one company with its jobs
pub async fn get(Path(handle): Path<String>) -> ApiResult<CompanyDetail> {
    let pool = DatabaseManager::pool().await?;
    let company = CompanyService::get(&pool, &handle).await?;
    Ok(ApiResponse::success(company))
}

/// PATCH /companies/:handle - partial update (admin)
pub async fn update(
    Path(handle): Path<String>,
    ValidJson(data): ValidJson<CompanyUpdate>,
) -> ApiResult<Company> {
    data.validate()?;
    let set = CompanyService::update_clause(&data)?;

    let pool = DatabaseManager::pool().await?;
    let company = CompanyService::update(&pool, &handle, set).await?;
    Ok(ApiResponse::success(company))
}

/// DELETE /companies/:handle (admin)
pub async fn remove(Path(handle): Path<String>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    CompanyService::remove(&pool, &handle).await?;
    Ok(ApiResponse::success(json!({ "deleted": handle })))
}
