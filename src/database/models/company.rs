use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;

use super::validation::{is_url, FieldErrors, ValidationError};
use crate::sql::{FilterRequest, UpdateRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A job as listed under its company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl NewCompany {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::default();
        errors.check(
            !self.handle.is_empty() && self.handle.len() <= 25,
            "handle",
            "Must be between 1 and 25 characters",
        );
        errors.check(self.handle == self.handle.to_lowercase(), "handle", "Must be lowercase");
        errors.check(!self.name.is_empty(), "name", "This field is required");
        errors.check(!self.description.is_empty(), "description", "This field is required");
        errors.check(self.num_employees.map_or(true, |n| n >= 0), "numEmployees", "Must be non-negative");
        errors.check(self.logo_url.as_deref().map_or(true, is_url), "logoUrl", "Must be a valid URL");
        errors.finish()
    }
}

/// Fields an admin may change on an existing company. The handle is fixed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::default();
        errors.check(self.name.as_deref().map_or(true, |s| !s.is_empty()), "name", "Must not be empty");
        errors.check(
            self.description.as_deref().map_or(true, |s| !s.is_empty()),
            "description",
            "Must not be empty",
        );
        errors.check(self.num_employees.map_or(true, |n| n >= 0), "numEmployees", "Must be non-negative");
        errors.check(self.logo_url.as_deref().map_or(true, is_url), "logoUrl", "Must be a valid URL");
        errors.finish()
    }

    /// Supplied fields only, keyed by their API names
    pub fn to_update_request(&self) -> UpdateRequest {
        let mut data = UpdateRequest::new();
        if let Some(name) = &self.name {
            data.insert("name".to_string(), json!(name));
        }
        if let Some(description) = &self.description {
            data.insert("description".to_string(), json!(description));
        }
        if let Some(num_employees) = self.num_employees {
            data.insert("numEmployees".to_string(), json!(num_employees));
        }
        if let Some(logo_url) = &self.logo_url {
            data.insert("logoUrl".to_string(), json!(logo_url));
        }
        data
    }
}

/// `GET /companies` query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanySearch {
    pub name_like: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanySearch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(ValidationError::new("Min employees cannot be higher than max employees"));
            }
        }
        let mut errors = FieldErrors::default();
        errors.check(self.min_employees.map_or(true, |n| n >= 0), "minEmployees", "Must be non-negative");
        errors.check(self.max_employees.map_or(true, |n| n >= 0), "maxEmployees", "Must be non-negative");
        errors.finish()
    }

    pub fn to_filter_request(&self) -> FilterRequest {
        let mut filters = FilterRequest::new();
        if let Some(name_like) = &self.name_like {
            filters.insert("nameLike".to_string(), json!(name_like));
        }
        if let Some(min) = self.min_employees {
            filters.insert("minEmployees".to_string(), json!(min));
        }
        if let Some(max) = self.max_employees {
            filters.insert("maxEmployees".to_string(), json!(max));
        }
        filters
    }
}
