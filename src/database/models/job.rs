use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Number, Value};
use sqlx::FromRow;
use std::str::FromStr;

use super::validation::{FieldErrors, ValidationError};
use crate::sql::{FilterRequest, UpdateRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

fn equity_in_range(equity: Option<Decimal>) -> bool {
    equity.map_or(true, |e| e >= Decimal::ZERO && e <= Decimal::ONE)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::default();
        errors.check(!self.title.is_empty(), "title", "This field is required");
        errors.check(self.salary.map_or(true, |s| s >= 0), "salary", "Must be non-negative");
        errors.check(equity_in_range(self.equity), "equity", "Must be between 0 and 1");
        errors.check(!self.company_handle.is_empty(), "companyHandle", "This field is required");
        errors.finish()
    }
}

/// Changeable job fields. `id` and `companyHandle` are rejected at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl JobUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::default();
        errors.check(self.title.as_deref().map_or(true, |s| !s.is_empty()), "title", "Must not be empty");
        errors.check(self.salary.map_or(true, |s| s >= 0), "salary", "Must be non-negative");
        errors.check(equity_in_range(self.equity), "equity", "Must be between 0 and 1");
        errors.finish()
    }

    pub fn to_update_request(&self) -> UpdateRequest {
        let mut data = UpdateRequest::new();
        if let Some(title) = &self.title {
            data.insert("title".to_string(), json!(title));
        }
        if let Some(salary) = self.salary {
            data.insert("salary".to_string(), json!(salary));
        }
        // Exact decimal text; the query builder binds non-integers as NUMERIC
        if let Some(equity) = self.equity.and_then(|e| Number::from_str(&e.to_string()).ok()) {
            data.insert("equity".to_string(), Value::Number(equity));
        }
        data
    }
}

/// `GET /jobs` query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobSearch {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}

impl JobSearch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::default();
        errors.check(self.min_salary.map_or(true, |s| s >= 0), "minSalary", "Must be non-negative");
        errors.finish()
    }

    pub fn to_filter_request(&self) -> FilterRequest {
        let mut filters = FilterRequest::new();
        if let Some(title) = &self.title {
            filters.insert("title".to_string(), json!(title));
        }
        if let Some(min_salary) = self.min_salary {
            filters.insert("minSalary".to_string(), json!(min_salary));
        }
        if let Some(has_equity) = self.has_equity {
            filters.insert("hasEquity".to_string(), json!(has_equity));
        }
        filters
    }
}
