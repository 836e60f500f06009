pub mod company;
pub mod job;
pub mod validation;

pub use company::{Company, CompanyDetail, CompanyJob, CompanySearch, CompanyUpdate, NewCompany};
pub use job::{Job, JobSearch, JobUpdate, NewJob};
pub use validation::ValidationError;
