use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlError {
    #[error("{0}")]
    InvalidInput(&'static str),
}
