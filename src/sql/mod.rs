pub mod types;
pub mod partial_update;
pub mod filter_where;
pub mod error;

pub use types::*;
pub use error::SqlError;
pub use partial_update::compile_partial_update;
pub use filter_where::compile_filter;
