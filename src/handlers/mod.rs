// handlers/mod.rs - route handlers grouped by resource
//
// Reads are public. Mutations sit behind `ensure_admin` (see router.rs); the
// handlers themselves only validate input and call the record services.
pub mod companies;
pub mod jobs;
pub mod system;
