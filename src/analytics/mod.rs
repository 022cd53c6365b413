pub mod handler;
pub mod queries;
pub mod types;
