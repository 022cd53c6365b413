pub mod analytics;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;
pub mod users;
