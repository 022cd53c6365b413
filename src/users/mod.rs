pub mod handler;
pub mod password;
