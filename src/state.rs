use deadpool_sqlite::Pool;
use std::sync::Arc;

/// State shared by every handler. The pool is the only cross-request resource.
pub struct AppState {
    pub pool: Pool,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn shared(pool: Pool) -> SharedState {
        Arc::new(Self { pool })
    }
}
