use crate::analytics::handler as analytics;
use crate::state::SharedState;
use crate::users::handler as users;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Upper bound for JSON request bodies (user creation and login).
const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub db_ok: bool,
}

/// GET / - Liveness text.
pub async fn root() -> &'static str {
    "API is working!"
}

/// GET /health - Reports whether the pool can serve a trivial query.
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let db_ok = match state.pool.get().await {
        Ok(conn) => conn
            .interact(|conn| conn.execute_batch("SELECT 1"))
            .await
            .map(|r| r.is_ok())
            .unwrap_or(false),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not acquire a connection");
            false
        }
    };

    Json(HealthResponse {
        status: if db_ok {
            "ok".into()
        } else {
            "degraded".into()
        },
        db_ok,
    })
}

/// Build the full application router.
pub fn router(state: SharedState) -> Router {
    let user_routes = Router::new()
        .route("/api/users/get", get(users::list_users))
        .route("/api/users/send", post(users::create_user))
        .route("/api/users/login", post(users::login))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    let analytics_routes = Router::new()
        .route("/api/time-date-success", get(analytics::time_date_success))
        .route("/api/disabled-videos", get(analytics::disabled_videos))
        .route("/api/trending-data", get(analytics::trending_data))
        .route("/api/event-info", get(analytics::event_info))
        .route("/api/popularity-data", get(analytics::popularity_data))
        .route("/api/sentiment-data", get(analytics::sentiment_data));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_routes)
        .merge(analytics_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
