use crate::analytics::queries;
use crate::analytics::types::*;
use crate::error::{AppError, AppResult, LoggedQuery};
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;

/// GET /api/time-date-success
pub async fn time_date_success(
    State(state): State<SharedState>,
    LoggedQuery(params): LoggedQuery<TrendQueryParams>,
) -> AppResult<Json<Vec<TimeDaySuccessRow>>> {
    tracing::info!(?params, "received query parameters");
    let filter = params.into_filter()?;
    let rows = queries::fetch_time_day_success(&state.pool, filter)
        .await
        .map_err(|e| e.context("Error fetching time/date data"))?;
    Ok(Json(rows))
}

/// GET /api/disabled-videos
pub async fn disabled_videos(
    State(state): State<SharedState>,
    LoggedQuery(params): LoggedQuery<DisabledVideoParams>,
) -> AppResult<Json<Vec<DisabledVideoRow>>> {
    tracing::info!(?params, "received query parameters");
    let filter = params.into_filter()?;
    let rows = queries::fetch_disabled_videos(&state.pool, filter)
        .await
        .map_err(|e| e.context("Error fetching disabled videos"))?;
    Ok(Json(rows))
}

/// GET /api/trending-data
pub async fn trending_data(
    State(state): State<SharedState>,
    LoggedQuery(params): LoggedQuery<TrendQueryParams>,
) -> AppResult<Json<Vec<TrendingRow>>> {
    tracing::info!(?params, "received query parameters");
    let filter = params.into_filter()?;
    let rows = queries::fetch_trending_data(&state.pool, filter)
        .await
        .map_err(|e| e.context("Error fetching trending data"))?;
    Ok(Json(rows))
}

/// GET /api/event-info - 404 when no event matches.
pub async fn event_info(
    State(state): State<SharedState>,
    LoggedQuery(params): LoggedQuery<EventQueryParams>,
) -> AppResult<Json<Vec<EventInfoRow>>> {
    tracing::info!(?params, "received query parameters");
    let event_name = params.event_name();
    let rows = queries::fetch_event_info(&state.pool, event_name.clone())
        .await
        .map_err(|e| e.context("Error fetching event information"))?;
    if rows.is_empty() {
        return Err(AppError::NotFound(match event_name {
            Some(name) => format!("Event not found: {name}"),
            None => "Event not found".to_string(),
        }));
    }
    Ok(Json(rows))
}

/// GET /api/popularity-data
pub async fn popularity_data(
    State(state): State<SharedState>,
    LoggedQuery(params): LoggedQuery<TrendQueryParams>,
) -> AppResult<Json<Vec<PopularityRow>>> {
    tracing::info!(?params, "received query parameters");
    let filter = params.into_filter()?;
    let rows = queries::fetch_popularity_data(&state.pool, filter)
        .await
        .map_err(|e| e.context("Error fetching popularity data"))?;
    Ok(Json(rows))
}

/// GET /api/sentiment-data
pub async fn sentiment_data(
    State(state): State<SharedState>,
    LoggedQuery(params): LoggedQuery<TrendQueryParams>,
) -> AppResult<Json<Vec<SentimentRow>>> {
    tracing::info!(?params, "received query parameters");
    let filter = params.into_filter()?;
    let rows = queries::fetch_sentiment_data(&state.pool, filter)
        .await
        .map_err(|e| e.context("Error fetching sentiment data"))?;
    Ok(Json(rows))
}
