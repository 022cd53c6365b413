use crate::error::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

/// Query parameters shared by the trend-style analytics endpoints.
///
/// Every field arrives as an optional string; [`TrendQueryParams::into_filter`]
/// turns them into typed values. Empty strings count as absent.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TrendQueryParams {
    pub country: Option<String>,
    pub category_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<String>,
}

/// Validated filter handed to the `fetch_*` functions.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendFilter {
    pub country: Option<String>,
    pub category_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub tag: Option<String>,
    pub limit: i64,
}

impl Default for TrendFilter {
    fn default() -> Self {
        Self {
            country: None,
            category_id: None,
            start_date: None,
            end_date: None,
            tag: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_date(field: &str, value: Option<String>) -> AppResult<Option<NaiveDate>> {
    present(value)
        .map(|v| {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d").map_err(|_| {
                AppError::Validation(format!("{field} must be a date in YYYY-MM-DD format"))
            })
        })
        .transpose()
}

fn parse_int(field: &str, value: Option<String>) -> AppResult<Option<i64>> {
    present(value)
        .map(|v| {
            v.parse::<i64>()
                .map_err(|_| AppError::Validation(format!("{field} must be an integer")))
        })
        .transpose()
}

impl TrendQueryParams {
    pub fn into_filter(self) -> AppResult<TrendFilter> {
        let start_date = parse_date("start_date", self.start_date)?;
        let end_date = parse_date("end_date", self.end_date)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(AppError::Validation(
                    "start_date must not be after end_date".to_string(),
                ));
            }
        }

        Ok(TrendFilter {
            country: present(self.country),
            category_id: parse_int("category_id", self.category_id)?,
            start_date,
            end_date,
            tag: present(self.tag),
            limit: parse_int("limit", self.limit)?
                .unwrap_or(DEFAULT_LIMIT)
                .clamp(1, MAX_LIMIT),
        })
    }
}

impl TrendFilter {
    pub(crate) fn start_date_param(&self) -> Option<String> {
        self.start_date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    pub(crate) fn end_date_param(&self) -> Option<String> {
        self.end_date.map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// Query parameters for the disabled-videos endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DisabledVideoParams {
    #[serde(flatten)]
    pub trend: TrendQueryParams,
    pub comments_disabled: Option<String>,
    pub ratings_disabled: Option<String>,
    pub video_error_or_removed: Option<String>,
}

/// A flag is set only by the exact string `"True"`; `"true"`, `"1"` and
/// anything else leave it unset.
pub fn flag_is_true(value: Option<&str>) -> bool {
    value == Some("True")
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisabledVideoFilter {
    pub trend: TrendFilter,
    pub comments_disabled: bool,
    pub ratings_disabled: bool,
    pub video_error_or_removed: bool,
}

impl DisabledVideoParams {
    pub fn into_filter(self) -> AppResult<DisabledVideoFilter> {
        Ok(DisabledVideoFilter {
            comments_disabled: flag_is_true(self.comments_disabled.as_deref()),
            ratings_disabled: flag_is_true(self.ratings_disabled.as_deref()),
            video_error_or_removed: flag_is_true(self.video_error_or_removed.as_deref()),
            trend: self.trend.into_filter()?,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EventQueryParams {
    pub event_name: Option<String>,
}

impl EventQueryParams {
    pub fn event_name(self) -> Option<String> {
        present(self.event_name)
    }
}

// ── Time & Day Success ──

#[derive(Debug, Serialize)]
pub struct TimeDaySuccessRow {
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: i64,
    pub publish_hour: i64,
    pub video_count: i64,
    pub avg_views: f64,
    pub avg_likes: f64,
    pub avg_comments: f64,
}

// ── Disabled Videos ──

#[derive(Debug, Serialize)]
pub struct DisabledVideoRow {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub trending_date: String,
    pub country: String,
    pub category_id: i64,
    pub views: i64,
    pub likes: i64,
    pub comment_count: i64,
    pub comments_disabled: bool,
    pub ratings_disabled: bool,
    pub video_error_or_removed: bool,
}

// ── Trending ──

#[derive(Debug, Serialize)]
pub struct TrendingRow {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub category_id: i64,
    pub days_trending: i64,
    pub peak_views: i64,
    pub first_trending: String,
    pub last_trending: String,
}

// ── Event Info ──

#[derive(Debug, Serialize)]
pub struct EventInfoRow {
    pub event_name: String,
    pub country: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub description: Option<String>,
    pub video_count: i64,
    pub avg_views: f64,
}

// ── Popularity ──

#[derive(Debug, Serialize)]
pub struct PopularityRow {
    pub category_id: i64,
    pub video_count: i64,
    pub total_views: i64,
    pub avg_views: f64,
    pub avg_likes: f64,
    pub like_ratio: f64,
}

// ── Sentiment ──

#[derive(Debug, Serialize)]
pub struct SentimentRow {
    pub month: String,
    pub avg_sentiment: f64,
    pub positive: i64,
    pub neutral: i64,
    pub negative: i64,
}
