//! One query function per analytics view.
//!
//! Every statement is static, parameterized SQL. Optional filters are written
//! as `(?N IS NULL OR column = ?N)` so an absent value imposes no constraint.
//! The trend views share one binding layout:
//! `?1` country, `?2` category_id, `?3` start_date, `?4` end_date, `?5` tag.
//! Per-row views add `?6` limit; grouped views return every group.
//! The tag is a literal, case-insensitive substring of `tags`.

use crate::analytics::types::*;
use crate::error::AppResult;
use deadpool_sqlite::Pool;
use rusqlite::{Params, Row};

/// Publish day/hour buckets with engagement averages.
pub const TIME_DAY_SUCCESS_SQL: &str = r#"
SELECT
    CAST(strftime('%w', publish_time) AS INTEGER) AS day_of_week,
    CAST(strftime('%H', publish_time) AS INTEGER) AS publish_hour,
    COUNT(DISTINCT video_id) AS video_count,
    AVG(views) AS avg_views,
    AVG(likes) AS avg_likes,
    AVG(comment_count) AS avg_comments
FROM videos
WHERE strftime('%H', publish_time) IS NOT NULL
    AND (?1 IS NULL OR country = ?1)
    AND (?2 IS NULL OR category_id = ?2)
    AND (?3 IS NULL OR trending_date >= ?3)
    AND (?4 IS NULL OR trending_date <= ?4)
    AND (?5 IS NULL OR instr(lower(tags), lower(?5)) > 0)
GROUP BY day_of_week, publish_hour
ORDER BY avg_views DESC, day_of_week, publish_hour
"#;

/// Records with disabled comments/ratings or removed videos.
/// Extra parameters: `?6` comments_disabled, `?7` ratings_disabled,
/// `?8` video_error_or_removed (0 = no constraint), `?9` limit.
pub const DISABLED_VIDEOS_SQL: &str = r#"
SELECT
    video_id,
    title,
    channel_title,
    trending_date,
    country,
    category_id,
    views,
    likes,
    comment_count,
    comments_disabled,
    ratings_disabled,
    video_error_or_removed
FROM videos
WHERE (?1 IS NULL OR country = ?1)
    AND (?2 IS NULL OR category_id = ?2)
    AND (?3 IS NULL OR trending_date >= ?3)
    AND (?4 IS NULL OR trending_date <= ?4)
    AND (?5 IS NULL OR instr(lower(tags), lower(?5)) > 0)
    AND (?6 = 0 OR comments_disabled = 1)
    AND (?7 = 0 OR ratings_disabled = 1)
    AND (?8 = 0 OR video_error_or_removed = 1)
ORDER BY views DESC, trending_date DESC
LIMIT ?9
"#;

/// Videos ranked by how many distinct days they trended.
pub const TRENDING_SQL: &str = r#"
SELECT
    video_id,
    MAX(title) AS title,
    MAX(channel_title) AS channel_title,
    MAX(category_id) AS category_id,
    COUNT(DISTINCT trending_date) AS days_trending,
    MAX(views) AS peak_views,
    MIN(trending_date) AS first_trending,
    MAX(trending_date) AS last_trending
FROM videos
WHERE (?1 IS NULL OR country = ?1)
    AND (?2 IS NULL OR category_id = ?2)
    AND (?3 IS NULL OR trending_date >= ?3)
    AND (?4 IS NULL OR trending_date <= ?4)
    AND (?5 IS NULL OR instr(lower(tags), lower(?5)) > 0)
GROUP BY video_id
ORDER BY days_trending DESC, peak_views DESC, video_id
LIMIT ?6
"#;

/// Events with the trending activity inside their date window.
/// Parameters: `?1` event_name (or NULL for every event).
pub const EVENT_INFO_SQL: &str = r#"
SELECT
    e.event_name,
    e.country,
    e.start_date,
    e.end_date,
    e.description,
    COUNT(v.id) AS video_count,
    COALESCE(AVG(v.views), 0.0) AS avg_views
FROM events e
LEFT JOIN videos v
    ON v.trending_date >= e.start_date
    AND v.trending_date <= e.end_date
    AND (e.country IS NULL OR v.country = e.country)
WHERE (?1 IS NULL OR e.event_name = ?1 COLLATE NOCASE)
GROUP BY e.event_id
ORDER BY e.start_date, e.event_name
"#;

/// Per-category reach and like ratio.
pub const POPULARITY_SQL: &str = r#"
SELECT
    category_id,
    COUNT(DISTINCT video_id) AS video_count,
    SUM(views) AS total_views,
    AVG(views) AS avg_views,
    AVG(likes) AS avg_likes,
    CASE WHEN SUM(likes) + SUM(dislikes) > 0
        THEN SUM(likes) * 1.0 / (SUM(likes) + SUM(dislikes))
        ELSE 0.0
    END AS like_ratio
FROM videos
WHERE (?1 IS NULL OR country = ?1)
    AND (?2 IS NULL OR category_id = ?2)
    AND (?3 IS NULL OR trending_date >= ?3)
    AND (?4 IS NULL OR trending_date <= ?4)
    AND (?5 IS NULL OR instr(lower(tags), lower(?5)) > 0)
GROUP BY category_id
ORDER BY total_views DESC, category_id
"#;

/// Monthly sentiment distribution. Scores within ±0.05 count as neutral.
pub const SENTIMENT_SQL: &str = r#"
SELECT
    substr(trending_date, 1, 7) AS month,
    AVG(sentiment_score) AS avg_sentiment,
    SUM(CASE WHEN sentiment_score > 0.05 THEN 1 ELSE 0 END) AS positive,
    SUM(CASE WHEN sentiment_score BETWEEN -0.05 AND 0.05 THEN 1 ELSE 0 END) AS neutral,
    SUM(CASE WHEN sentiment_score < -0.05 THEN 1 ELSE 0 END) AS negative
FROM videos
WHERE sentiment_score IS NOT NULL
    AND (?1 IS NULL OR country = ?1)
    AND (?2 IS NULL OR category_id = ?2)
    AND (?3 IS NULL OR trending_date >= ?3)
    AND (?4 IS NULL OR trending_date <= ?4)
    AND (?5 IS NULL OR instr(lower(tags), lower(?5)) > 0)
GROUP BY month
ORDER BY month
"#;

type TrendParams = (
    Option<String>,
    Option<i64>,
    Option<String>,
    Option<String>,
    Option<String>,
);

fn trend_params(filter: &TrendFilter) -> TrendParams {
    (
        filter.country.clone(),
        filter.category_id,
        filter.start_date_param(),
        filter.end_date_param(),
        filter.tag.clone(),
    )
}

/// Run one of the trend-layout statements and map every row.
async fn query_trend<T, P, F>(
    pool: &Pool,
    sql: &'static str,
    params: P,
    map: F,
) -> AppResult<Vec<T>>
where
    T: Send + 'static,
    P: Params + Send + 'static,
    F: Fn(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
{
    let conn = pool.get().await?;
    let rows = conn
        .interact(move |conn| {
            let mut stmt = conn.prepare_cached(sql)?;
            let rows = stmt.query_map(params, |row| map(row))?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await??;
    Ok(rows)
}

#[tracing::instrument(skip(pool))]
pub async fn fetch_time_day_success(
    pool: &Pool,
    filter: TrendFilter,
) -> AppResult<Vec<TimeDaySuccessRow>> {
    query_trend(pool, TIME_DAY_SUCCESS_SQL, trend_params(&filter), |row| {
        Ok(TimeDaySuccessRow {
            day_of_week: row.get(0)?,
            publish_hour: row.get(1)?,
            video_count: row.get(2)?,
            avg_views: row.get(3)?,
            avg_likes: row.get(4)?,
            avg_comments: row.get(5)?,
        })
    })
    .await
}

#[tracing::instrument(skip(pool))]
pub async fn fetch_disabled_videos(
    pool: &Pool,
    filter: DisabledVideoFilter,
) -> AppResult<Vec<DisabledVideoRow>> {
    let conn = pool.get().await?;
    let rows = conn
        .interact(move |conn| {
            let (country, category_id, start, end, tag) = trend_params(&filter.trend);
            let mut stmt = conn.prepare_cached(DISABLED_VIDEOS_SQL)?;
            let rows = stmt.query_map(
                (
                    country,
                    category_id,
                    start,
                    end,
                    tag,
                    filter.comments_disabled,
                    filter.ratings_disabled,
                    filter.video_error_or_removed,
                    filter.trend.limit,
                ),
                |row| {
                    Ok(DisabledVideoRow {
                        video_id: row.get(0)?,
                        title: row.get(1)?,
                        channel_title: row.get(2)?,
                        trending_date: row.get(3)?,
                        country: row.get(4)?,
                        category_id: row.get(5)?,
                        views: row.get(6)?,
                        likes: row.get(7)?,
                        comment_count: row.get(8)?,
                        comments_disabled: row.get(9)?,
                        ratings_disabled: row.get(10)?,
                        video_error_or_removed: row.get(11)?,
                    })
                },
            )?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await??;
    Ok(rows)
}

#[tracing::instrument(skip(pool))]
pub async fn fetch_trending_data(pool: &Pool, filter: TrendFilter) -> AppResult<Vec<TrendingRow>> {
    let (country, category_id, start, end, tag) = trend_params(&filter);
    let params = (country, category_id, start, end, tag, filter.limit);
    query_trend(pool, TRENDING_SQL, params, |row| {
        Ok(TrendingRow {
            video_id: row.get(0)?,
            title: row.get(1)?,
            channel_title: row.get(2)?,
            category_id: row.get(3)?,
            days_trending: row.get(4)?,
            peak_views: row.get(5)?,
            first_trending: row.get(6)?,
            last_trending: row.get(7)?,
        })
    })
    .await
}

#[tracing::instrument(skip(pool))]
pub async fn fetch_event_info(
    pool: &Pool,
    event_name: Option<String>,
) -> AppResult<Vec<EventInfoRow>> {
    let conn = pool.get().await?;
    let rows = conn
        .interact(move |conn| {
            let mut stmt = conn.prepare_cached(EVENT_INFO_SQL)?;
            let rows = stmt.query_map([event_name], |row| {
                Ok(EventInfoRow {
                    event_name: row.get(0)?,
                    country: row.get(1)?,
                    start_date: row.get(2)?,
                    end_date: row.get(3)?,
                    description: row.get(4)?,
                    video_count: row.get(5)?,
                    avg_views: row.get(6)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await??;
    Ok(rows)
}

#[tracing::instrument(skip(pool))]
pub async fn fetch_popularity_data(
    pool: &Pool,
    filter: TrendFilter,
) -> AppResult<Vec<PopularityRow>> {
    query_trend(pool, POPULARITY_SQL, trend_params(&filter), |row| {
        Ok(PopularityRow {
            category_id: row.get(0)?,
            video_count: row.get(1)?,
            total_views: row.get(2)?,
            avg_views: row.get(3)?,
            avg_likes: row.get(4)?,
            like_ratio: row.get(5)?,
        })
    })
    .await
}

#[tracing::instrument(skip(pool))]
pub async fn fetch_sentiment_data(
    pool: &Pool,
    filter: TrendFilter,
) -> AppResult<Vec<SentimentRow>> {
    query_trend(pool, SENTIMENT_SQL, trend_params(&filter), |row| {
        Ok(SentimentRow {
            month: row.get(0)?,
            avg_sentiment: row.get(1)?,
            positive: row.get(2)?,
            neutral: row.get(3)?,
            negative: row.get(4)?,
        })
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::storage::sqlite::{create_pool, init_pool};
    use chrono::NaiveDate;

    async fn seeded_pool() -> (tempfile::TempDir, Pool) {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&DatabaseConfig {
            path: dir.path().join("videos.db"),
            pool_size: 4,
            ..Default::default()
        })
        .unwrap();
        init_pool(&pool).await.unwrap();

        let conn = pool.get().await.unwrap();
        conn.interact(|conn| {
            conn.execute_batch(
                r#"
                INSERT INTO videos (video_id, trending_date, title, channel_title, category_id,
                    publish_time, tags, views, likes, dislikes, comment_count,
                    comments_disabled, ratings_disabled, video_error_or_removed,
                    country, sentiment_score)
                VALUES
                    ('a1', '2018-01-02', 'Alpha', 'ChanA', 10, '2018-01-01T15:00:00', 'music|pop',
                        1000, 100, 10, 50, 0, 0, 0, 'US', 0.6),
                    ('a1', '2018-01-03', 'Alpha', 'ChanA', 10, '2018-01-01T15:00:00', 'music|pop',
                        3000, 300, 20, 80, 0, 0, 0, 'US', 0.4),
                    ('b2', '2018-01-03', 'Beta', 'ChanB', 24, '2018-01-02T09:30:00', 'comedy',
                        500, 10, 40, 0, 1, 0, 0, 'US', -0.5),
                    ('c3', '2018-02-10', 'Gamma', 'ChanC', 24, '2018-02-08T20:00:00', 'news|politics',
                        800, 20, 20, 5, 0, 1, 0, 'GB', 0.0),
                    ('d4', '2018-02-11', 'Delta', 'ChanD', 10, '2018-02-09T20:15:00', 'Music|live',
                        200, 5, 1, 2, 1, 1, 1, 'GB', NULL);

                INSERT INTO events (event_name, country, start_date, end_date, description)
                VALUES
                    ('Super Bowl', 'US', '2018-02-04', '2018-02-05', 'Super Bowl LII'),
                    ('New Year', NULL, '2018-01-01', '2018-01-03', 'New year period'),
                    ('Royal Wedding', 'GB', '2018-05-19', '2018-05-20', NULL);
                "#,
            )
        })
        .await
        .unwrap()
        .unwrap();
        drop(conn);

        (dir, pool)
    }

    async fn empty_pool(name: &str) -> (tempfile::TempDir, Pool) {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&DatabaseConfig {
            path: dir.path().join(name),
            pool_size: 1,
            ..Default::default()
        })
        .unwrap();
        init_pool(&pool).await.unwrap();
        (dir, pool)
    }

    /// Insert one US row per `(video_id, publish_time, tags)`.
    async fn insert_videos(pool: &Pool, videos: Vec<(String, String, String)>) {
        let conn = pool.get().await.unwrap();
        conn.interact(move |conn| {
            let mut stmt = conn.prepare(
                "INSERT INTO videos (video_id, trending_date, title, channel_title, category_id,
                     publish_time, tags, views, country)
                 VALUES (?1, '2018-03-01', 'T', 'C', 10, ?2, ?3, 100, 'US')",
            )?;
            for (video_id, publish_time, tags) in &videos {
                stmt.execute((video_id, publish_time, tags))?;
            }
            Ok::<_, rusqlite::Error>(())
        })
        .await
        .unwrap()
        .unwrap();
    }

    fn assert_released(pool: &Pool) {
        let status = pool.status();
        assert_eq!(status.available, status.size, "connection leaked: {status:?}");
    }

    #[tokio::test]
    async fn trending_ranks_by_days_trending() {
        let (_dir, pool) = seeded_pool().await;
        let rows = fetch_trending_data(&pool, TrendFilter::default()).await.unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].video_id, "a1");
        assert_eq!(rows[0].days_trending, 2);
        assert_eq!(rows[0].peak_views, 3000);
        assert_eq!(rows[0].first_trending, "2018-01-02");
        assert_eq!(rows[0].last_trending, "2018-01-03");
        assert_released(&pool);
    }

    #[tokio::test]
    async fn trending_applies_each_filter() {
        let (_dir, pool) = seeded_pool().await;

        let by_country = TrendFilter {
            country: Some("GB".to_string()),
            ..TrendFilter::default()
        };
        let rows = fetch_trending_data(&pool, by_country).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["c3", "d4"]);

        let by_category = TrendFilter {
            category_id: Some(24),
            ..TrendFilter::default()
        };
        let rows = fetch_trending_data(&pool, by_category).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["c3", "b2"]);

        let by_tag = TrendFilter {
            tag: Some("music".to_string()),
            ..TrendFilter::default()
        };
        let rows = fetch_trending_data(&pool, by_tag).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "d4"]);

        let by_dates = TrendFilter {
            start_date: NaiveDate::from_ymd_opt(2018, 1, 3),
            end_date: NaiveDate::from_ymd_opt(2018, 1, 31),
            ..TrendFilter::default()
        };
        let rows = fetch_trending_data(&pool, by_dates).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.days_trending == 1));

        let limited = TrendFilter {
            limit: 1,
            ..TrendFilter::default()
        };
        assert_eq!(fetch_trending_data(&pool, limited).await.unwrap().len(), 1);
        assert_released(&pool);
    }

    #[tokio::test]
    async fn disabled_videos_only_constrain_requested_flags() {
        let (_dir, pool) = seeded_pool().await;

        let none = DisabledVideoFilter {
            trend: TrendFilter::default(),
            comments_disabled: false,
            ratings_disabled: false,
            video_error_or_removed: false,
        };
        assert_eq!(fetch_disabled_videos(&pool, none.clone()).await.unwrap().len(), 5);

        let comments = DisabledVideoFilter {
            comments_disabled: true,
            ..none.clone()
        };
        let rows = fetch_disabled_videos(&pool, comments).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["b2", "d4"]);
        assert!(rows.iter().all(|r| r.comments_disabled));

        let all_flags = DisabledVideoFilter {
            comments_disabled: true,
            ratings_disabled: true,
            video_error_or_removed: true,
            ..none
        };
        let rows = fetch_disabled_videos(&pool, all_flags).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].video_id, "d4");
        assert_released(&pool);
    }

    #[tokio::test]
    async fn time_day_success_buckets_by_publish_slot() {
        let (_dir, pool) = seeded_pool().await;
        let filter = TrendFilter {
            country: Some("US".to_string()),
            ..TrendFilter::default()
        };
        let rows = fetch_time_day_success(&pool, filter).await.unwrap();
        assert_eq!(rows.len(), 2);
        // 2018-01-01 was a Monday
        assert_eq!(rows[0].day_of_week, 1);
        assert_eq!(rows[0].publish_hour, 15);
        assert_eq!(rows[0].video_count, 1);
        assert!((rows[0].avg_views - 2000.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].day_of_week, 2);
        assert_eq!(rows[1].publish_hour, 9);
        assert_released(&pool);
    }

    #[tokio::test]
    async fn event_info_matches_names_case_insensitively() {
        let (_dir, pool) = seeded_pool().await;

        let rows = fetch_event_info(&pool, Some("new year".to_string())).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event_name, "New Year");
        assert_eq!(rows[0].country, None);
        assert_eq!(rows[0].video_count, 3);
        assert!((rows[0].avg_views - 1500.0).abs() < 1e-9);

        let rows = fetch_event_info(&pool, Some("Super Bowl".to_string())).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].video_count, 0);
        assert_eq!(rows[0].avg_views, 0.0);

        assert!(fetch_event_info(&pool, Some("doesnotexist".to_string()))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(fetch_event_info(&pool, None).await.unwrap().len(), 3);
        assert_released(&pool);
    }

    #[tokio::test]
    async fn popularity_groups_by_category() {
        let (_dir, pool) = seeded_pool().await;
        let rows = fetch_popularity_data(&pool, TrendFilter::default()).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category_id, 10);
        assert_eq!(rows[0].video_count, 2);
        assert_eq!(rows[0].total_views, 4200);
        assert!((rows[0].like_ratio - 405.0 / 436.0).abs() < 1e-9);
        assert_eq!(rows[1].category_id, 24);
        assert_eq!(rows[1].total_views, 1300);
        assert_released(&pool);
    }

    #[tokio::test]
    async fn sentiment_skips_unscored_rows() {
        let (_dir, pool) = seeded_pool().await;
        let rows = fetch_sentiment_data(&pool, TrendFilter::default()).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, "2018-01");
        assert_eq!((rows[0].positive, rows[0].neutral, rows[0].negative), (2, 0, 1));
        assert!((rows[0].avg_sentiment - 0.5 / 3.0).abs() < 1e-9);
        assert_eq!(rows[1].month, "2018-02");
        assert_eq!((rows[1].positive, rows[1].neutral, rows[1].negative), (0, 1, 0));
        assert_released(&pool);
    }

    #[tokio::test]
    async fn empty_tables_yield_empty_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&DatabaseConfig {
            path: dir.path().join("empty.db"),
            pool_size: 1,
            ..Default::default()
        })
        .unwrap();
        init_pool(&pool).await.unwrap();

        assert!(fetch_trending_data(&pool, TrendFilter::default()).await.unwrap().is_empty());
        assert!(fetch_time_day_success(&pool, TrendFilter::default()).await.unwrap().is_empty());
        assert!(fetch_popularity_data(&pool, TrendFilter::default()).await.unwrap().is_empty());
        assert!(fetch_sentiment_data(&pool, TrendFilter::default()).await.unwrap().is_empty());
        assert!(fetch_event_info(&pool, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn grouped_views_return_every_bucket() {
        let (_dir, pool) = empty_pool("buckets.db").await;
        // 2018-01-07 was a Sunday; one video per weekday and hour
        let videos = (0..7)
            .flat_map(|day| {
                (0..24).map(move |hour| {
                    (
                        format!("v{day}-{hour}"),
                        format!("2018-01-{:02}T{hour:02}:00:00", 7 + day),
                        "music".to_string(),
                    )
                })
            })
            .collect();
        insert_videos(&pool, videos).await;

        let filter = TrendFilter::default();
        assert_eq!(filter.limit, 100);
        let rows = fetch_time_day_success(&pool, filter).await.unwrap();
        assert_eq!(rows.len(), 168);

        let limited = TrendFilter {
            limit: 1,
            ..TrendFilter::default()
        };
        assert_eq!(fetch_time_day_success(&pool, limited).await.unwrap().len(), 168);
        assert_released(&pool);
    }

    #[tokio::test]
    async fn tag_wildcards_match_literally() {
        let (_dir, pool) = empty_pool("tags.db").await;
        let videos = [("m1", "music|pop"), ("cs", "c_sharp|dotnet"), ("cx", "cxsharp")]
            .into_iter()
            .map(|(id, tags)| (id.to_string(), "2018-03-01T10:00:00".to_string(), tags.to_string()))
            .collect();
        insert_videos(&pool, videos).await;

        let tagged = |tag: &str| TrendFilter {
            tag: Some(tag.to_string()),
            ..TrendFilter::default()
        };

        assert!(fetch_trending_data(&pool, tagged("%")).await.unwrap().is_empty());
        assert!(fetch_popularity_data(&pool, tagged("%")).await.unwrap().is_empty());

        let rows = fetch_trending_data(&pool, tagged("_")).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["cs"]);

        let rows = fetch_trending_data(&pool, tagged("C_Sharp")).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["cs"]);
        assert_released(&pool);
    }
}
