use rusqlite::Connection;

/// Tables the service reads and writes. Video and event rows are loaded by an
/// external import; only `"User"` is written through the API.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS "User" (
    user_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name    TEXT NOT NULL,
    email        TEXT UNIQUE COLLATE NOCASE,
    password     TEXT NOT NULL,
    country_name TEXT,
    created_at   INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS videos (
    id                     INTEGER PRIMARY KEY AUTOINCREMENT,
    video_id               TEXT NOT NULL,
    trending_date          TEXT NOT NULL,
    title                  TEXT NOT NULL,
    channel_title          TEXT NOT NULL,
    category_id            INTEGER NOT NULL,
    publish_time           TEXT NOT NULL,
    tags                   TEXT NOT NULL DEFAULT '',
    views                  INTEGER NOT NULL DEFAULT 0,
    likes                  INTEGER NOT NULL DEFAULT 0,
    dislikes               INTEGER NOT NULL DEFAULT 0,
    comment_count          INTEGER NOT NULL DEFAULT 0,
    comments_disabled      INTEGER NOT NULL DEFAULT 0,
    ratings_disabled       INTEGER NOT NULL DEFAULT 0,
    video_error_or_removed INTEGER NOT NULL DEFAULT 0,
    country                TEXT NOT NULL,
    sentiment_score        REAL
);

CREATE INDEX IF NOT EXISTS idx_videos_country_date
    ON videos(country, trending_date);
CREATE INDEX IF NOT EXISTS idx_videos_category_date
    ON videos(category_id, trending_date);
CREATE INDEX IF NOT EXISTS idx_videos_video_id
    ON videos(video_id);

CREATE TABLE IF NOT EXISTS events (
    event_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    event_name  TEXT NOT NULL,
    country     TEXT,
    start_date  TEXT NOT NULL,
    end_date    TEXT NOT NULL,
    description TEXT
);

CREATE INDEX IF NOT EXISTS idx_events_name
    ON events(event_name COLLATE NOCASE);
"#;

/// Create any missing tables and indexes. Safe to run on every start.
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    tracing::debug!("schema ensured");
    Ok(())
}
