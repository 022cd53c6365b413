use crate::error::{AppError, AppResult, LoggedJson};
use crate::state::SharedState;
use crate::users::password;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use deadpool_sqlite::Pool;
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

/// A user row without the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub user_id: i64,
    pub user_name: String,
    pub email: Option<String>,
    pub country_name: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub user_name: String,
    pub password: String,
    pub country_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {e}")))
}

/// GET /api/users/get
pub async fn list_users(State(state): State<SharedState>) -> AppResult<Json<Vec<UserSummary>>> {
    let users = select_users(&state.pool)
        .await
        .map_err(|e| e.context("Error fetching data"))?;
    tracing::debug!(count = users.len(), "listed users");
    Ok(Json(users))
}

async fn select_users(pool: &Pool) -> AppResult<Vec<UserSummary>> {
    let conn = pool.get().await?;
    let users = conn
        .interact(|conn| {
            let mut stmt = conn.prepare(
                r#"SELECT user_id, user_name, email, country_name, created_at
                   FROM "User" ORDER BY user_id"#,
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(UserSummary {
                        user_id: row.get(0)?,
                        user_name: row.get(1)?,
                        email: row.get(2)?,
                        country_name: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, rusqlite::Error>(rows)
        })
        .await??;
    Ok(users)
}

/// POST /api/users/send - Create a user; the password is stored as an argon2id hash.
#[tracing::instrument(skip_all, fields(user_name = %input.user_name))]
pub async fn create_user(
    State(state): State<SharedState>,
    LoggedJson(input): LoggedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if input.user_name.trim().is_empty() {
        return Err(AppError::Validation("user_name is required".to_string()));
    }
    if input.password.is_empty() {
        return Err(AppError::Validation("password is required".to_string()));
    }

    let user_id = insert_user(&state.pool, input)
        .await
        .map_err(|e| e.context("Error inserting data"))?;
    tracing::info!(user_id, "user created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User created successfully",
            "user_id": user_id,
        })),
    ))
}

async fn insert_user(pool: &Pool, input: CreateUser) -> AppResult<i64> {
    let plaintext = input.password;
    let password_hash = blocking(move || password::hash_password(&plaintext)).await??;

    let user_name = input.user_name.trim().to_string();
    let email = trimmed(input.email);
    let country_name = trimmed(input.country_name);
    let now = chrono::Utc::now().timestamp();

    let conn = pool.get().await?;
    let result = conn
        .interact(move |conn| {
            conn.execute(
                r#"INSERT INTO "User" (user_name, email, password, country_name, created_at)
                   VALUES (?1, ?2, ?3, ?4, ?5)"#,
                params![user_name, email, password_hash, country_name, now],
            )?;
            Ok::<_, rusqlite::Error>(conn.last_insert_rowid())
        })
        .await?;

    result.map_err(|e| match e {
        rusqlite::Error::SqliteFailure(ref err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            AppError::Conflict("a user with this email already exists".to_string())
        }
        other => AppError::Database(other),
    })
}

/// POST /api/users/login - 200 `{success, user}` on a match, 401 otherwise.
#[tracing::instrument(skip_all, fields(email = %input.email))]
pub async fn login(
    State(state): State<SharedState>,
    LoggedJson(input): LoggedJson<LoginRequest>,
) -> AppResult<Response> {
    let user = authenticate(&state.pool, input)
        .await
        .map_err(|e| e.context("Internal server error"))?;

    Ok(match user {
        Some(user) => {
            tracing::info!(user_id = user.user_id, "login succeeded");
            Json(LoginResponse {
                success: true,
                user: Some(user),
                message: None,
            })
            .into_response()
        }
        None => {
            tracing::warn!("login failed: invalid credentials");
            (
                StatusCode::UNAUTHORIZED,
                Json(LoginResponse {
                    success: false,
                    user: None,
                    message: Some("Invalid credentials".to_string()),
                }),
            )
                .into_response()
        }
    })
}

async fn authenticate(pool: &Pool, input: LoginRequest) -> AppResult<Option<UserSummary>> {
    let email = input.email.trim().to_string();

    let conn = pool.get().await?;
    let stored = conn
        .interact(move |conn| {
            conn.query_row(
                r#"SELECT user_id, user_name, email, country_name, created_at, password
                   FROM "User" WHERE email = ?1"#,
                [email],
                |row| {
                    Ok((
                        UserSummary {
                            user_id: row.get(0)?,
                            user_name: row.get(1)?,
                            email: row.get(2)?,
                            country_name: row.get(3)?,
                            created_at: row.get(4)?,
                        },
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()
        })
        .await??;
    // Hash verification does not need the connection
    drop(conn);

    let candidate = input.password;
    blocking(move || match stored {
        Some((user, hash)) => password::verify_password(&hash, &candidate).then_some(user),
        None => {
            password::verify_password(password::DUMMY_HASH, &candidate);
            None
        }
    })
    .await
}
