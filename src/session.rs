//! Server-side session store
//!
//! Sessions live in the `sessions` table, keyed by an opaque random token
//! that the client holds in a cookie. The cookie carries no user data; the
//! user id is resolved server-side on every request.

use sqlx::SqlitePool;
use uuid::Uuid;

/// Create a new session for a user, returning the opaque token
pub async fn create_session(pool: &SqlitePool, user_id: i64) -> sqlx::Result<String> {
    let token = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO sessions (token, user_id) VALUES (?1, ?2)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;

    tracing::debug!(user_id, "Session created");

    Ok(token)
}

/// Resolve the user id a session token belongs to, if any
pub async fn get_session_user_id(pool: &SqlitePool, token: &str) -> sqlx::Result<Option<i64>> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT user_id FROM sessions WHERE token = ?1")
            .bind(token)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(user_id,)| user_id))
}

/// Delete a session; a no-op if the token is unknown
pub async fn delete_session(pool: &SqlitePool, token: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}
