//! Credential store queries

use sqlx::SqlitePool;

/// User row from the credential store
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: i64,
    pub username: String,
    /// Salted argon2 hash, never the plaintext
    pub password: String,
}

/// Look up a user by id
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>("SELECT user_id, username, password FROM users WHERE user_id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Look up a user by exact username match
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        "SELECT user_id, username, password FROM users WHERE username = ?1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Insert a new user, returning its id
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> sqlx::Result<i64> {
    let result = sqlx::query("INSERT INTO users (username, password) VALUES (?1, ?2)")
        .bind(username)
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let pool = setup_pool().await;

        let id = create_user(&pool, "alice", "hash").await.unwrap();

        let by_id = get_user(&pool, id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        let by_name = get_user_by_username(&pool, "alice").await.unwrap().unwrap();
        assert_eq!(by_name.user_id, id);
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_none() {
        let pool = setup_pool().await;

        assert!(get_user(&pool, 42).await.unwrap().is_none());
        assert!(get_user_by_username(&pool, "nobody")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_by_constraint() {
        let pool = setup_pool().await;

        create_user(&pool, "alice", "hash").await.unwrap();
        assert!(create_user(&pool, "alice", "other").await.is_err());
    }
}
