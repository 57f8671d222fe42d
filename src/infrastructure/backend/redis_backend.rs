//! Redis-backed store implementation.

use super::service::{BackendError, BackendResult, RedirectBackend, ScanPage};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

/// Redis implementation of the redirect store.
///
/// Keys are the raw `from` paths and values the `to` paths, with no key
/// prefix: the service owns its Redis database, which keeps `DBSIZE` usable
/// as the total redirect count. Uses `ConnectionManager` for connection
/// reuse and reconnection.
pub struct RedisBackend {
    client: ConnectionManager,
}

impl RedisBackend {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> BackendResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            BackendError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| BackendError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| BackendError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl RedirectBackend for RedisBackend {
    async fn get(&self, key: &str) -> BackendResult<String> {
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(BackendError::NotFound(key.to_string())),
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                Err(BackendError::Operation(e.to_string()))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        let mut conn = self.client.clone();

        conn.set::<_, _, ()>(key, value).await.map_err(|e| {
            error!("Redis SET error for {}: {}", key, e);
            BackendError::Operation(e.to_string())
        })?;

        debug!("Stored redirect {} -> {}", key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> BackendResult<()> {
        let mut conn = self.client.clone();

        let deleted = conn.del::<_, i64>(key).await.map_err(|e| {
            error!("Redis DEL error for {}: {}", key, e);
            BackendError::Operation(e.to_string())
        })?;

        if deleted == 0 {
            return Err(BackendError::NotFound(key.to_string()));
        }

        debug!("Deleted redirect {}", key);
        Ok(())
    }

    async fn scan(&self, count: i64, cursor: u64) -> BackendResult<ScanPage> {
        let mut conn = self.client.clone();

        let mut cmd = redis::cmd("SCAN");
        cmd.arg(cursor);
        // Redis rejects COUNT 0; omitting the hint falls back to the server
        // default, which is what a degenerate count means here.
        if count > 0 {
            cmd.arg("COUNT").arg(count);
        }

        let (next_cursor, keys): (u64, Vec<String>) = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Redis SCAN error at cursor {}: {}", cursor, e);
                BackendError::Operation(e.to_string())
            })?;

        let mut page = ScanPage {
            next_cursor,
            ..ScanPage::default()
        };

        if keys.is_empty() {
            return Ok(page);
        }

        let values: Vec<Option<String>> = conn.mget(&keys).await.map_err(|e| {
            error!("Redis MGET error: {}", e);
            BackendError::Operation(e.to_string())
        })?;

        for (key, value) in keys.into_iter().zip(values) {
            // A key can vanish between SCAN and MGET; skip it rather than
            // report an empty destination.
            if let Some(value) = value {
                page.pairs.insert(key, value);
            }
        }

        Ok(page)
    }

    async fn count_all(&self) -> BackendResult<i64> {
        let mut conn = self.client.clone();

        redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Redis DBSIZE error: {}", e);
                BackendError::Operation(e.to_string())
            })
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
