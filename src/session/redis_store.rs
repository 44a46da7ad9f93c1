use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use super::{SessionStore, SessionUser};
use crate::utils::random::generate_session_token;

pub struct RedisSessionStore {
    connection: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("Failed to create Redis client")?;
        let mut connection = client
            .get_connection_manager()
            .await
            .context("Failed to get Redis connection")?;

        let _: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .context("Failed to ping Redis")?;

        Ok(Self {
            connection,
            ttl_seconds,
        })
    }

    fn key(token: &str) -> String {
        format!("ojt:session:{}", token)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user: SessionUser) -> Result<String> {
        let token = generate_session_token();
        let json = serde_json::to_string(&user).context("Failed to serialize session")?;
        let mut redis = self.connection.clone();
        let _: () = redis
            .set_ex(Self::key(&token), json, self.ttl_seconds)
            .await?;
        Ok(token)
    }

    async fn get(&self, token: &str) -> Result<Option<SessionUser>> {
        let mut redis = self.connection.clone();
        match redis.get::<_, Option<String>>(Self::key(token)).await? {
            Some(json) => {
                let user = serde_json::from_str(&json).context("Failed to deserialize session")?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, token: &str) -> Result<()> {
        let mut redis = self.connection.clone();
        let _: () = redis.del(Self::key(token)).await?;
        Ok(())
    }
}
