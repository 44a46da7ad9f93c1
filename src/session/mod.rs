//! Server-side sessions keyed by an opaque token carried in a cookie.

mod memory_store;
mod redis_store;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{Config, SessionBackend};
use crate::entities::sea_orm_active_enums::UserRole;

pub use memory_store::InMemorySessionStore;
pub use redis_store::RedisSessionStore;

/// What a logged-in request knows about its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i32,
    pub role: UserRole,
    pub name: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores the user and returns the new session token.
    async fn create(&self, user: SessionUser) -> Result<String>;

    async fn get(&self, token: &str) -> Result<Option<SessionUser>>;

    async fn remove(&self, token: &str) -> Result<()>;
}

pub async fn build_session_store(config: &Config) -> Result<Arc<dyn SessionStore>> {
    match config.session_backend {
        SessionBackend::Memory => {
            tracing::info!("Using in-memory session store");
            Ok(Arc::new(InMemorySessionStore::new(config.session_ttl_seconds)))
        }
        SessionBackend::Redis => {
            tracing::info!("Using Redis session store at {}", config.redis_url);
            let store = RedisSessionStore::connect(&config.redis_url, config.session_ttl_seconds)
                .await
                .context("Failed to initialize Redis session store")?;
            Ok(Arc::new(store))
        }
    }
}
