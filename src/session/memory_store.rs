use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{SessionStore, SessionUser};
use crate::utils::random::generate_session_token;

struct Entry {
    user: SessionUser,
    expires_at: Instant,
}

pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user: SessionUser) -> Result<String> {
        let token = generate_session_token();
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        // Drop expired entries on the way in so the map stays bounded.
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            token.clone(),
            Entry {
                user,
                expires_at: now + self.ttl,
            },
        );
        Ok(token)
    }

    async fn get(&self, token: &str) -> Result<Option<SessionUser>> {
        let sessions = self.sessions.read().await;
        let user = sessions
            .get(token)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.user.clone());
        Ok(user)
    }

    async fn remove(&self, token: &str) -> Result<()> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::UserRole;

    fn admin() -> SessionUser {
        SessionUser {
            user_id: 1,
            role: UserRole::Admin,
            name: "System Administrator".to_string(),
        }
    }

    #[tokio::test]
    async fn create_get_remove() {
        let store = InMemorySessionStore::new(60);
        let token = store.create(admin()).await.unwrap();

        assert_eq!(store.get(&token).await.unwrap(), Some(admin()));
        assert_eq!(store.get("unknown").await.unwrap(), None);

        store.remove(&token).await.unwrap();
        assert_eq!(store.get(&token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_sessions_are_not_returned() {
        let store = InMemorySessionStore::new(0);
        let token = store.create(admin()).await.unwrap();
        assert_eq!(store.get(&token).await.unwrap(), None);
    }
}
