use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::session::SessionStore;
use crate::utils::upload::FileStorage;

/// Shared by every handler through `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub sessions: Arc<dyn SessionStore>,
    pub storage: FileStorage,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config, sessions: Arc<dyn SessionStore>) -> Self {
        let storage = FileStorage::new(&config.storage_root);
        Self {
            db,
            config: Arc::new(config),
            sessions,
            storage,
        }
    }
}
