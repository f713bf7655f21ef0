use std::sync::Arc;

use crate::config::AppConfig;
use crate::db;
use crate::users::{repo::UserStore, PgUserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// Connects, migrates and wires the Postgres store. Any failure here is fatal.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config.database).await?;
        db::migrate(&pool).await?;
        Ok(Self::from_parts(Arc::new(PgUserStore::new(pool))))
    }

    pub fn from_parts(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
