use chrono::FixedOffset;
use ielts_db::PgStore;
use sqlx::PgPool;

use crate::config::{ApiConfig, ConfigError, Environment};

#[derive(Debug, Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub store: PgStore,
    pub environment: Environment,
    /// Offset whose midnight separates streak days
    pub streak_offset: FixedOffset,
    pub recommendation_max_limit: usize,
}

impl ApiState {
    pub fn new(config: &ApiConfig, pool: PgPool) -> Result<Self, ConfigError> {
        Ok(Self {
            store: PgStore::new(pool.clone()),
            pool,
            environment: config.env,
            streak_offset: config.streak_offset()?,
            recommendation_max_limit: config.recommendation_max_limit,
        })
    }
}
