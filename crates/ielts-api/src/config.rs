use chrono::FixedOffset;
use serde::Deserialize;
use thiserror::Error;

/// Largest offset any real time zone uses, in minutes.
const MAX_UTC_OFFSET_MINUTES: u32 = 14 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment: {0}")]
    Env(#[from] envy::Error),
    #[error("STREAK_UTC_OFFSET_MINUTES must be within ±840 minutes, got {0}")]
    InvalidOffset(i32),
    #[error("RECOMMENDATION_MAX_LIMIT must be at least 1")]
    InvalidRecommendationLimit,
}

/// Server configuration, read from the process environment.
///
/// Field names map to upper-case variables (`database_url` ← `DATABASE_URL`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub database_url: String,
    #[serde(default, rename = "app_env")]
    pub env: Environment,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    /// Comma-separated list of origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    /// Offset that defines where a streak "day" starts
    #[serde(default)]
    pub streak_utc_offset_minutes: i32,
    #[serde(default = "default_recommendation_max_limit")]
    pub recommendation_max_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_db_max_connections() -> u32 {
    10
}

fn default_allowed_origins() -> String {
    "http://localhost:5173".to_string()
}

const fn default_recommendation_max_limit() -> usize {
    20
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        envy::from_env::<Self>()?.validated()
    }

    /// Build from explicit key/value pairs, as [`Self::from_env`] would.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Self>(vars)?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.streak_offset()?;
        if self.recommendation_max_limit == 0 {
            return Err(ConfigError::InvalidRecommendationLimit);
        }
        Ok(self)
    }

    pub fn streak_offset(&self) -> Result<FixedOffset, ConfigError> {
        let minutes = self.streak_utc_offset_minutes;
        if minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::InvalidOffset(minutes));
        }
        FixedOffset::east_opt(minutes * 60).ok_or(ConfigError::InvalidOffset(minutes))
    }

    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
