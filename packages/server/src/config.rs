use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::houses::{RemovalPolicy, Role};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub removal_policy: RemovalPolicy,
    pub notification_webhook_url: Option<String>,
    pub notification_webhook_token: Option<String>,
    pub avatar_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            removal_policy: parse_removal_policy(env::var("REMOVE_MEMBER_MIN_ROLE").ok())?,
            notification_webhook_url: env::var("NOTIFICATION_WEBHOOK_URL").ok(),
            notification_webhook_token: env::var("NOTIFICATION_WEBHOOK_TOKEN").ok(),
            avatar_dir: env::var("AVATAR_DIR")
                .unwrap_or_else(|_| "./storage/avatars".to_string()),
        })
    }
}

/// `REMOVE_MEMBER_MIN_ROLE` is the weakest role (1-9) still allowed to remove others.
fn parse_removal_policy(raw: Option<String>) -> Result<RemovalPolicy> {
    let Some(raw) = raw else {
        return Ok(RemovalPolicy::default());
    };

    let value: i64 = raw
        .trim()
        .parse()
        .context("REMOVE_MEMBER_MIN_ROLE must be a number between 1 and 9")?;
    let role = Role::new(value).context("REMOVE_MEMBER_MIN_ROLE out of range")?;

    Ok(RemovalPolicy::new(role))
}
