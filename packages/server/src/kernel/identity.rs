//! Postgres-backed identity provider over the `users` table.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::BaseIdentityProvider;
use crate::common::UserId;
use crate::domains::users::User;

pub struct PostgresIdentityProvider {
    pool: PgPool,
}

impl PostgresIdentityProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn user(&self, user_id: UserId) -> Result<User> {
        User::find_by_id(user_id, &self.pool)
            .await?
            .ok_or_else(|| anyhow!("user {} does not exist", user_id))
    }
}

#[async_trait]
impl BaseIdentityProvider for PostgresIdentityProvider {
    async fn resolve_by_email(&self, email: &str) -> Result<Option<UserId>> {
        Ok(User::find_by_email(email, &self.pool).await?.map(|u| u.id))
    }

    async fn name(&self, user_id: UserId) -> Result<String> {
        Ok(self.user(user_id).await?.name)
    }

    async fn email(&self, user_id: UserId) -> Result<String> {
        Ok(self.user(user_id).await?.email)
    }
}
