//! Server dependencies for house actions (using traits for testability)
//!
//! This module provides the central dependency container passed to every action.
//! All external services use trait abstractions to enable testing.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::houses::RemovalPolicy;
use crate::kernel::background::BackgroundTasks;
use crate::kernel::{BaseIdentityProvider, BaseImageStorage, BaseNotificationService};

/// Dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub identity: Arc<dyn BaseIdentityProvider>,
    pub notifications: Arc<dyn BaseNotificationService>,
    pub image_storage: Arc<dyn BaseImageStorage>,
    pub removal_policy: RemovalPolicy,
    /// Post-commit work such as invite notices
    pub background: BackgroundTasks,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        identity: Arc<dyn BaseIdentityProvider>,
        notifications: Arc<dyn BaseNotificationService>,
        image_storage: Arc<dyn BaseImageStorage>,
        removal_policy: RemovalPolicy,
    ) -> Self {
        Self {
            db_pool,
            identity,
            notifications,
            image_storage,
            removal_policy,
            background: BackgroundTasks::new(),
        }
    }
}
