//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container per test binary, started and migrated on first use,
//! then shared by every test in that binary.

use anyhow::{Context, Result};
use house_core::domains::houses::RemovalPolicy;
use house_core::kernel::{
    MockImageStorage, MockNotificationService, PostgresIdentityProvider, ServerDeps,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Per-test context: a fresh pool plus dependencies wired with mocks.
///
/// Identity resolution is real (Postgres `users` table); notifications and
/// image storage are mocks the test can inspect.
pub struct TestHarness {
    pub db_pool: PgPool,
    pub notifications: MockNotificationService,
    pub images: MockImageStorage,
    pub deps: ServerDeps,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        Self::build(MockNotificationService::new(), RemovalPolicy::default()).await
    }

    /// Harness whose notification service fails every delivery.
    pub async fn with_failing_notifications() -> Result<Self> {
        Self::build(MockNotificationService::failing(), RemovalPolicy::default()).await
    }

    pub async fn with_removal_policy(policy: RemovalPolicy) -> Result<Self> {
        Self::build(MockNotificationService::new(), policy).await
    }

    async fn build(notifications: MockNotificationService, policy: RemovalPolicy) -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPoolOptions::new()
            .max_connections(20)
            .connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let images = MockImageStorage::new();
        let deps = ServerDeps::new(
            db_pool.clone(),
            Arc::new(PostgresIdentityProvider::new(db_pool.clone())),
            Arc::new(notifications.clone()),
            Arc::new(images.clone()),
            policy,
        );

        Ok(Self {
            db_pool,
            notifications,
            images,
            deps,
        })
    }

    /// Wait for background work (invite notices) to finish.
    pub async fn settle(&self) {
        self.deps.background.wait_idle().await;
    }
}
