//! Kernel module - infrastructure traits, adapters and the dependency container.

pub mod background;
pub mod deps;
pub mod identity;
pub mod notifications;
pub mod storage;
pub mod test_dependencies;
pub mod traits;

pub use background::BackgroundTasks;
pub use deps::ServerDeps;
pub use identity::PostgresIdentityProvider;
pub use notifications::{
    create_notification_service, NoopNotificationService, WebhookNotificationService,
};
pub use storage::LocalImageStorage;
pub use test_dependencies::{MockImageStorage, MockNotificationService};
pub use traits::*;
