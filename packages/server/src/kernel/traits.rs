// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Membership rules live in domains/houses/actions and call through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseIdentityProvider)

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::common::UserId;
use crate::domains::houses::models::ImageUpload;

// =============================================================================
// Identity Provider Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseIdentityProvider: Send + Sync {
    /// Resolve an email address to a user, `None` if nobody owns it
    async fn resolve_by_email(&self, email: &str) -> Result<Option<UserId>>;

    /// Display name of a user
    async fn name(&self, user_id: UserId) -> Result<String>;

    /// Email address of a user
    async fn email(&self, user_id: UserId) -> Result<String>;
}

// =============================================================================
// Notification Trait (Infrastructure)
// =============================================================================

/// "You were added to a house" notice sent to an invitee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseInviteNotice {
    pub to_email: String,
    pub to_name: String,
    pub house_name: String,
    pub inviter_name: String,
}

#[async_trait]
pub trait BaseNotificationService: Send + Sync {
    /// Deliver an invite notice. Errors are logged by the caller, never propagated.
    async fn send_house_invite_notice(&self, notice: &HouseInviteNotice) -> Result<()>;
}

// =============================================================================
// Image Storage Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseImageStorage: Send + Sync {
    /// Persist an already validated upload and return an opaque reference to it
    async fn store(&self, upload: &ImageUpload) -> Result<String>;
}
