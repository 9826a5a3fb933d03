use crate::common::UserId;
use crate::domains::houses::error::HouseError;
use crate::domains::houses::models::{Membership, Role};

/// Who may remove members from a house.
///
/// Removing yourself is always allowed. Removing someone else requires a role
/// at least as privileged as `min_role_to_remove_others`. The default is the
/// lowest role, so any active member may remove any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalPolicy {
    pub min_role_to_remove_others: Role,
}

impl Default for RemovalPolicy {
    fn default() -> Self {
        Self {
            min_role_to_remove_others: Role::LOWEST,
        }
    }
}

impl RemovalPolicy {
    pub fn new(min_role_to_remove_others: Role) -> Self {
        Self {
            min_role_to_remove_others,
        }
    }

    /// Check that `actor` (already known to be an active member) may remove `target_id`.
    pub fn check(&self, actor: &Membership, target_id: UserId) -> Result<(), HouseError> {
        if actor.user_id == target_id || actor.role.meets(self.min_role_to_remove_others) {
            return Ok(());
        }

        Err(HouseError::unauthorized(format!(
            "role {} may not remove other members (requires role {} or higher)",
            actor.role.value(),
            self.min_role_to_remove_others.value()
        )))
    }
}
