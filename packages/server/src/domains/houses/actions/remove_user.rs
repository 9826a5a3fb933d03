//! Remove user action - soft-deletes a membership

use tracing::info;

use crate::common::{HouseId, UserId};
use crate::domains::houses::error::HouseError;
use crate::domains::houses::models::Membership;
use crate::kernel::ServerDeps;

/// Deactivate `target_id`'s membership in a house.
///
/// The acting user must be an active member and satisfy the configured
/// removal policy. The membership row and its ledger entries are kept; only
/// the active flag is cleared. Balances are not checked.
///
/// Returns the membership as it was before deactivation.
pub async fn remove_user(
    house_id: HouseId,
    acting_user_id: UserId,
    target_user_id: UserId,
    deps: &ServerDeps,
) -> Result<Membership, HouseError> {
    let mut tx = deps.db_pool.begin().await?;

    let actor = Membership::find_active(house_id, acting_user_id, &mut *tx)
        .await?
        .ok_or_else(|| {
            HouseError::unauthorized("You are not permitted to remove a user from this house")
        })?;

    if !Membership::is_active_member(house_id, target_user_id, &mut *tx).await? {
        return Err(HouseError::NotAMember);
    }

    deps.removal_policy.check(&actor, target_user_id)?;

    let prior = Membership::deactivate(house_id, target_user_id, acting_user_id, &mut *tx)
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent removal.
            HouseError::NotFound(_) => HouseError::NotAMember,
            other => other,
        })?;

    tx.commit().await?;

    info!(
        house_id = %house_id,
        user_id = %target_user_id,
        removed_by = %acting_user_id,
        "User removed from house"
    );

    Ok(prior)
}
