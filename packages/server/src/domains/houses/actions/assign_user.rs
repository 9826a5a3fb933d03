//! Assign user action - an existing member adds someone to the house by email

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::common::validation::is_valid_email;
use crate::common::{HouseId, UserId};
use crate::domains::houses::error::HouseError;
use crate::domains::houses::models::{House, LedgerEntry, Membership, Role};
use crate::kernel::{HouseInviteNotice, ServerDeps};

/// Add the user owning `user_email` to a house with the given role.
///
/// This action:
/// 1. Validates the role (1-9) and the email syntax
/// 2. Requires the inviter to be an active member of the house
/// 3. Resolves the email to a user (`UserNotFound` otherwise)
/// 4. In one transaction: activates the membership (`DuplicateMembership` if
///    already active) and opens the invitee's crate/beer entries, stamped with
///    the inviter
/// 5. Sends the invite notice in the background; delivery failures are logged only
pub async fn assign_user(
    house_id: HouseId,
    inviter_id: UserId,
    user_email: &str,
    role: i64,
    deps: &ServerDeps,
) -> Result<Membership, HouseError> {
    let role = Role::new(role)?;
    if !is_valid_email(user_email) {
        return Err(HouseError::validation(
            "user_email must be a valid email address",
        ));
    }

    if !Membership::is_active_member(house_id, inviter_id, &deps.db_pool).await? {
        return Err(HouseError::unauthorized(
            "You are not permitted to add a user to this house",
        ));
    }

    let user_id = deps
        .identity
        .resolve_by_email(user_email)
        .await
        .map_err(|e| HouseError::OperationFailed(format!("identity lookup failed: {}", e)))?
        .ok_or_else(|| HouseError::UserNotFound(user_email.trim().to_string()))?;

    debug!(house_id = %house_id, user_id = %user_id, "Resolved invitee");

    let mut tx = deps.db_pool.begin().await?;

    let membership = Membership::create(house_id, user_id, role, inviter_id, &mut *tx).await?;

    LedgerEntry::initialize(membership.id, house_id, user_id, inviter_id, &mut *tx).await?;

    tx.commit().await?;

    info!(
        house_id = %house_id,
        user_id = %user_id,
        inviter_id = %inviter_id,
        role = role.value(),
        activation_seq = membership.activation_seq,
        "User assigned to house"
    );

    spawn_invite_notice(deps, house_id, user_id, inviter_id);

    Ok(membership)
}

/// Fire-and-forget delivery of the invite notice.
fn spawn_invite_notice(
    deps: &ServerDeps,
    house_id: HouseId,
    invitee_id: UserId,
    inviter_id: UserId,
) {
    let task_deps = deps.clone();
    deps.background.spawn(async move {
        if let Err(e) = send_invite_notice(&task_deps, house_id, invitee_id, inviter_id).await {
            warn!(
                error = %e,
                house_id = %house_id,
                user_id = %invitee_id,
                "Failed to send house invite notice"
            );
        }
    });
}

async fn send_invite_notice(
    deps: &ServerDeps,
    house_id: HouseId,
    invitee_id: UserId,
    inviter_id: UserId,
) -> Result<()> {
    let house = House::get(house_id, &deps.db_pool).await?;

    let notice = HouseInviteNotice {
        to_email: deps.identity.email(invitee_id).await?,
        to_name: deps.identity.name(invitee_id).await?,
        house_name: house.name,
        inviter_name: deps.identity.name(inviter_id).await?,
    };

    deps.notifications.send_house_invite_notice(&notice).await
}
