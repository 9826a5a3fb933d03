//! Read-side house operations

use crate::common::{HouseId, UserId};
use crate::domains::houses::error::HouseError;
use crate::domains::houses::models::{House, HouseMember, LedgerEntry, Membership};
use crate::kernel::ServerDeps;

/// The authorization primitive: is `user_id` an active member of the house?
pub async fn user_belongs_to_house(
    house_id: HouseId,
    user_id: UserId,
    deps: &ServerDeps,
) -> Result<bool, HouseError> {
    Membership::is_active_member(house_id, user_id, &deps.db_pool).await
}

pub async fn get_house(house_id: HouseId, deps: &ServerDeps) -> Result<House, HouseError> {
    House::get(house_id, &deps.db_pool).await
}

pub async fn list_houses(deps: &ServerDeps) -> Result<Vec<House>, HouseError> {
    House::list(&deps.db_pool).await
}

/// Active members of a house with names and emails. Only members may look.
pub async fn list_house_members(
    house_id: HouseId,
    actor_id: UserId,
    deps: &ServerDeps,
) -> Result<Vec<HouseMember>, HouseError> {
    if !user_belongs_to_house(house_id, actor_id, deps).await? {
        return Err(HouseError::unauthorized("User does not belong to this house"));
    }

    Membership::members_with_users(house_id, &deps.db_pool).await
}

/// Active memberships of the acting user.
pub async fn houses_for_user(
    actor_id: UserId,
    deps: &ServerDeps,
) -> Result<Vec<Membership>, HouseError> {
    Membership::list_by_user(actor_id, &deps.db_pool).await
}

/// Active memberships of a house.
pub async fn memberships_of_house(
    house_id: HouseId,
    deps: &ServerDeps,
) -> Result<Vec<Membership>, HouseError> {
    Membership::list_by_house(house_id, &deps.db_pool).await
}

/// Every ledger entry of the pair, including those of past activations.
pub async fn ledger_entries_for(
    house_id: HouseId,
    user_id: UserId,
    deps: &ServerDeps,
) -> Result<Vec<LedgerEntry>, HouseError> {
    LedgerEntry::find_for_member(house_id, user_id, &deps.db_pool).await
}

/// Every membership row of the pair, oldest activation first.
pub async fn membership_history(
    house_id: HouseId,
    user_id: UserId,
    deps: &ServerDeps,
) -> Result<Vec<Membership>, HouseError> {
    Membership::history(house_id, user_id, &deps.db_pool).await
}
