//! Create house action - a house plus its owner's membership and ledger pair

use tracing::info;
use typed_builder::TypedBuilder;

use crate::common::UserId;
use crate::domains::houses::error::HouseError;
use crate::domains::houses::models::{
    validate_new_house, House, ImageUpload, LedgerEntry, Membership, Role,
};
use crate::kernel::ServerDeps;

/// Input for [`create_house`].
#[derive(Debug, Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct CreateHouse {
    pub name: String,
    pub description: String,
    #[builder(default)]
    pub image: Option<ImageUpload>,
}

/// Create a house and make the creator its owner.
///
/// This action:
/// 1. Validates name, description and the optional image
/// 2. Stores the image (outside the transaction)
/// 3. In one transaction: inserts the house, the creator's role 1 membership
///    and the creator's zero-value crate/beer entries
///
/// Nothing is persisted in the database if any step of the transaction fails.
/// A stored image is not removed on failure: storage is content-addressed, so
/// the same file may already back another house.
pub async fn create_house(
    input: CreateHouse,
    creator_id: UserId,
    deps: &ServerDeps,
) -> Result<House, HouseError> {
    validate_new_house(&input.name, &input.description)?;

    let image = match &input.image {
        Some(upload) => {
            upload.validate()?;
            let image_ref = deps.image_storage.store(upload).await.map_err(|e| {
                HouseError::OperationFailed(format!("failed to store image: {}", e))
            })?;
            Some(image_ref)
        }
        None => None,
    };

    let mut tx = deps.db_pool.begin().await?;

    let house = House::create(
        &input.name,
        &input.description,
        image.as_deref(),
        creator_id,
        &mut *tx,
    )
    .await?;

    // A brand new house has no members, so this cannot be a duplicate.
    let membership =
        Membership::create(house.id, creator_id, Role::OWNER, creator_id, &mut *tx).await?;

    LedgerEntry::initialize(membership.id, house.id, creator_id, creator_id, &mut *tx).await?;

    tx.commit().await?;

    info!(house_id = %house.id, creator_id = %creator_id, "House created");

    Ok(house)
}
