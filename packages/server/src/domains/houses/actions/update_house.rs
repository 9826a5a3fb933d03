//! Update house action - members edit name, description or image

use tracing::info;

use crate::common::{HouseId, UserId};
use crate::domains::houses::error::HouseError;
use crate::domains::houses::models::{House, HousePatch, ImageUpload, Membership};
use crate::kernel::ServerDeps;

/// Fields a member may change. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateHouse {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Apply `input` to a house the actor belongs to, stamping `updated_by`.
///
/// A new image is stored before the row is updated and stays stored if the
/// update then fails.
pub async fn update_house(
    house_id: HouseId,
    actor_id: UserId,
    input: UpdateHouse,
    deps: &ServerDeps,
) -> Result<House, HouseError> {
    let mut patch = HousePatch {
        name: input.name,
        description: input.description,
        image: None,
    };
    patch.validate()?;
    if patch.is_empty() && input.image.is_none() {
        return Err(HouseError::validation("nothing to update"));
    }
    if let Some(upload) = &input.image {
        upload.validate()?;
    }

    if !Membership::is_active_member(house_id, actor_id, &deps.db_pool).await? {
        return Err(HouseError::unauthorized("You do not belong to this house"));
    }

    if let Some(upload) = &input.image {
        let image_ref = deps.image_storage.store(upload).await.map_err(|e| {
            HouseError::OperationFailed(format!("failed to store image: {}", e))
        })?;
        patch.image = Some(image_ref);
    }

    let house = House::update(house_id, &patch, actor_id, &deps.db_pool).await?;

    info!(house_id = %house_id, updated_by = %actor_id, "House updated");

    Ok(house)
}
