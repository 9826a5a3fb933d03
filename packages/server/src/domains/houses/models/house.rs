use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgExecutor, PgPool};

use crate::common::validation::{char_len, is_blank};
use crate::common::{HouseId, UserId};
use crate::domains::houses::error::HouseError;

pub const NAME_MIN_CHARS: usize = 4;
pub const NAME_MAX_CHARS: usize = 56;
pub const DESCRIPTION_MAX_CHARS: usize = 280;

/// House row - identity and metadata of a household.
///
/// Houses are never deleted; membership and ledger rows reference them forever.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct House {
    pub id: HouseId,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub created_by: UserId,
    pub updated_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of house metadata. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct HousePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl HousePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.image.is_none()
    }

    pub fn validate(&self) -> Result<(), HouseError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description_length(description)?;
        }
        Ok(())
    }
}

/// Validates the name and description of a house about to be created.
pub fn validate_new_house(name: &str, description: &str) -> Result<(), HouseError> {
    validate_name(name)?;
    if is_blank(description) {
        return Err(HouseError::validation("description is required"));
    }
    validate_description_length(description)
}

fn validate_name(name: &str) -> Result<(), HouseError> {
    if is_blank(name) {
        return Err(HouseError::validation("name is required"));
    }
    reject_nul("name", name)?;
    // Names are stored trimmed, so padding does not count.
    let len = char_len(name.trim());
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(HouseError::validation(format!(
            "name must be between {} and {} characters",
            NAME_MIN_CHARS, NAME_MAX_CHARS
        )));
    }
    Ok(())
}

fn validate_description_length(description: &str) -> Result<(), HouseError> {
    reject_nul("description", description)?;
    if char_len(description.trim()) > DESCRIPTION_MAX_CHARS {
        return Err(HouseError::validation(format!(
            "description may not exceed {} characters",
            DESCRIPTION_MAX_CHARS
        )));
    }
    Ok(())
}

/// Postgres text columns cannot hold NUL bytes.
fn reject_nul(field: &str, value: &str) -> Result<(), HouseError> {
    if value.contains('\0') {
        return Err(HouseError::validation(format!(
            "{} may not contain NUL characters",
            field
        )));
    }
    Ok(())
}

impl House {
    /// Insert a new house after validating its details.
    ///
    /// Name and description are stored trimmed.
    pub async fn create<'e>(
        name: &str,
        description: &str,
        image: Option<&str>,
        creator_id: UserId,
        db: impl PgExecutor<'e>,
    ) -> Result<Self, HouseError> {
        validate_new_house(name, description)?;

        let house = sqlx::query_as::<_, Self>(
            "INSERT INTO houses (id, name, description, image, created_by, updated_by)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING *",
        )
        .bind(HouseId::new())
        .bind(name.trim())
        .bind(description.trim())
        .bind(image)
        .bind(creator_id)
        .fetch_one(db)
        .await?;

        Ok(house)
    }

    /// Find house by ID
    pub async fn get<'e>(id: HouseId, db: impl PgExecutor<'e>) -> Result<Self, HouseError> {
        sqlx::query_as::<_, Self>("SELECT * FROM houses WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| HouseError::NotFound(format!("house {}", id)))
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, HouseError> {
        sqlx::query_as::<_, Self>("SELECT * FROM houses ORDER BY created_at")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Apply a partial update, stamping `updated_by` with the acting user.
    ///
    /// Membership of `actor_id` is checked by the calling action.
    pub async fn update<'e>(
        id: HouseId,
        patch: &HousePatch,
        actor_id: UserId,
        db: impl PgExecutor<'e>,
    ) -> Result<Self, HouseError> {
        patch.validate()?;

        sqlx::query_as::<_, Self>(
            "UPDATE houses
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 image = COALESCE($4, image),
                 updated_by = $5,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(patch.name.as_deref().map(str::trim))
        .bind(patch.description.as_deref().map(str::trim))
        .bind(patch.image.as_deref())
        .bind(actor_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| HouseError::NotFound(format!("house {}", id)))
    }
}
