use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgConnection, PgExecutor};

use crate::common::{HouseId, MembershipId, UserId};
use crate::domains::houses::error::HouseError;

/// Privilege level within a house. 1 is the highest (owner), 9 the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Role(i16);

impl Role {
    pub const OWNER: Role = Role(1);
    pub const LOWEST: Role = Role(9);

    /// Validate a raw role value from user input.
    pub fn new(value: i64) -> Result<Self, HouseError> {
        if (1..=9).contains(&value) {
            Ok(Role(value as i16))
        } else {
            Err(HouseError::validation(format!(
                "role must be between 1 and 9, got {}",
                value
            )))
        }
    }

    pub fn value(self) -> i16 {
        self.0
    }

    /// True if this role is as privileged as `threshold` or more (lower number).
    pub fn meets(self, threshold: Role) -> bool {
        self.0 <= threshold.0
    }
}

/// One activation of a user in a house.
///
/// The table is an append-only log: removal flips `active` off and a later
/// re-assignment appends a new row with the next `activation_seq`.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Membership {
    pub id: MembershipId,
    pub house_id: HouseId,
    pub user_id: UserId,
    pub role: Role,
    pub active: bool,
    pub activation_seq: i32,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub deactivated_at: Option<DateTime<Utc>>,
    pub deactivated_by: Option<UserId>,
}

/// Active member of a house joined with their identity details.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct HouseMember {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    /// True iff an active membership exists for the pair.
    pub async fn is_active_member<'e>(
        house_id: HouseId,
        user_id: UserId,
        db: impl PgExecutor<'e>,
    ) -> Result<bool, HouseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM house_memberships
                WHERE house_id = $1 AND user_id = $2 AND active
             )",
        )
        .bind(house_id)
        .bind(user_id)
        .fetch_one(db)
        .await?;

        Ok(exists)
    }

    pub async fn find_active<'e>(
        house_id: HouseId,
        user_id: UserId,
        db: impl PgExecutor<'e>,
    ) -> Result<Option<Self>, HouseError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM house_memberships
             WHERE house_id = $1 AND user_id = $2 AND active",
        )
        .bind(house_id)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(Into::into)
    }

    /// Activate a membership for the pair.
    ///
    /// Fails with `DuplicateMembership` if the pair is already active. The
    /// partial unique index makes the check atomic with the insert, so a
    /// concurrent activation surfaces as the same error.
    pub async fn create(
        house_id: HouseId,
        user_id: UserId,
        role: Role,
        created_by: UserId,
        conn: &mut PgConnection,
    ) -> Result<Self, HouseError> {
        if Self::is_active_member(house_id, user_id, &mut *conn).await? {
            return Err(HouseError::DuplicateMembership);
        }

        sqlx::query_as::<_, Self>(
            "INSERT INTO house_memberships (id, house_id, user_id, role, active, activation_seq, created_by)
             VALUES (
                $1, $2, $3, $4, TRUE,
                COALESCE(
                    (SELECT MAX(activation_seq) FROM house_memberships
                     WHERE house_id = $2 AND user_id = $3),
                    0
                ) + 1,
                $5
             )
             RETURNING *",
        )
        .bind(MembershipId::new())
        .bind(house_id)
        .bind(user_id)
        .bind(role)
        .bind(created_by)
        .fetch_one(&mut *conn)
        .await
        .map_err(Into::into)
    }

    /// Soft-delete the active membership of the pair.
    ///
    /// Returns the row as it was before deactivation. Fails with `NotFound`
    /// if the pair has no active membership.
    pub async fn deactivate(
        house_id: HouseId,
        user_id: UserId,
        deactivated_by: UserId,
        conn: &mut PgConnection,
    ) -> Result<Self, HouseError> {
        let prior = sqlx::query_as::<_, Self>(
            "SELECT * FROM house_memberships
             WHERE house_id = $1 AND user_id = $2 AND active
             FOR UPDATE",
        )
        .bind(house_id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| {
            HouseError::NotFound(format!(
                "no active membership for user {} in house {}",
                user_id, house_id
            ))
        })?;

        sqlx::query(
            "UPDATE house_memberships
             SET active = FALSE, deactivated_at = NOW(), deactivated_by = $2
             WHERE id = $1",
        )
        .bind(prior.id)
        .bind(deactivated_by)
        .execute(&mut *conn)
        .await?;

        Ok(prior)
    }

    /// Active memberships of a user across all houses.
    pub async fn list_by_user<'e>(
        user_id: UserId,
        db: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>, HouseError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM house_memberships
             WHERE user_id = $1 AND active
             ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    /// Active memberships of a house.
    pub async fn list_by_house<'e>(
        house_id: HouseId,
        db: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>, HouseError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM house_memberships
             WHERE house_id = $1 AND active
             ORDER BY role, created_at",
        )
        .bind(house_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    /// Every membership row of the pair, active or not, oldest first.
    pub async fn history<'e>(
        house_id: HouseId,
        user_id: UserId,
        db: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>, HouseError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM house_memberships
             WHERE house_id = $1 AND user_id = $2
             ORDER BY activation_seq",
        )
        .bind(house_id)
        .bind(user_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    pub async fn members_with_users<'e>(
        house_id: HouseId,
        db: impl PgExecutor<'e>,
    ) -> Result<Vec<HouseMember>, HouseError> {
        sqlx::query_as::<_, HouseMember>(
            "SELECT u.id AS user_id, u.name, u.email, m.role, m.created_at AS joined_at
             FROM house_memberships m
             JOIN users u ON u.id = m.user_id
             WHERE m.house_id = $1 AND m.active
             ORDER BY m.role, m.created_at",
        )
        .bind(house_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }
}
