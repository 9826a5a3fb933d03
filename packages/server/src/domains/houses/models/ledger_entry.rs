use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgExecutor};
use std::fmt;

use crate::common::{HouseId, LedgerEntryId, MembershipId, UserId};
use crate::domains::houses::error::HouseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ledger_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    Crate,
    Beer,
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerKind::Crate => write!(f, "crate"),
            LedgerKind::Beer => write!(f, "beer"),
        }
    }
}

/// Running balance row for one user in one house.
///
/// Each membership activation owns exactly one `crate` and one `beer` entry.
/// Settlement arithmetic lives elsewhere; this model only opens the pair.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct LedgerEntry {
    pub id: LedgerEntryId,
    pub membership_id: MembershipId,
    pub house_id: HouseId,
    pub user_id: UserId,
    pub kind: LedgerKind,
    pub value: i64,
    pub performed_by_user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Open the zero-value crate/beer pair for a freshly activated membership.
    ///
    /// Must run exactly once per activation, inside the transaction that
    /// created the membership. Any failure is reported as `OperationFailed`
    /// so the caller rolls the activation back.
    pub async fn initialize(
        membership_id: MembershipId,
        house_id: HouseId,
        user_id: UserId,
        performed_by: UserId,
        conn: &mut PgConnection,
    ) -> Result<(Self, Self), HouseError> {
        let now = Utc::now();
        let crate_entry = Self::insert_zero(
            membership_id,
            house_id,
            user_id,
            LedgerKind::Crate,
            performed_by,
            now,
            &mut *conn,
        )
        .await?;
        let beer_entry = Self::insert_zero(
            membership_id,
            house_id,
            user_id,
            LedgerKind::Beer,
            performed_by,
            now,
            &mut *conn,
        )
        .await?;

        Ok((crate_entry, beer_entry))
    }

    #[allow(clippy::too_many_arguments)]
    async fn insert_zero(
        membership_id: MembershipId,
        house_id: HouseId,
        user_id: UserId,
        kind: LedgerKind,
        performed_by: UserId,
        now: DateTime<Utc>,
        conn: &mut PgConnection,
    ) -> Result<Self, HouseError> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO ledger_entries (
                id, membership_id, house_id, user_id, kind, value,
                performed_by_user_id, created_at, updated_at
             )
             VALUES ($1, $2, $3, $4, $5, 0, $6, $7, $7)
             RETURNING *",
        )
        .bind(LedgerEntryId::new())
        .bind(membership_id)
        .bind(house_id)
        .bind(user_id)
        .bind(kind)
        .bind(performed_by)
        .bind(now)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            HouseError::OperationFailed(format!("failed to open {} ledger entry: {}", kind, e))
        })
    }

    /// All entries for the pair across every activation, oldest first.
    pub async fn find_for_member<'e>(
        house_id: HouseId,
        user_id: UserId,
        db: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>, HouseError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM ledger_entries
             WHERE house_id = $1 AND user_id = $2
             ORDER BY created_at, kind",
        )
        .bind(house_id)
        .bind(user_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_membership<'e>(
        membership_id: MembershipId,
        db: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>, HouseError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM ledger_entries WHERE membership_id = $1 ORDER BY kind",
        )
        .bind(membership_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }
}
