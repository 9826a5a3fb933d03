//! Test fixtures for creating test data.
//!
//! Every fixture generates unique emails so tests can share one database.

use anyhow::Result;
use house_core::common::UserId;
use house_core::domains::houses::actions::{create_house, CreateHouse};
use house_core::domains::houses::House;
use house_core::domains::users::User;
use house_core::kernel::ServerDeps;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a user with a unique email derived from `name`
pub async fn create_test_user(pool: &PgPool, name: &str) -> Result<User> {
    let email = format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4());
    User::create(name, &email, pool).await
}

/// Create a house owned by `creator_id`
pub async fn create_test_house(deps: &ServerDeps, creator_id: UserId, name: &str) -> Result<House> {
    let input = CreateHouse::builder()
        .name(name)
        .description("A house for testing")
        .build();
    Ok(create_house(input, creator_id, deps).await?)
}

/// Count ledger entries of one kind for the pair, across all activations
pub async fn count_ledger_entries(
    pool: &PgPool,
    house_id: Uuid,
    user_id: Uuid,
    kind: &str,
) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM ledger_entries
         WHERE house_id = $1 AND user_id = $2 AND kind::text = $3",
    )
    .bind(house_id)
    .bind(user_id)
    .bind(kind)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Make every ledger insert for `user_id` fail with a database error.
///
/// The trigger only fires for that user, so other tests sharing the
/// database are unaffected.
pub async fn fail_ledger_inserts_for(pool: &PgPool, user_id: Uuid) -> Result<()> {
    let name = format!("reject_ledger_{}", user_id.simple());
    let sql = format!(
        "CREATE FUNCTION {name}() RETURNS trigger AS $$
         BEGIN
             IF NEW.user_id = '{user_id}'::uuid THEN
                 RAISE EXCEPTION 'ledger unavailable';
             END IF;
             RETURN NEW;
         END;
         $$ LANGUAGE plpgsql;

         CREATE TRIGGER {name}
         BEFORE INSERT ON ledger_entries
         FOR EACH ROW EXECUTE FUNCTION {name}();"
    );
    sqlx::raw_sql(&sql).execute(pool).await?;

    Ok(())
}

/// Count membership rows (active or not) for a user across all houses
pub async fn count_memberships(pool: &PgPool, user_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM house_memberships WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
