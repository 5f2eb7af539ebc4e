use crate::models::DbMusician;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<DbMusician>> {
    let musicians = sqlx::query_as::<_, DbMusician>(
        r#"
        SELECT id, name, whatsapp, email, active, account_id, created_at
        FROM musicians
        WHERE deleted_at IS NULL
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(musicians)
}

/// Candidates for the availability filter: active and not soft-deleted.
pub async fn list_active(pool: &Pool<Postgres>) -> Result<Vec<DbMusician>> {
    let musicians = sqlx::query_as::<_, DbMusician>(
        r#"
        SELECT id, name, whatsapp, email, active, account_id, created_at
        FROM musicians
        WHERE active = TRUE AND deleted_at IS NULL
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(musicians)
}

pub async fn count_active(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM musicians
        WHERE active = TRUE AND deleted_at IS NULL
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbMusician>> {
    let musician = sqlx::query_as::<_, DbMusician>(
        r#"
        SELECT id, name, whatsapp, email, active, account_id, created_at
        FROM musicians
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(musician)
}

/// Looks up the musician profile bound to a signed-in account.
pub async fn find_by_account(pool: &Pool<Postgres>, account_id: Uuid) -> Result<Option<DbMusician>> {
    let musician = sqlx::query_as::<_, DbMusician>(
        r#"
        SELECT id, name, whatsapp, email, active, account_id, created_at
        FROM musicians
        WHERE account_id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await?;

    Ok(musician)
}

pub async fn set_active(pool: &Pool<Postgres>, id: Uuid, active: bool) -> Result<u64> {
    tracing::debug!("Setting musician {} active={}", id, active);

    let result = sqlx::query(
        r#"
        UPDATE musicians
        SET active = $2
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(active)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Soft delete: tombstones the row, history stays intact.
pub async fn soft_delete(pool: &Pool<Postgres>, id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE musicians
        SET deleted_at = $2
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn update_profile(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    name: &str,
    whatsapp: &str,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE musicians
        SET name = $2, whatsapp = $3
        WHERE account_id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(account_id)
    .bind(name)
    .bind(whatsapp)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
