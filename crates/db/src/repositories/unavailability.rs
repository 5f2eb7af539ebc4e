use crate::models::DbUnavailability;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_for_musician(
    pool: &Pool<Postgres>,
    musician_id: Uuid,
) -> Result<Vec<DbUnavailability>> {
    let periods = sqlx::query_as::<_, DbUnavailability>(
        r#"
        SELECT id, musician_id, start_date, end_date, reason, created_at
        FROM musician_unavailability
        WHERE musician_id = $1 AND deleted_at IS NULL
        ORDER BY start_date ASC
        "#,
    )
    .bind(musician_id)
    .fetch_all(pool)
    .await?;

    Ok(periods)
}

/// All non-deleted periods covering `date` (inclusive on both ends).
pub async fn list_covering(pool: &Pool<Postgres>, date: NaiveDate) -> Result<Vec<DbUnavailability>> {
    let periods = sqlx::query_as::<_, DbUnavailability>(
        r#"
        SELECT id, musician_id, start_date, end_date, reason, created_at
        FROM musician_unavailability
        WHERE start_date <= $1 AND end_date >= $1 AND deleted_at IS NULL
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(periods)
}

pub async fn create(
    pool: &Pool<Postgres>,
    musician_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: Option<&str>,
) -> Result<DbUnavailability> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let period = sqlx::query_as::<_, DbUnavailability>(
        r#"
        INSERT INTO musician_unavailability (id, musician_id, start_date, end_date, reason, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, musician_id, start_date, end_date, reason, created_at
        "#,
    )
    .bind(id)
    .bind(musician_id)
    .bind(start_date)
    .bind(end_date)
    .bind(reason)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(period)
}

/// Scoped to the owning musician so one musician cannot delete another's
/// period. Returns the number of rows tombstoned (0 or 1).
pub async fn soft_delete(pool: &Pool<Postgres>, id: Uuid, musician_id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE musician_unavailability
        SET deleted_at = $3
        WHERE id = $1 AND musician_id = $2 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(musician_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
