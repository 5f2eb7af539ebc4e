use crate::models::{DbAssignmentHistory, DbMusicianAssignment};
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Writes a musician's response (status + notes) in a single UPDATE.
/// Returns 0 when no assignment exists for the pair; respond never
/// creates one.
pub async fn update_response(
    pool: &Pool<Postgres>,
    schedule_id: Uuid,
    musician_id: Uuid,
    status: &str,
    notes: Option<&str>,
) -> Result<u64> {
    tracing::debug!(
        "Recording response for schedule={} musician={}: {}",
        schedule_id,
        musician_id,
        status
    );

    let result = sqlx::query(
        r#"
        UPDATE schedule_musicians
        SET status = $3, notes = $4
        WHERE schedule_id = $1 AND musician_id = $2
        "#,
    )
    .bind(schedule_id)
    .bind(musician_id)
    .bind(status)
    .bind(notes)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Notes-only update, valid at any assignment status.
pub async fn update_notes(
    pool: &Pool<Postgres>,
    schedule_id: Uuid,
    musician_id: Uuid,
    notes: &str,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE schedule_musicians
        SET notes = $3
        WHERE schedule_id = $1 AND musician_id = $2
        "#,
    )
    .bind(schedule_id)
    .bind(musician_id)
    .bind(notes)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Full assignment history joined with musician names, newest first.
/// Feeds the dashboard's participation ranking.
pub async fn history(pool: &Pool<Postgres>) -> Result<Vec<DbAssignmentHistory>> {
    let rows = sqlx::query_as::<_, DbAssignmentHistory>(
        r#"
        SELECT m.name AS musician_name, sm.status
        FROM schedule_musicians sm
        JOIN musicians m ON m.id = sm.musician_id
        WHERE m.deleted_at IS NULL
        ORDER BY sm.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Response statuses for assignments whose schedule falls in [from, to]
/// and is not soft-deleted.
pub async fn statuses_in_range(
    pool: &Pool<Postgres>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<String>> {
    let statuses = sqlx::query_scalar::<_, String>(
        r#"
        SELECT sm.status
        FROM schedule_musicians sm
        JOIN schedules s ON s.id = sm.schedule_id
        WHERE s.date >= $1 AND s.date <= $2 AND s.deleted_at IS NULL
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(statuses)
}

/// A musician's assignments joined with their non-deleted schedules,
/// most recent schedule first.
pub async fn for_musician(
    pool: &Pool<Postgres>,
    musician_id: Uuid,
) -> Result<Vec<DbMusicianAssignment>> {
    let rows = sqlx::query_as::<_, DbMusicianAssignment>(
        r#"
        SELECT s.id AS schedule_id, s.title, s.date, sm.status
        FROM schedule_musicians sm
        JOIN schedules s ON s.id = sm.schedule_id
        WHERE sm.musician_id = $1 AND s.deleted_at IS NULL
        ORDER BY s.date DESC
        "#,
    )
    .bind(musician_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
