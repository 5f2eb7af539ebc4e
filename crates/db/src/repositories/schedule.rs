use crate::models::{DbAssignmentDetail, DbRehearsal, DbSchedule, DbTimeSlot};
use chrono::{NaiveDate, Utc};
use eyre::Result;
use rosteria_core::models::schedule::{AssignmentInput, RehearsalInput, TimeSlotInput};
use rosteria_core::roster::seed_assignments;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

/// Scalar schedule fields shared by create and update.
#[derive(Debug, Clone)]
pub struct ScheduleWrite<'a> {
    pub title: &'a str,
    pub date: NaiveDate,
    pub location_id: Option<Uuid>,
    pub notes: Option<&'a str>,
}

/// Inserts a schedule and all its children in one transaction. New
/// schedules always start in `draft`.
pub async fn create(
    pool: &Pool<Postgres>,
    fields: &ScheduleWrite<'_>,
    created_by: Uuid,
    slots: &[TimeSlotInput],
    rehearsals: &[RehearsalInput],
    assignments: &[AssignmentInput],
) -> Result<DbSchedule> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating schedule: id={}, title={}", id, fields.title);

    let mut tx = pool.begin().await?;

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        INSERT INTO schedules (id, title, date, location_id, notes, status, created_by, created_at)
        VALUES ($1, $2, $3, $4, $5, 'draft', $6, $7)
        RETURNING id, title, date, location_id, notes, status, created_by, created_at
        "#,
    )
    .bind(id)
    .bind(fields.title)
    .bind(fields.date)
    .bind(fields.location_id)
    .bind(fields.notes)
    .bind(created_by)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    insert_children(&mut tx, id, slots, rehearsals, assignments).await?;

    tx.commit().await?;

    Ok(schedule)
}

/// Replaces a schedule and its children wholesale, in one transaction.
/// Re-inserted assignments carry status `pending` and no notes: editing
/// a schedule resets every musician response.
pub async fn update(
    pool: &Pool<Postgres>,
    id: Uuid,
    fields: &ScheduleWrite<'_>,
    slots: &[TimeSlotInput],
    rehearsals: &[RehearsalInput],
    assignments: &[AssignmentInput],
) -> Result<Option<DbSchedule>> {
    tracing::debug!("Updating schedule: id={}", id);

    let mut tx = pool.begin().await?;

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        UPDATE schedules
        SET title = $2, date = $3, location_id = $4, notes = $5
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING id, title, date, location_id, notes, status, created_by, created_at
        "#,
    )
    .bind(id)
    .bind(fields.title)
    .bind(fields.date)
    .bind(fields.location_id)
    .bind(fields.notes)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(schedule) = schedule else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM schedule_times WHERE schedule_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM schedule_rehearsals WHERE schedule_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM schedule_musicians WHERE schedule_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    insert_children(&mut tx, id, slots, rehearsals, assignments).await?;

    tx.commit().await?;

    Ok(Some(schedule))
}

async fn insert_children(
    tx: &mut Transaction<'_, Postgres>,
    schedule_id: Uuid,
    slots: &[TimeSlotInput],
    rehearsals: &[RehearsalInput],
    assignments: &[AssignmentInput],
) -> Result<()> {
    for slot in slots {
        sqlx::query(
            r#"
            INSERT INTO schedule_times (id, schedule_id, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(schedule_id)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .execute(&mut **tx)
        .await?;
    }

    for rehearsal in rehearsals {
        sqlx::query(
            r#"
            INSERT INTO schedule_rehearsals (id, schedule_id, date, start_time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(schedule_id)
        .bind(rehearsal.date)
        .bind(rehearsal.start_time)
        .execute(&mut **tx)
        .await?;
    }

    // seed_assignments resets every row to pending with no notes
    for seed in seed_assignments(assignments) {
        sqlx::query(
            r#"
            INSERT INTO schedule_musicians (schedule_id, musician_id, instrument_id, status, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(schedule_id)
        .bind(seed.musician_id)
        .bind(seed.instrument_id)
        .bind(seed.status.as_str())
        .bind(seed.notes)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSchedule>> {
    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, title, date, location_id, notes, status, created_by, created_at
        FROM schedules
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(schedule)
}

pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<DbSchedule>> {
    let schedules = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, title, date, location_id, notes, status, created_by, created_at
        FROM schedules
        WHERE deleted_at IS NULL
        ORDER BY date ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub async fn slots_for(pool: &Pool<Postgres>, schedule_id: Uuid) -> Result<Vec<DbTimeSlot>> {
    let slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, schedule_id, start_time, end_time
        FROM schedule_times
        WHERE schedule_id = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(schedule_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn rehearsals_for(pool: &Pool<Postgres>, schedule_id: Uuid) -> Result<Vec<DbRehearsal>> {
    let rehearsals = sqlx::query_as::<_, DbRehearsal>(
        r#"
        SELECT id, schedule_id, date, start_time
        FROM schedule_rehearsals
        WHERE schedule_id = $1
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(schedule_id)
    .fetch_all(pool)
    .await?;

    Ok(rehearsals)
}

pub async fn assignments_for(
    pool: &Pool<Postgres>,
    schedule_id: Uuid,
) -> Result<Vec<DbAssignmentDetail>> {
    let assignments = sqlx::query_as::<_, DbAssignmentDetail>(
        r#"
        SELECT sm.musician_id, m.name AS musician_name,
               sm.instrument_id, i.name AS instrument_name,
               sm.status, sm.notes
        FROM schedule_musicians sm
        JOIN musicians m ON m.id = sm.musician_id
        JOIN instruments i ON i.id = sm.instrument_id
        WHERE sm.schedule_id = $1
        ORDER BY m.name ASC
        "#,
    )
    .bind(schedule_id)
    .fetch_all(pool)
    .await?;

    Ok(assignments)
}

pub async fn set_status(pool: &Pool<Postgres>, id: Uuid, status: &str) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE schedules
        SET status = $2
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(status)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn soft_delete(pool: &Pool<Postgres>, id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE schedules
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

/// Non-deleted schedules dated within [from, to], for the dashboard's
/// current-month count.
pub async fn count_in_range(pool: &Pool<Postgres>, from: NaiveDate, to: NaiveDate) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM schedules
        WHERE date >= $1 AND date <= $2 AND deleted_at IS NULL
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
