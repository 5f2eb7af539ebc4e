use crate::models::{DbAccount, DbInvitation, DbMusician};
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn find_pending_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<DbInvitation>> {
    let invitation = sqlx::query_as::<_, DbInvitation>(
        r#"
        SELECT id, email, token, status, invited_by, created_at, expires_at
        FROM musician_invitations
        WHERE email = $1 AND status = 'pending' AND deleted_at IS NULL
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(invitation)
}

pub async fn create(
    pool: &Pool<Postgres>,
    email: &str,
    token: &str,
    invited_by: Uuid,
    expires_at: DateTime<Utc>,
) -> Result<DbInvitation> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating invitation: id={}, email={}", id, email);

    let invitation = sqlx::query_as::<_, DbInvitation>(
        r#"
        INSERT INTO musician_invitations (id, email, token, status, invited_by, created_at, expires_at)
        VALUES ($1, $2, $3, 'pending', $4, $5, $6)
        RETURNING id, email, token, status, invited_by, created_at, expires_at
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(token)
    .bind(invited_by)
    .bind(now)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(invitation)
}

pub async fn find_by_token(pool: &Pool<Postgres>, token: &str) -> Result<Option<DbInvitation>> {
    let invitation = sqlx::query_as::<_, DbInvitation>(
        r#"
        SELECT id, email, token, status, invited_by, created_at, expires_at
        FROM musician_invitations
        WHERE token = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(invitation)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbInvitation>> {
    let invitation = sqlx::query_as::<_, DbInvitation>(
        r#"
        SELECT id, email, token, status, invited_by, created_at, expires_at
        FROM musician_invitations
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(invitation)
}

pub async fn set_status(pool: &Pool<Postgres>, id: Uuid, status: &str) -> Result<u64> {
    tracing::debug!("Transitioning invitation {} to {}", id, status);

    let result = sqlx::query(
        r#"
        UPDATE musician_invitations
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

pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<DbInvitation>> {
    let invitations = sqlx::query_as::<_, DbInvitation>(
        r#"
        SELECT id, email, token, status, invited_by, created_at, expires_at
        FROM musician_invitations
        WHERE deleted_at IS NULL
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(invitations)
}

/// Provisions the account, creates the musician profile, and marks the
/// invitation accepted — all in one transaction, so a failure partway
/// leaves no orphaned identity behind.
pub async fn accept(
    pool: &Pool<Postgres>,
    invitation_id: Uuid,
    email: &str,
    password_hash: &str,
    name: &str,
    whatsapp: &str,
) -> Result<(DbAccount, DbMusician)> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let account = sqlx::query_as::<_, DbAccount>(
        r#"
        INSERT INTO accounts (id, email, password_hash, is_admin, created_at)
        VALUES ($1, $2, $3, FALSE, $4)
        RETURNING id, email, password_hash, is_admin, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let musician = sqlx::query_as::<_, DbMusician>(
        r#"
        INSERT INTO musicians (id, name, whatsapp, email, active, account_id, created_at)
        VALUES ($1, $2, $3, $4, TRUE, $5, $6)
        RETURNING id, name, whatsapp, email, active, account_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(whatsapp)
    .bind(email)
    .bind(account.id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE musician_invitations
        SET status = 'accepted'
        WHERE id = $1
        "#,
    )
    .bind(invitation_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((account, musician))
}
