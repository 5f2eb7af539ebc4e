use crate::models::{DbAccount, DbMusician};
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn find_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbAccount>> {
    let account = sqlx::query_as::<_, DbAccount>(
        r#"
        SELECT id, email, password_hash, is_admin, created_at
        FROM accounts
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

/// Self-service sign-up: inserts the account and its active musician
/// profile in one transaction, so a failure partway leaves no orphaned
/// identity behind.
pub async fn create_with_musician(
    pool: &Pool<Postgres>,
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

    tx.commit().await?;

    Ok((account, musician))
}

pub async fn update_password(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    password_hash: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE accounts
        SET password_hash = $2
        WHERE id = $1
        "#,
    )
    .bind(account_id)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_session(pool: &Pool<Postgres>, account_id: Uuid, token: &str) -> Result<()> {
    tracing::debug!("Issuing session for account {}", account_id);

    sqlx::query(
        r#"
        INSERT INTO sessions (token, account_id, created_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(token)
    .bind(account_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

/// Resolves a bearer token to its account, if the session exists.
pub async fn find_by_session(pool: &Pool<Postgres>, token: &str) -> Result<Option<DbAccount>> {
    let account = sqlx::query_as::<_, DbAccount>(
        r#"
        SELECT a.id, a.email, a.password_hash, a.is_admin, a.created_at
        FROM sessions s
        JOIN accounts a ON a.id = s.account_id
        WHERE s.token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}
