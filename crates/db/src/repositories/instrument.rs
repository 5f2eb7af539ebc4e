use crate::models::DbInstrument;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<DbInstrument>> {
    let instruments = sqlx::query_as::<_, DbInstrument>(
        r#"
        SELECT id, name
        FROM instruments
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(instruments)
}
