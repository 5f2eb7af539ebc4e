use crate::models::DbLocation;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<DbLocation>> {
    let locations = sqlx::query_as::<_, DbLocation>(
        r#"
        SELECT id, name, address
        FROM locations
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(locations)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbLocation>> {
    let location = sqlx::query_as::<_, DbLocation>(
        r#"
        SELECT id, name, address
        FROM locations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(location)
}
