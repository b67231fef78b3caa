use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub mod queries;

pub type DbPool = Pool<Postgres>;

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Creates the document tables if they are missing.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    for ddl in queries::SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}
