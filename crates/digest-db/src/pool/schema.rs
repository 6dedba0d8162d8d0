//! Schema bootstrap

use sqlx::PgPool;
use tracing::{info, instrument};

const MESSAGE_REACTIONS: &str = include_str!("../../migrations/0001_message_reactions.sql");

/// Create the reaction table and its digest index if they are missing
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(MESSAGE_REACTIONS).execute(pool).await?;
    info!("Schema ready");
    Ok(())
}
