use sqlx::{postgres::PgPool, Executor};

pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    pool.execute(include_str!("instruments.sql")).await?;
    pool.execute(include_str!("volumes.sql")).await?;
    pool.execute(include_str!("ratings.sql")).await?;
    pool.execute(include_str!("geography.sql")).await?;
    pool.execute(include_str!("portfolio.sql")).await?;

    Ok(())
}
