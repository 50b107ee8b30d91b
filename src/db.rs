use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

pub type Pool = PgPool;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Tables inserted when the database is empty: (capacity, location)
pub const SEED_TABLES: [(i32, &str); 3] = [(2, "By the window"), (4, "Center"), (6, "VIP area")];

pub async fn build_connection_pool(database_url: &str) -> Result<Pool, sqlx::Error> {
    info!(
        "connecting to the database, max {} connections",
        Config::db_max_connections()
    );

    PgPoolOptions::new()
        .max_connections(Config::db_max_connections())
        .min_connections(Config::db_min_connections())
        .max_lifetime(Config::db_max_lifetime())
        .connect(database_url)
        .await
}

pub async fn migrate(pool: &Pool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("database migrations are up to date");

    Ok(())
}

/// Logs the server version, this doubles as a connection check
pub async fn log_server_version(pool: &Pool) {
    match sqlx::query_scalar::<_, String>("SELECT version()")
        .fetch_one(pool)
        .await
    {
        Ok(version) => info!("connected to {}", version),
        Err(e) => warn!("unable to fetch the database version: {}", e),
    }
}

/// Insert the default tables, does nothing once any table exists
pub async fn seed(pool: &Pool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tables")
        .fetch_one(&mut *tx)
        .await?;

    if existing > 0 {
        debug!("skipping seed, {} tables exist", existing);
        return Ok(0);
    }

    let mut inserted = 0;
    for &(capacity, location) in SEED_TABLES.iter() {
        inserted += sqlx::query("INSERT INTO tables (capacity, location) VALUES ($1, $2)")
            .bind(capacity)
            .bind(location)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    tx.commit().await?;
    info!("seeded {} tables", inserted);

    Ok(inserted)
}
