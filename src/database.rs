use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use diesel::{connection::SimpleConnection, r2d2::{ConnectionManager, CustomizeConnection}, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use r2d2::Pool;

use crate::{configuration::DatabaseSettings, utils::DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

// Applied to every connection the pool opens
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions{
    pub busy_timeout: Duration
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

// Opens (and creates if absent) the sqlite file behind the pool
#[tracing::instrument(
    "Building sqlite connection pool",
    skip_all,
    fields(path = %settings.path)
)]
pub fn get_connection_pool(settings: &DatabaseSettings) -> Result<DbPool, anyhow::Error>{
    if let Some(parent) = Path::new(&settings.path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .context("Failed to create database directory")?;
        }
    }

    let manager = ConnectionManager::<SqliteConnection>::new(settings.path.as_str());

    Pool::builder()
        .max_size(settings.max_connections)
        .connection_customizer(Box::new(ConnectionOptions{
            busy_timeout: settings.busy_timeout()
        }))
        .build(manager)
        .context("Failed to build connection pool")
}

#[tracing::instrument(
    "Running pending migrations",
    skip_all
)]
pub fn run_migrations(pool: &DbPool) -> Result<(), anyhow::Error>{
    let mut conn = pool.get()
                    .context("Failed to get connection from pool")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    Ok(())
}
