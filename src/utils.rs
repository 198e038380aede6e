use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse};
use diesel::{r2d2::ConnectionManager, SqliteConnection};
use r2d2::{Pool, PooledConnection};
use serde::Serialize;
use thiserror::Error;

use crate::telemetry::spawn_blocking_with_tracing;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub fn error_fmt_chain(f: &mut std::fmt::Formatter<'_>, source: &Option<impl Error>) -> std::fmt::Result{
    if let Some(error) = source{
        write!(f, "\n\tCaused By:\n\t")?;
        write!(f, "{:?}", &error)?;
        error_fmt_chain(f, &error.source())
    } else {
        Ok(())
    }
}

// Checks a connection out of the pool without blocking the actix worker.
// The connection goes back to the pool when the returned guard is dropped.
pub async fn get_pooled_connection(
    pool: &web::Data<DbPool>
) -> Result<DbConnection, PoolGetError>{
    let pool_clone = pool.clone();

    let res = spawn_blocking_with_tracing(move || {
        pool_clone.get()
    })
    .await??;

    Ok(res)
}

#[derive(Error)]
pub enum PoolGetError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to get connection from pool")]
    DbPoolError(#[from] r2d2::Error),
}

impl Debug for PoolGetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[derive(Serialize)]
struct Detail<'a>{
    detail: &'a str
}

// `{"detail": "..."}` body shared by every non-validation error response
pub fn detail_response(status: StatusCode, detail: &str) -> HttpResponse{
    HttpResponse::build(status).json(Detail{ detail })
}
