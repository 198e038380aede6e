use actix_web::{web, HttpResponse};
use anyhow::Context;

use crate::{db_interaction::get_data_warehouse_record, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Getting data warehouse document",
    skip(pool)
)]
pub async fn get_data_warehouse(
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let record = get_data_warehouse_record(conn, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Record"))?;

    Ok(HttpResponse::Ok().json(record))
}
