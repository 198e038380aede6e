use actix_web::{web, HttpResponse};
use anyhow::Context;

use crate::{db_interaction, routes::{ApiError, MessageResponse}, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Deleting user by id",
    skip(pool)
)]
pub async fn delete_user(
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let affected_rows = db_interaction::delete_user(conn, path.into_inner()).await?;

    if affected_rows == 0 {
        return Err(ApiError::NotFound("User"));
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}
