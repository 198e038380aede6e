use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use validator::Validate;

use crate::{db_interaction::{get_inventory_item_by_id, get_inventory_items}, routes::ApiError, utils::{get_pooled_connection, DbPool}, validation::ValidQuery};

#[derive(Deserialize, Validate, Debug)]
pub struct GetInventoryQuery {
    pub product_name: Option<String>
}

#[tracing::instrument(
    "Get inventory entries",
    skip(pool)
)]
pub async fn get_inventory(
    pool: web::Data<DbPool>,
    query: ValidQuery<GetInventoryQuery>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let inventory_items = get_inventory_items(conn, query.0.product_name).await?;

    Ok(HttpResponse::Ok().json(inventory_items))
}

#[tracing::instrument(
    "Get inventory entry by id",
    skip(pool)
)]
pub async fn get_inventory_item(
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let inventory_item = get_inventory_item_by_id(conn, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Inventory"))?;

    Ok(HttpResponse::Ok().json(inventory_item))
}
